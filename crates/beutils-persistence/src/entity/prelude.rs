//! Re-exports of all entities under their conventional names

pub use super::auth_token::Entity as AuthToken;
pub use super::city::Entity as City;
pub use super::country::Entity as Country;
pub use super::currency::Entity as Currency;
pub use super::region::Entity as Region;
pub use super::state::Entity as State;
pub use super::subregion::Entity as Subregion;
pub use super::users::Entity as Users;
