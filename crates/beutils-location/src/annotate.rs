//! Location-string annotation for database queries
//!
//! Adds a `location` string column to a select over any entity carrying the
//! five location foreign keys. The string is assembled in SQL from the
//! LEFT-JOINed level tables with a CASE expression, so filtering and
//! pagination keep working on the annotated query.
//!
//! NULL-safe by construction: a populated level implies populated ancestors
//! (the denormalized ancestor invariant), so every name referenced by a
//! matching WHEN branch is non-null.

use sea_orm::sea_query::extension::postgres::PgBinOper;
use sea_orm::sea_query::{
    CaseStatement, ColumnRef, Condition, Expr, IntoIden, SimpleExpr,
};
use sea_orm::{EntityTrait, JoinType, QuerySelect, RelationDef, RelationTrait, Select};

use beutils_persistence::entity::{city, country, region, state, subregion, users};

use crate::variant::{Level, LocationVariant, Segment, plan};

/// Alias of the annotated column
pub const LOCATION_COLUMN: &str = "location";

/// Fallback string for rows without any location reference
pub const DEFAULT_LOCATION: &str = "Unspecified";

/// Options for the annotated location string
#[derive(Clone, Debug)]
pub struct AnnotateOptions {
    pub variant: LocationVariant,
    pub mirror: bool,
    pub default: String,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            variant: LocationVariant::default(),
            mirror: false,
            default: DEFAULT_LOCATION.to_string(),
        }
    }
}

/// Entities carrying the five location foreign keys
pub trait LocationRelated: EntityTrait {
    /// Join relations to region, subregion, country, state, and city
    fn location_joins() -> Vec<RelationDef>;
}

impl LocationRelated for users::Entity {
    fn location_joins() -> Vec<RelationDef> {
        vec![
            users::Relation::Region.def(),
            users::Relation::Subregion.def(),
            users::Relation::Country.def(),
            users::Relation::State.def(),
            users::Relation::City.def(),
        ]
    }
}

/// Annotate a select with a human-readable `location` string column
pub fn annotate_location<E>(select: Select<E>, options: &AnnotateOptions) -> Select<E>
where
    E: LocationRelated,
{
    let mut select = select;
    for join in E::location_joins() {
        select = select.join(JoinType::LeftJoin, join);
    }
    select.column_as(location_expr(options), LOCATION_COLUMN)
}

/// Build the CASE expression for the location string.
///
/// Branch order matters: redundancy collapses come before their plain
/// counterparts, deeper levels before shallower ones.
pub fn location_expr(options: &AnnotateOptions) -> SimpleExpr {
    let plan = plan(options.variant, options.mirror);

    let mut case = CaseStatement::new();

    if let Some(segments) = &plan.city_eq_state_eq_country {
        case = case.case(
            Condition::all()
                .add(level_present(Level::City))
                .add(names_equal(Level::City, Level::State))
                .add(names_equal(Level::City, Level::Country)),
            concat_segments(segments),
        );
    }
    if let Some(segments) = &plan.city_eq_state {
        case = case.case(
            Condition::all()
                .add(level_present(Level::City))
                .add(names_equal(Level::City, Level::State)),
            concat_segments(segments),
        );
    }
    if let Some(segments) = &plan.city_eq_country {
        case = case.case(
            Condition::all()
                .add(level_present(Level::City))
                .add(names_equal(Level::City, Level::Country)),
            concat_segments(segments),
        );
    }
    case = case.case(level_present(Level::City), concat_segments(&plan.city));

    case = case.case(
        Condition::all()
            .add(level_present(Level::State))
            .add(names_equal(Level::State, Level::Country)),
        concat_segments(&plan.state_eq_country),
    );
    case = case.case(level_present(Level::State), concat_segments(&plan.state));

    case = case.case(level_present(Level::Country), concat_segments(&plan.country));
    case = case.case(
        level_present(Level::Subregion),
        concat_segments(&plan.subregion),
    );
    case = case.case(level_present(Level::Region), concat_segments(&plan.region));

    case.finally(options.default.clone()).into()
}

/// `<level>.id IS NOT NULL`, a populated LEFT JOIN row
fn level_present(level: Level) -> SimpleExpr {
    Expr::col(id_column(level)).is_not_null()
}

/// `<a>.name = <b>.name`
fn names_equal(a: Level, b: Level) -> SimpleExpr {
    Expr::col(name_column(a)).eq(SimpleExpr::Column(name_column(b)))
}

fn id_column(level: Level) -> ColumnRef {
    match level {
        Level::Region => {
            ColumnRef::TableColumn(region::Entity.into_iden(), region::Column::Id.into_iden())
        }
        Level::Subregion => ColumnRef::TableColumn(
            subregion::Entity.into_iden(),
            subregion::Column::Id.into_iden(),
        ),
        Level::Country => {
            ColumnRef::TableColumn(country::Entity.into_iden(), country::Column::Id.into_iden())
        }
        Level::State => {
            ColumnRef::TableColumn(state::Entity.into_iden(), state::Column::Id.into_iden())
        }
        Level::City => {
            ColumnRef::TableColumn(city::Entity.into_iden(), city::Column::Id.into_iden())
        }
    }
}

fn name_column(level: Level) -> ColumnRef {
    match level {
        Level::Region => {
            ColumnRef::TableColumn(region::Entity.into_iden(), region::Column::Name.into_iden())
        }
        Level::Subregion => ColumnRef::TableColumn(
            subregion::Entity.into_iden(),
            subregion::Column::Name.into_iden(),
        ),
        Level::Country => ColumnRef::TableColumn(
            country::Entity.into_iden(),
            country::Column::Name.into_iden(),
        ),
        Level::State => {
            ColumnRef::TableColumn(state::Entity.into_iden(), state::Column::Name.into_iden())
        }
        Level::City => {
            ColumnRef::TableColumn(city::Entity.into_iden(), city::Column::Name.into_iden())
        }
    }
}

/// Fold a component list into a `||` concatenation; single components stay
/// bare column references.
fn concat_segments(segments: &[Segment]) -> SimpleExpr {
    let mut parts = segments.iter().map(|segment| match segment {
        Segment::Field(level) => SimpleExpr::Column(name_column(*level)),
        Segment::Comma => SimpleExpr::from(", "),
    });
    let first = parts.next().expect("component lists are never empty");
    parts.fold(first, |acc, part| acc.binary(PgBinOper::Concatenate, part))
}
