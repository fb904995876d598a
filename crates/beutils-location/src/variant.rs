//! Presentation variants of the location string
//!
//! A location string is rendered from the deepest populated level of the
//! hierarchy. Five variants control how much of the ancestor chain each
//! rendering includes:
//!
//! | variant | city line                              | state line                     | country line                 | subregion line      |
//! |---------|----------------------------------------|--------------------------------|------------------------------|---------------------|
//! | 1       | Region, Subregion, Country, State, City| Region, Subregion, Country, State | Region, Subregion, Country | Region, Subregion   |
//! | 2       | Country, State, City                   | Country, State                 | Country                      | Region, Subregion   |
//! | 3       | Country, City                          | Country, State                 | Country                      | Region, Subregion   |
//! | 4       | Country, State, City                   | Country, State                 | Country                      | Subregion           |
//! | 5       | Country, City                          | Country, State                 | Country                      | Subregion           |
//!
//! The region line is always just the region. Mirroring reverses every
//! component list (most specific level first). Redundant names collapse:
//! a city named like its state (and possibly its country) is omitted, as is
//! a state named like its country.

/// One level of the location hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Region,
    Subregion,
    Country,
    State,
    City,
}

/// One component of a rendered location string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    Field(Level),
    Comma,
}

use Level::{City, Country, Region, State, Subregion};
use Segment::{Comma, Field};

/// The five presentation variants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationVariant {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Default for LocationVariant {
    fn default() -> Self {
        LocationVariant::Four
    }
}

impl LocationVariant {
    /// Parse a numeric variant; out-of-range values fall back to the default
    pub fn from_number(number: u8) -> Self {
        match number {
            1 => LocationVariant::One,
            2 => LocationVariant::Two,
            3 => LocationVariant::Three,
            5 => LocationVariant::Five,
            _ => LocationVariant::Four,
        }
    }

    fn is_short_city(self) -> bool {
        matches!(self, LocationVariant::Three | LocationVariant::Five)
    }

    fn drops_upper_levels(self) -> bool {
        !matches!(self, LocationVariant::One)
    }

    fn is_bare_subregion(self) -> bool {
        matches!(self, LocationVariant::Four | LocationVariant::Five)
    }
}

/// Component lists for every branch of the location rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantPlan {
    /// Deepest level is a city
    pub city: Vec<Segment>,
    /// City, state, and country all share one name (full-chain variants)
    pub city_eq_state_eq_country: Option<Vec<Segment>>,
    /// City named like its state (full-chain variants)
    pub city_eq_state: Option<Vec<Segment>>,
    /// City named like its country (short-city variants)
    pub city_eq_country: Option<Vec<Segment>>,
    /// Deepest level is a state
    pub state: Vec<Segment>,
    /// State named like its country
    pub state_eq_country: Vec<Segment>,
    /// Deepest level is a country
    pub country: Vec<Segment>,
    /// Deepest level is a subregion
    pub subregion: Vec<Segment>,
    /// Deepest level is a region
    pub region: Vec<Segment>,
}

/// Compute the component lists for a variant
pub fn plan(variant: LocationVariant, mirror: bool) -> VariantPlan {
    let finish = |mut segments: Vec<Segment>| {
        if mirror {
            segments.reverse();
        }
        segments
    };

    // City branch and its redundancy collapses
    let (city, city_eq_state_eq_country, city_eq_state, city_eq_country) =
        if variant.is_short_city() {
            let city = vec![Field(Country), Comma, Field(City)];
            // A city named like its country collapses to the country alone
            (city, None, None, Some(vec![Field(Country)]))
        } else {
            let mut city = vec![
                Field(Region),
                Comma,
                Field(Subregion),
                Comma,
                Field(Country),
                Comma,
                Field(State),
                Comma,
                Field(City),
            ];
            if variant.drops_upper_levels() {
                city.drain(..4);
            }
            // Drop ", State, City" when all three names coincide
            let eq3 = city[..city.len() - 4].to_vec();
            // Drop ", City" when the city is named like its state
            let eq_state = city[..city.len() - 2].to_vec();
            (city, Some(eq3), Some(eq_state), None)
        };

    // State branch
    let mut state = vec![
        Field(Region),
        Comma,
        Field(Subregion),
        Comma,
        Field(Country),
        Comma,
        Field(State),
    ];
    if variant.drops_upper_levels() {
        state.drain(..4);
    }
    // Drop ", State" when the state is named like its country
    let state_eq_country = state[..state.len() - 2].to_vec();

    // Country branch
    let mut country = vec![Field(Region), Comma, Field(Subregion), Comma, Field(Country)];
    if variant.drops_upper_levels() {
        country.drain(..4);
    }

    // Subregion branch
    let mut subregion = vec![Field(Region), Comma, Field(Subregion)];
    if variant.is_bare_subregion() {
        subregion.drain(..2);
    }

    VariantPlan {
        city: finish(city),
        city_eq_state_eq_country: city_eq_state_eq_country.map(finish),
        city_eq_state: city_eq_state.map(finish),
        city_eq_country: city_eq_country.map(finish),
        state: finish(state),
        state_eq_country: finish(state_eq_country),
        country: finish(country),
        subregion: finish(subregion),
        region: vec![Field(Region)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[Segment]) -> String {
        segments
            .iter()
            .map(|segment| match segment {
                Field(Region) => "Region",
                Field(Subregion) => "Subregion",
                Field(Country) => "Country",
                Field(State) => "State",
                Field(City) => "City",
                Comma => ", ",
            })
            .collect()
    }

    #[test]
    fn test_variant_one() {
        let plan = plan(LocationVariant::One, false);
        assert_eq!(render(&plan.city), "Region, Subregion, Country, State, City");
        assert_eq!(render(&plan.state), "Region, Subregion, Country, State");
        assert_eq!(render(&plan.country), "Region, Subregion, Country");
        assert_eq!(render(&plan.subregion), "Region, Subregion");
        assert_eq!(render(&plan.region), "Region");
    }

    #[test]
    fn test_variant_two() {
        let plan = plan(LocationVariant::Two, false);
        assert_eq!(render(&plan.city), "Country, State, City");
        assert_eq!(render(&plan.state), "Country, State");
        assert_eq!(render(&plan.country), "Country");
        assert_eq!(render(&plan.subregion), "Region, Subregion");
        assert_eq!(render(&plan.region), "Region");
    }

    #[test]
    fn test_variant_three() {
        let plan = plan(LocationVariant::Three, false);
        assert_eq!(render(&plan.city), "Country, City");
        assert_eq!(render(&plan.state), "Country, State");
        assert_eq!(render(&plan.country), "Country");
        assert_eq!(render(&plan.subregion), "Region, Subregion");
    }

    #[test]
    fn test_variant_four() {
        let plan = plan(LocationVariant::Four, false);
        assert_eq!(render(&plan.city), "Country, State, City");
        assert_eq!(render(&plan.state), "Country, State");
        assert_eq!(render(&plan.country), "Country");
        assert_eq!(render(&plan.subregion), "Subregion");
    }

    #[test]
    fn test_variant_five() {
        let plan = plan(LocationVariant::Five, false);
        assert_eq!(render(&plan.city), "Country, City");
        assert_eq!(render(&plan.subregion), "Subregion");
    }

    #[test]
    fn test_redundancy_collapses_full_chain() {
        let plan_one = plan(LocationVariant::One, false);
        assert_eq!(
            render(plan_one.city_eq_state_eq_country.as_ref().unwrap()),
            "Region, Subregion, Country"
        );
        assert_eq!(
            render(plan_one.city_eq_state.as_ref().unwrap()),
            "Region, Subregion, Country, State"
        );
        assert!(plan_one.city_eq_country.is_none());
        assert_eq!(render(&plan_one.state_eq_country), "Region, Subregion, Country");

        let plan_four = plan(LocationVariant::Four, false);
        assert_eq!(
            render(plan_four.city_eq_state_eq_country.as_ref().unwrap()),
            "Country"
        );
        assert_eq!(
            render(plan_four.city_eq_state.as_ref().unwrap()),
            "Country, State"
        );
        assert_eq!(render(&plan_four.state_eq_country), "Country");
    }

    #[test]
    fn test_redundancy_collapses_short_city() {
        let plan_three = plan(LocationVariant::Three, false);
        assert!(plan_three.city_eq_state_eq_country.is_none());
        assert!(plan_three.city_eq_state.is_none());
        assert_eq!(render(plan_three.city_eq_country.as_ref().unwrap()), "Country");
    }

    #[test]
    fn test_mirror_reverses_components() {
        let plan = plan(LocationVariant::Two, true);
        assert_eq!(render(&plan.city), "City, State, Country");
        assert_eq!(render(&plan.state), "State, Country");
        assert_eq!(render(&plan.subregion), "Subregion, Region");
        // Single-component lists are unaffected
        assert_eq!(render(&plan.country), "Country");
        assert_eq!(render(&plan.region), "Region");
    }

    #[test]
    fn test_from_number() {
        assert_eq!(LocationVariant::from_number(1), LocationVariant::One);
        assert_eq!(LocationVariant::from_number(3), LocationVariant::Three);
        assert_eq!(LocationVariant::from_number(4), LocationVariant::Four);
        // Unknown variants fall back to the default
        assert_eq!(LocationVariant::from_number(0), LocationVariant::Four);
        assert_eq!(LocationVariant::from_number(9), LocationVariant::Four);
        assert_eq!(LocationVariant::default(), LocationVariant::Four);
    }
}
