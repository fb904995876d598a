//! Derived person-name fields

/// Assemble a display name from first, middle, and last name.
///
/// Eastern name order renders as "Last, First Middle".
pub fn full_name(first: &str, middle: &str, last: &str, eastern: bool) -> String {
    let mut name = first.to_string();

    if !middle.is_empty() {
        name = format!("{name} {middle}");
    }

    if !last.is_empty() {
        name = if eastern {
            format!("{last}, {name}")
        } else {
            format!("{name} {last}")
        };
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_only() {
        assert_eq!(full_name("Ada", "", "", false), "Ada");
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(full_name("Ada", "", "Lovelace", false), "Ada Lovelace");
    }

    #[test]
    fn test_full_western_order() {
        assert_eq!(
            full_name("Augusta", "Ada", "King", false),
            "Augusta Ada King"
        );
    }

    #[test]
    fn test_eastern_order() {
        assert_eq!(full_name("Hayao", "", "Miyazaki", true), "Miyazaki, Hayao");
        assert_eq!(full_name("Min", "Jun", "Kim", true), "Kim, Min Jun");
    }

    #[test]
    fn test_eastern_order_without_last_name() {
        // Eastern ordering only applies when a last name is present
        assert_eq!(full_name("Min", "Jun", "", true), "Min Jun");
    }
}
