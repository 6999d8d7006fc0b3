use anyhow::{Result, anyhow};

/// Cities offered by the city picker.
pub const CITIES: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "London",
    "Tokyo",
    "Paris",
    "Berlin",
    "Sydney",
    "Moscow",
    "Beijing",
    "Gaborone",
    "New Delhi",
];

pub const DEFAULT_CITY: &str = "New York";

/// Look up `name` in [`CITIES`] ignoring case and surrounding whitespace,
/// returning the canonical spelling.
pub fn allowed_city(name: &str) -> Result<&'static str> {
    let wanted = name.trim();

    CITIES.iter().copied().find(|c| c.eq_ignore_ascii_case(wanted)).ok_or_else(|| {
        anyhow!("Unknown city '{wanted}'. Supported cities: {}.", CITIES.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_city_is_in_the_list() {
        assert!(CITIES.contains(&DEFAULT_CITY));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(allowed_city("  new delhi ").unwrap(), "New Delhi");
        assert_eq!(allowed_city("TOKYO").unwrap(), "Tokyo");
    }

    #[test]
    fn unknown_city_lists_choices() {
        let err = allowed_city("Atlantis").unwrap_err().to_string();
        assert!(err.contains("Unknown city 'Atlantis'"));
        assert!(err.contains("Gaborone"));
    }
}
