//! ISO-3166 country lookup

use std::collections::HashSet;

use isocountry::CountryCode;

use crate::dto::CountryDto;

/// Read-only lookup over known countries
pub trait CountryLookup: Send + Sync {
    /// Every known country, sorted by alpha-3 code
    fn all(&self) -> Vec<CountryDto>;

    /// Exact, case-sensitive membership test on alpha-3 codes
    fn contains_code(&self, code: &str) -> bool;
}

/// Country lookup backed by the ISO-3166 table
#[derive(Debug, Clone)]
pub struct IsoCountryLookup {
    countries: Vec<CountryDto>,
    codes: HashSet<&'static str>,
}

impl IsoCountryLookup {
    pub fn new() -> Self {
        let mut countries: Vec<CountryDto> = CountryCode::iter()
            .map(|c| CountryDto {
                code: c.alpha3().to_string(),
                name: c.name().to_string(),
            })
            .collect();
        countries.sort_by(|a, b| a.code.cmp(&b.code));

        let codes = CountryCode::iter().map(|c| c.alpha3()).collect();

        Self { countries, codes }
    }
}

impl Default for IsoCountryLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryLookup for IsoCountryLookup {
    fn all(&self) -> Vec<CountryDto> {
        self.countries.clone()
    }

    fn contains_code(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let lookup = IsoCountryLookup::new();
        assert!(lookup.contains_code("BGR"));
        assert!(lookup.contains_code("USA"));
        assert!(lookup.contains_code("DEU"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let lookup = IsoCountryLookup::new();
        assert!(!lookup.contains_code("bgr"));
        assert!(!lookup.contains_code("XXX"));
        assert!(!lookup.contains_code(""));
    }

    #[test]
    fn test_all_is_sorted_and_complete() {
        let countries = IsoCountryLookup::new().all();
        assert!(countries.len() > 240);
        assert!(countries.windows(2).all(|w| w[0].code < w[1].code));
        assert!(countries.iter().all(|c| c.code.len() == 3));
    }
}
