//! Static country data and coordinate sampling.
//!
//! Each supported country carries a display name, the nationality code
//! understood by randomuser.me, one or more city anchor coordinates, and
//! a fallback street address used when reverse geocoding comes up empty.

use crate::error::UnknownCountry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A supported country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CountryCode {
    Au,
    Ch,
}

/// All supported countries, in selector order.
pub const ALL_COUNTRIES: &[CountryCode] = &[CountryCode::Au, CountryCode::Ch];

/// A city used as the center point for coordinate sampling.
#[derive(Debug, Clone, Copy)]
pub struct CityAnchor {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// A randomly sampled coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Total jitter span applied to each axis around a city anchor, in degrees.
const JITTER_DEGREES: f64 = 0.1;

impl CountryCode {
    /// The ISO 3166-1 alpha-2 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountryCode::Au => "AU",
            CountryCode::Ch => "CH",
        }
    }

    /// Human-readable country name for the selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            CountryCode::Au => "Australia",
            CountryCode::Ch => "Switzerland",
        }
    }

    /// Nationality code passed to randomuser.me so names match the country.
    pub fn nationality(&self) -> &'static str {
        match self {
            CountryCode::Au => "au",
            CountryCode::Ch => "ch",
        }
    }

    /// City anchors coordinates are sampled around.
    pub fn city_anchors(&self) -> &'static [CityAnchor] {
        match self {
            CountryCode::Au => &[CityAnchor {
                name: "Melbourne",
                lat: -37.8136,
                lon: 144.9631,
            }],
            CountryCode::Ch => &[CityAnchor {
                name: "Zurich",
                lat: 47.3769,
                lon: 8.5417,
            }],
        }
    }

    /// Literal address used when reverse geocoding exhausts its attempts.
    pub fn fallback_address(&self) -> &'static str {
        match self {
            CountryCode::Au => "1 Collins Street, Melbourne, 3000, AU",
            CountryCode::Ch => "1 Bahnhofstrasse, Z\u{fc}rich, 8001, CH",
        }
    }

    /// Sample a random coordinate near one of this country's city anchors.
    pub fn sample_location(&self) -> Coordinates {
        let anchors = self.city_anchors();
        let anchor = anchors[fastrand::usize(..anchors.len())];

        let coordinates = Coordinates {
            lat: anchor.lat + (fastrand::f64() - 0.5) * JITTER_DEGREES,
            lon: anchor.lon + (fastrand::f64() - 0.5) * JITTER_DEGREES,
        };

        trace!(city = anchor.name, lat = coordinates.lat, lon = coordinates.lon, "Sampled location");

        coordinates
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AU" => Ok(CountryCode::Au),
            "CH" => Ok(CountryCode::Ch),
            _ => Err(UnknownCountry(s.to_string())),
        }
    }
}

impl TryFrom<String> for CountryCode {
    type Error = UnknownCountry;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_country_code() {
        assert_eq!("AU".parse::<CountryCode>().unwrap(), CountryCode::Au);
        assert_eq!("ch".parse::<CountryCode>().unwrap(), CountryCode::Ch);
        assert_eq!(" au ".parse::<CountryCode>().unwrap(), CountryCode::Au);
    }

    #[test]
    fn test_parse_unknown_country() {
        let err = "XX".parse::<CountryCode>().unwrap_err();
        assert_eq!(err, UnknownCountry("XX".to_string()));
    }

    #[test]
    fn test_sample_location_stays_near_anchor() {
        for country in ALL_COUNTRIES {
            let anchor = country.city_anchors()[0];
            for _ in 0..50 {
                let coords = country.sample_location();
                assert!((coords.lat - anchor.lat).abs() < JITTER_DEGREES);
                assert!((coords.lon - anchor.lon).abs() < JITTER_DEGREES);
            }
        }
    }

    #[test]
    fn test_fallback_address_carries_country_code() {
        for country in ALL_COUNTRIES {
            assert!(country.fallback_address().ends_with(country.as_str()));
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&CountryCode::Ch).unwrap();
        assert_eq!(json, "\"CH\"");
        let code: CountryCode = serde_json::from_str("\"au\"").unwrap();
        assert_eq!(code, CountryCode::Au);
    }
}
