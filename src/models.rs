//! Data models for generated identities.

use crate::geo::CountryCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender reported by the persona API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Used when the persona API fails or reports something unexpected.
    Unknown,
}

impl Gender {
    /// Maps the lowercase API value onto the enum. Anything unrecognized
    /// becomes `Unknown` rather than failing the whole request.
    pub fn from_api_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Name and gender fetched from the persona API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub gender: Gender,
}

impl Persona {
    /// Literal stand-in used whenever the persona API is unavailable.
    pub fn fallback() -> Self {
        Self {
            name: "Alex Smith".to_string(),
            gender: Gender::Unknown,
        }
    }
}

/// A fully assembled identity, built fresh for every request and never
/// stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Full name, e.g. "Mia Schneider".
    pub name: String,
    /// Gender matching the name.
    pub gender: Gender,
    /// Locally synthesized phone number in the country's format.
    pub phone: String,
    /// Street address from reverse geocoding (or the country fallback).
    pub address: String,
    /// Country the identity belongs to.
    pub country: CountryCode,
    /// When this identity was generated.
    pub generated_at: DateTime<Utc>,
}

impl Identity {
    /// Plain-text rendering for `--oneshot --format text`.
    pub fn to_text(&self) -> String {
        format!(
            "Name:    {}\nGender:  {}\nPhone:   {}\nAddress: {}\nCountry: {}",
            self.name, self.gender, self.phone, self.address, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_api_value() {
        assert_eq!(Gender::from_api_value("male"), Gender::Male);
        assert_eq!(Gender::from_api_value("Female"), Gender::Female);
        assert_eq!(Gender::from_api_value("other"), Gender::Unknown);
        assert_eq!(Gender::from_api_value(""), Gender::Unknown);
    }

    #[test]
    fn test_gender_display_is_capitalized() {
        assert_eq!(Gender::Male.to_string(), "Male");
        assert_eq!(Gender::Female.to_string(), "Female");
        assert_eq!(Gender::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_persona_fallback() {
        let persona = Persona::fallback();
        assert_eq!(persona.name, "Alex Smith");
        assert_eq!(persona.gender, Gender::Unknown);
    }

    #[test]
    fn test_identity_text_rendering() {
        let identity = Identity {
            name: "Alex Smith".to_string(),
            gender: Gender::Unknown,
            phone: "+61 4 1234 5678".to_string(),
            address: "1 Collins Street, Melbourne, 3000, AU".to_string(),
            country: CountryCode::Au,
            generated_at: Utc::now(),
        };

        let text = identity.to_text();
        assert!(text.contains("Alex Smith"));
        assert!(text.contains("+61 4 1234 5678"));
        assert!(text.contains("Country: AU"));
    }
}
