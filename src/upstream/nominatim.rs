//! Reverse-geocoding client for OpenStreetMap Nominatim.
//!
//! A single lookup turns a coordinate pair into a postal address. Most
//! random coordinates land on parks, water, or unnamed ways, so callers
//! should expect `Ok(None)` far more often than a usable address.

use crate::error::UpstreamError;
use crate::geo::{Coordinates, CountryCode};
use serde::Deserialize;
use tracing::debug;

const SERVICE: &str = "nominatim";

/// Raw reverse-geocode response. Nominatim omits the `address` object
/// entirely for coordinates it cannot resolve.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressDetails>,
}

/// The address fragments we care about; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct AddressDetails {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    postcode: Option<String>,
}

impl AddressDetails {
    /// City, falling back to town, then village.
    fn locality(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
    }
}

/// A reverse-geocoded street address with all required parts present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetAddress {
    pub house_number: String,
    pub road: String,
    pub locality: String,
    pub postcode: String,
}

impl StreetAddress {
    /// Builds a street address if the payload has a house number, a road,
    /// and a locality. Postcode is optional and renders empty when absent.
    fn from_details(details: &AddressDetails) -> Option<Self> {
        let locality = details.locality()?;
        Some(Self {
            house_number: details.house_number.clone()?,
            road: details.road.clone()?,
            locality: locality.to_string(),
            postcode: details.postcode.clone().unwrap_or_default(),
        })
    }

    /// Single-line rendering: "12 Main Street, Springfield, 4000, AU".
    pub fn format(&self, country: CountryCode) -> String {
        format!(
            "{} {}, {}, {}, {}",
            self.house_number, self.road, self.locality, self.postcode, country
        )
    }
}

/// Client for the Nominatim reverse-geocoding endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Reverse-geocode one coordinate pair.
    ///
    /// Returns `Ok(Some(address))` only when the response carries every
    /// required address part; `Ok(None)` when the coordinates resolved to
    /// something without a usable street address.
    pub async fn reverse(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<StreetAddress>, UpstreamError> {
        let url = format!("{}/reverse", self.base_url);
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", "18"),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let reverse: ReverseResponse =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidResponse {
                    service: SERVICE,
                    detail: e.to_string(),
                })?;

        let address = reverse
            .address
            .as_ref()
            .and_then(StreetAddress::from_details);

        debug!(
            lat = coordinates.lat,
            lon = coordinates.lon,
            usable = address.is_some(),
            "Reverse geocode lookup"
        );

        Ok(address)
    }
}
