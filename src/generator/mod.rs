//! Identity synthesis.
//!
//! Combines reverse geocoding (bounded retries, fallback literal), the
//! persona API (fallback "Alex Smith"), and local phone synthesis into a
//! complete [`Identity`]. Once the country is known, generation always
//! produces a result; upstream failures degrade to fallbacks instead of
//! erroring the request.

pub mod phone;
pub mod retry;

use crate::geo::CountryCode;
use crate::models::{Identity, Persona};
use crate::upstream::{NominatimClient, RandomUserClient};
use anyhow::{Context, Result};
use chrono::Utc;
use retry::{retry_until_some, RetryPolicy};
use std::time::Duration;
use tracing::{info, warn};

/// Settings for the generator, assembled from config and CLI by the caller.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub nominatim_url: String,
    pub randomuser_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_attempts: usize,
    pub retry_delay: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            randomuser_url: "https://randomuser.me".to_string(),
            user_agent: concat!("identikit/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            max_attempts: 100,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// The identity generator. Owns the upstream clients; cheap to clone and
/// safe to share across requests since it holds no mutable state.
#[derive(Debug, Clone)]
pub struct IdentityGenerator {
    nominatim: NominatimClient,
    randomuser: RandomUserClient,
    settings: GeneratorSettings,
}

impl IdentityGenerator {
    /// Build the generator and its shared HTTP client.
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            nominatim: NominatimClient::new(http_client.clone(), settings.nominatim_url.clone()),
            randomuser: RandomUserClient::new(http_client, settings.randomuser_url.clone()),
            settings,
        })
    }

    /// Generate a complete identity for the given country.
    pub async fn generate(&self, country: CountryCode) -> Identity {
        let address = self.resolve_address(country).await;

        let persona = match self.randomuser.fetch_persona(country).await {
            Ok(persona) => persona,
            Err(e) => {
                warn!(error = %e, "Persona lookup failed, using fallback");
                Persona::fallback()
            }
        };

        let phone = phone::random_phone_number(country);

        info!(%country, name = %persona.name, "Generated identity");

        Identity {
            name: persona.name,
            gender: persona.gender,
            phone,
            address,
            country,
            generated_at: Utc::now(),
        }
    }

    /// Reverse-geocode random coordinates until a usable street address
    /// appears or the attempt budget is spent, then fall back to the
    /// country's literal address.
    async fn resolve_address(&self, country: CountryCode) -> String {
        let policy = RetryPolicy {
            attempts: self.settings.max_attempts,
            delay: self.settings.retry_delay,
        };

        let found = retry_until_some(policy, || {
            let coordinates = country.sample_location();
            let client = &self.nominatim;
            async move { client.reverse(coordinates).await }
        })
        .await;

        match found {
            Some(address) => address.format(country),
            None => {
                warn!(
                    %country,
                    attempts = policy.attempts,
                    "No usable address found, using fallback"
                );
                country.fallback_address().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    /// Settings pointed at a port nothing listens on, so every upstream
    /// call fails fast with a connect error.
    fn unreachable_settings() -> GeneratorSettings {
        GeneratorSettings {
            nominatim_url: "http://127.0.0.1:9".to_string(),
            randomuser_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
            max_attempts: 2,
            retry_delay: Duration::ZERO,
            ..GeneratorSettings::default()
        }
    }

    #[test]
    fn test_generate_falls_back_when_upstreams_unreachable() {
        let generator = IdentityGenerator::new(unreachable_settings()).unwrap();
        let identity = tokio_test::block_on(generator.generate(CountryCode::Au));

        assert_eq!(identity.address, CountryCode::Au.fallback_address());
        assert_eq!(identity.name, "Alex Smith");
        assert_eq!(identity.gender, Gender::Unknown);
        assert!(identity.phone.starts_with("+61 4 "));
        assert_eq!(identity.country, CountryCode::Au);
    }

    #[test]
    fn test_default_settings() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.max_attempts, 100);
        assert_eq!(settings.nominatim_url, "https://nominatim.openstreetmap.org");
        assert!(settings.user_agent.starts_with("identikit/"));
    }
}
