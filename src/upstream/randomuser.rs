//! Persona client for the randomuser.me API.

use crate::error::UpstreamError;
use crate::geo::CountryCode;
use crate::models::{Gender, Persona};
use serde::Deserialize;
use tracing::debug;

const SERVICE: &str = "randomuser.me";

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    #[serde(default)]
    results: Vec<RandomUserResult>,
}

#[derive(Debug, Deserialize)]
struct RandomUserResult {
    name: NameParts,
    gender: String,
}

#[derive(Debug, Deserialize)]
struct NameParts {
    first: String,
    last: String,
}

impl RandomUserResult {
    fn into_persona(self) -> Persona {
        Persona {
            name: format!("{} {}", self.name.first, self.name.last),
            gender: Gender::from_api_value(&self.gender),
        }
    }
}

/// Client for the randomuser.me persona endpoint.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl RandomUserClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetch one persona whose nationality matches the country, so the
    /// generated name is plausible for the address.
    pub async fn fetch_persona(&self, country: CountryCode) -> Result<Persona, UpstreamError> {
        let url = format!("{}/api/", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("nat", country.nationality())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let payload: RandomUserResponse =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidResponse {
                    service: SERVICE,
                    detail: e.to_string(),
                })?;

        let result = payload
            .results
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::InvalidResponse {
                service: SERVICE,
                detail: "empty results".to_string(),
            })?;

        let persona = result.into_persona();
        debug!(name = %persona.name, "Fetched persona");

        Ok(persona)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_into_persona() {
        let result = RandomUserResult {
            name: NameParts {
                first: "mia".to_string(),
                last: "schneider".to_string(),
            },
            gender: "female".to_string(),
        };

        let persona = result.into_persona();
        assert_eq!(persona.name, "mia schneider");
        assert_eq!(persona.gender, Gender::Female);
    }

    #[test]
    fn test_parse_response_payload() {
        let json = r#"{
            "results": [
                {
                    "gender": "male",
                    "name": {"title": "Mr", "first": "Jack", "last": "Walker"},
                    "nat": "AU"
                }
            ],
            "info": {"seed": "abc", "results": 1, "page": 1, "version": "1.4"}
        }"#;

        let payload: RandomUserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.results.len(), 1);
        let persona = payload.results.into_iter().next().unwrap().into_persona();
        assert_eq!(persona.name, "Jack Walker");
        assert_eq!(persona.gender, Gender::Male);
    }

    #[test]
    fn test_parse_empty_results() {
        let payload: RandomUserResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(payload.results.is_empty());
    }
}
