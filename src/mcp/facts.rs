//! Random fact source backing the `get_random_fact` tool

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const NO_FACT_IN_RESPONSE: &str = "Could not extract fact from API response.";
pub const FACT_SERVICE_UNREACHABLE: &str = "Could not connect to the random fact service.";

#[derive(Debug, Error)]
pub enum FactError {
    #[error("Fact API returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Deserialize)]
struct FactBody {
    #[serde(default)]
    text: Option<String>,
}

/// Fetches facts from a uselessfacts-compatible API
#[derive(Clone)]
pub struct FactSource {
    client: reqwest::Client,
    url: String,
}

impl FactSource {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Fetch one fact
    ///
    /// Transport failures and bodies without a `text` field degrade to fixed
    /// messages; an upstream error status is reported as an error.
    pub async fn random_fact(&self) -> Result<String, FactError> {
        let response = match self.client.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Error requesting the fact API: {}", e);
                return Ok(FACT_SERVICE_UNREACHABLE.to_string());
            }
        };

        if !response.status().is_success() {
            return Err(FactError::Status(response.status()));
        }

        match response.json::<FactBody>().await {
            Ok(FactBody { text: Some(text) }) => Ok(text),
            Ok(FactBody { text: None }) => Ok(NO_FACT_IN_RESPONSE.to_string()),
            Err(e) => {
                tracing::warn!("Fact API body was not JSON: {}", e);
                Ok(NO_FACT_IN_RESPONSE.to_string())
            }
        }
    }
}
