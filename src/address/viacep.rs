//! ViaCEP postal-code service client.

use std::time::Duration;
use tracing::debug;

use super::{AddressLookup, LookupResponse};
use crate::error::{OrderError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for `{base_url}/{cep}/json/`.
pub struct ViaCepClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("mana-order/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// Request URL for a postal code, keeping only its digits.
    pub fn url_for(&self, postal_code: &str) -> Result<String> {
        let digits: String = postal_code.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 8 {
            return Err(OrderError::AddressLookup {
                postal_code: postal_code.to_string(),
                message: "postal code must have 8 digits".to_string(),
            });
        }
        Ok(format!("{}/{}/json/", self.base_url, digits))
    }
}

impl AddressLookup for ViaCepClient {
    fn lookup(&self, postal_code: &str) -> Result<LookupResponse> {
        let url = self.url_for(postal_code)?;
        debug!("GET {}", url);

        let failed = |message: String| OrderError::AddressLookup {
            postal_code: postal_code.to_string(),
            message,
        };

        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| failed(err.to_string()))?;

        response
            .into_json::<LookupResponse>()
            .map_err(|err| failed(format!("invalid response: {}", err)))
    }
}
