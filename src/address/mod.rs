//! Delivery address form backed by a postal-code lookup.
//!
//! Results are applied to whatever the form currently holds (last write
//! wins); a late response for an older postal code is not detected.

mod viacep;

use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::error::{OrderError, Result};
use crate::model::Address;

pub use viacep::ViaCepClient;

/// Fields returned by the lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    /// Set by the service when the postal code does not exist.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub erro: bool,
}

/// The service sends `"erro": true` or `"erro": "true"`.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

/// Postal code to address resolution.
pub trait AddressLookup {
    fn lookup(&self, postal_code: &str) -> Result<LookupResponse>;
}

/// The delivery form: looked-up street, neighborhood and city plus a typed number.
#[derive(Debug, Clone)]
pub struct DeliveryForm {
    address: Address,
    allowed_city: String,
}

impl DeliveryForm {
    pub fn new(allowed_city: impl Into<String>) -> Self {
        Self {
            address: Address::default(),
            allowed_city: allowed_city.into(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn set_postal_code(&mut self, postal_code: impl Into<String>) {
        self.address.postal_code = postal_code.into();
    }

    /// Street number is free text and never looked up.
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.address.number = number.into();
    }

    /// Look up the current postal code and fill the address on success.
    pub fn lookup(&mut self, service: &dyn AddressLookup) -> Result<&Address> {
        let postal_code = self.address.postal_code.trim().to_string();
        if postal_code.is_empty() {
            return Err(OrderError::PostalCodeMissing);
        }

        let response = match service.lookup(&postal_code) {
            Ok(response) => response,
            Err(err) => {
                warn!("Address lookup for {} failed: {}", postal_code, err);
                return Err(err);
            }
        };
        self.apply_lookup(&postal_code, response)?;
        Ok(&self.address)
    }

    /// Apply a lookup result. On rejection the address is left as it was.
    pub fn apply_lookup(&mut self, postal_code: &str, response: LookupResponse) -> Result<()> {
        if response.erro {
            warn!("Postal code {} not found", postal_code);
            return Err(OrderError::PostalCodeNotFound {
                postal_code: postal_code.to_string(),
            });
        }

        if !self.serves(&response.localidade) {
            warn!(
                "Postal code {} is in {}, outside the delivery area",
                postal_code, response.localidade
            );
            return Err(OrderError::CityNotServed {
                postal_code: postal_code.to_string(),
                locality: response.localidade,
            });
        }

        info!("Address for {}: {}, {}", postal_code, response.logradouro, response.localidade);
        self.address.street = response.logradouro;
        self.address.neighborhood = response.bairro;
        self.address.city = response.localidade;
        Ok(())
    }

    /// Case-insensitive substring match against the allowed city.
    fn serves(&self, locality: &str) -> bool {
        locality
            .to_lowercase()
            .contains(&self.allowed_city.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ALLOWED_CITY;
    use std::cell::RefCell;

    /// Returns canned responses and records requested codes.
    struct StubLookup {
        response: Result<LookupResponse>,
        calls: RefCell<Vec<String>>,
    }

    impl StubLookup {
        fn ok(locality: &str) -> Self {
            Self {
                response: Ok(LookupResponse {
                    logradouro: "Rua Amazonas".to_string(),
                    bairro: "Centro".to_string(),
                    localidade: locality.to_string(),
                    erro: false,
                }),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl AddressLookup for StubLookup {
        fn lookup(&self, postal_code: &str) -> Result<LookupResponse> {
            self.calls.borrow_mut().push(postal_code.to_string());
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(err) => Err(OrderError::AddressLookup {
                    postal_code: postal_code.to_string(),
                    message: err.to_string(),
                }),
            }
        }
    }

    fn filled_form() -> DeliveryForm {
        let mut form = DeliveryForm::new(ALLOWED_CITY);
        form.set_postal_code("15500-000");
        form.set_number("77");
        form
    }

    #[test]
    fn test_successful_lookup_fills_fields() {
        let mut form = filled_form();
        let stub = StubLookup::ok("Votuporanga");

        let address = form.lookup(&stub).unwrap();
        assert_eq!(address.street, "Rua Amazonas");
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "Votuporanga");
        assert_eq!(address.number, "77");
        assert_eq!(stub.calls.borrow().as_slice(), ["15500-000".to_string()]);
    }

    #[test]
    fn test_city_match_is_case_insensitive_substring() {
        let mut form = filled_form();
        assert!(form.lookup(&StubLookup::ok("VOTUPORANGA - SP")).is_ok());
    }

    #[test]
    fn test_other_city_leaves_fields_unchanged() {
        let mut form = filled_form();
        form.lookup(&StubLookup::ok("Votuporanga")).unwrap();
        let before = form.address().clone();

        form.set_postal_code("01001-000");
        let err = form.lookup(&StubLookup::ok("São Paulo")).unwrap_err();
        assert!(matches!(err, OrderError::CityNotServed { .. }));
        assert_eq!(form.address().street, before.street);
        assert_eq!(form.address().city, "Votuporanga");
    }

    #[test]
    fn test_not_found_flag() {
        let mut form = filled_form();
        let stub = StubLookup {
            response: Ok(LookupResponse {
                erro: true,
                ..Default::default()
            }),
            calls: RefCell::new(Vec::new()),
        };
        let err = form.lookup(&stub).unwrap_err();
        assert!(matches!(err, OrderError::PostalCodeNotFound { .. }));
        assert!(form.address().street.is_empty());
    }

    #[test]
    fn test_transport_error_leaves_fields_unchanged() {
        let mut form = filled_form();
        let stub = StubLookup {
            response: Err(OrderError::PostalCodeMissing),
            calls: RefCell::new(Vec::new()),
        };
        let err = form.lookup(&stub).unwrap_err();
        assert!(matches!(err, OrderError::AddressLookup { .. }));
        assert_eq!(form.address().street, "");
    }

    #[test]
    fn test_empty_postal_code_skips_lookup() {
        let mut form = DeliveryForm::new(ALLOWED_CITY);
        form.set_postal_code("   ");
        let stub = StubLookup::ok("Votuporanga");
        assert!(matches!(
            form.lookup(&stub),
            Err(OrderError::PostalCodeMissing)
        ));
        assert!(stub.calls.borrow().is_empty());
    }

    #[test]
    fn test_late_response_overwrites_current_fields() {
        let mut form = filled_form();
        form.set_postal_code("15503-000");
        // A response for the previous code lands after the code changed.
        form.apply_lookup(
            "15500-000",
            LookupResponse {
                logradouro: "Rua Antiga".to_string(),
                bairro: "Vila Velha".to_string(),
                localidade: "Votuporanga".to_string(),
                erro: false,
            },
        )
        .unwrap();
        assert_eq!(form.address().postal_code, "15503-000");
        assert_eq!(form.address().street, "Rua Antiga");
    }

    #[test]
    fn test_erro_flag_accepts_string() {
        let response: LookupResponse = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();
        assert!(response.erro);
        let response: LookupResponse =
            serde_json::from_str(r#"{"logradouro": "Rua A", "localidade": "Votuporanga"}"#)
                .unwrap();
        assert!(!response.erro);
    }
}
