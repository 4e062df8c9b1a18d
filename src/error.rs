//! Error types for the storefront.
//!
//! Every failure here is a blocked operation: the caller shows
//! [`OrderError::user_message`] and leaves its state untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of storefront errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required selection is missing or does not belong to the item.
    Selection,
    /// Referenced item, category or slot does not exist.
    NotFound,
    /// The cart cannot be submitted as it is.
    Submission,
    /// Postal-code lookup failed or was rejected.
    Lookup,
    /// Malformed input file or configuration.
    Parse,
    /// Filesystem error.
    Io,
}

/// Main error type for storefront operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("No size selected for customizable item '{item_id}'")]
    SizeRequired { item_id: String },

    #[error("Size '{size}' is not offered by item '{item_id}'")]
    UnknownSize { item_id: String, size: String },

    #[error("Topping '{topping}' is not offered by item '{item_id}'")]
    UnknownTopping { item_id: String, topping: String },

    #[error("Add-on '{addon}' is not offered by item '{item_id}'")]
    UnknownAddon { item_id: String, addon: String },

    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: String },

    #[error("Category not found: {category}")]
    UnknownCategory { category: String },

    #[error("Cannot submit an empty cart")]
    EmptyCart,

    #[error("No time slots left for today")]
    NoSlotsAvailable,

    #[error("Time slot {slot} is not available")]
    SlotUnavailable { slot: String },

    #[error("Invalid time '{value}': expected {expected}")]
    InvalidTime { value: String, expected: String },

    #[error("Postal code is empty")]
    PostalCodeMissing,

    #[error("Postal code {postal_code} not found")]
    PostalCodeNotFound { postal_code: String },

    #[error("Postal code {postal_code} is outside the delivery area (locality: {locality})")]
    CityNotServed {
        postal_code: String,
        locality: String,
    },

    #[error("Address lookup failed for {postal_code}: {message}")]
    AddressLookup {
        postal_code: String,
        message: String,
    },

    #[error("Catalog validation failed: {message}")]
    InvalidCatalog { message: String },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrderError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::SizeRequired { .. }
            | OrderError::UnknownSize { .. }
            | OrderError::UnknownTopping { .. }
            | OrderError::UnknownAddon { .. } => ErrorCode::Selection,
            OrderError::ItemNotFound { .. }
            | OrderError::UnknownCategory { .. }
            | OrderError::SlotUnavailable { .. } => ErrorCode::NotFound,
            OrderError::EmptyCart | OrderError::NoSlotsAvailable => ErrorCode::Submission,
            OrderError::PostalCodeMissing
            | OrderError::PostalCodeNotFound { .. }
            | OrderError::CityNotServed { .. }
            | OrderError::AddressLookup { .. } => ErrorCode::Lookup,
            OrderError::InvalidTime { .. }
            | OrderError::InvalidCatalog { .. }
            | OrderError::Json { .. }
            | OrderError::Config { .. } => ErrorCode::Parse,
            OrderError::Io(_) => ErrorCode::Io,
        }
    }

    /// Message shown to the customer when the operation is blocked.
    pub fn user_message(&self) -> String {
        match self {
            OrderError::SizeRequired { .. } => {
                "Por favor, selecione um tamanho para o açaí.".to_string()
            }
            OrderError::EmptyCart => "Adicione itens ao pedido antes de finalizar.".to_string(),
            OrderError::NoSlotsAvailable => "Não há mais horários disponíveis para hoje. \
                Por favor, tente novamente amanhã durante nosso horário de funcionamento."
                .to_string(),
            OrderError::CityNotServed { .. } | OrderError::PostalCodeNotFound { .. } => {
                "O CEP fornecido não é válido ou não pertence à área de entrega.".to_string()
            }
            OrderError::AddressLookup { .. } | OrderError::PostalCodeMissing => {
                "Erro ao buscar o endereço. Tente novamente.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = OrderError::SizeRequired {
            item_id: "acai-custom".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::Selection);
        assert_eq!(OrderError::EmptyCart.code(), ErrorCode::Submission);
        assert_eq!(OrderError::PostalCodeMissing.code(), ErrorCode::Lookup);
    }

    #[test]
    fn test_user_message_for_missing_size() {
        let err = OrderError::SizeRequired {
            item_id: "acai-custom".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Por favor, selecione um tamanho para o açaí."
        );
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = OrderError::ItemNotFound {
            item_id: "x9".to_string(),
        };
        assert_eq!(err.user_message(), "Item not found: x9");
    }
}
