use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Product {product_id} is not in the cart")]
    ProductNotFound { product_id: ProductId },

    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    #[error("Amount {amount} is not valid for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CartError {
    /// Transport faults, timeouts and 5xx responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            CartError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CartError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::Http(_) | CartError::UnexpectedStatus { .. } => {
                "Could not reach the shop API".to_string()
            }
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retry_classification() {
        let server_side = CartError::UnexpectedStatus {
            url: "http://shop/stock/1".to_string(),
            status: 503,
        };
        let not_found = CartError::UnexpectedStatus {
            url: "http://shop/stock/1".to_string(),
            status: 404,
        };

        assert!(server_side.is_retryable());
        assert!(!not_found.is_retryable());
        assert!(!CartError::ProductNotFound {
            product_id: ProductId(3)
        }
        .is_retryable());
    }

    #[test]
    fn test_config_errors_are_prefixed() {
        let err = CartError::InvalidConfigValueError {
            field: "api_endpoint".to_string(),
            value: "nope".to_string(),
            reason: "Invalid URL format".to_string(),
        };
        assert!(err
            .user_friendly_message()
            .starts_with("Invalid configuration:"));
    }
}
