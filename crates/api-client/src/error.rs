use configuration::error::ConfigError;
use thiserror::Error;

/// Binance codes that mean the key, secret or signature was not accepted.
const AUTH_ERROR_CODES: [i32; 3] = [-1022, -2014, -2015];

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never got an HTTP response: DNS, connect, TLS or timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed (code {code}): {message}")]
    Authentication { code: i32, message: String },

    #[error("Request rejected by exchange (code {code}): {message}")]
    Rejected { code: i32, message: String },

    /// The client refused to build the request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Client configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl ApiError {
    /// Classifies an error body returned by the exchange.
    pub fn from_exchange(http_status: u16, code: i32, message: String) -> Self {
        if http_status == 401 || AUTH_ERROR_CODES.contains(&code) {
            ApiError::Authentication { code, message }
        } else {
            ApiError::Rejected { code, message }
        }
    }

    /// The exchange error code, when the exchange produced one.
    pub fn code(&self) -> Option<i32> {
        match self {
            ApiError::Authentication { code, .. } | ApiError::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_auth_codes_and_http_401() {
        assert!(matches!(
            ApiError::from_exchange(400, -2015, "Invalid API-key".into()),
            ApiError::Authentication { code: -2015, .. }
        ));
        assert!(matches!(
            ApiError::from_exchange(401, -1000, "Unauthorized".into()),
            ApiError::Authentication { .. }
        ));
        let rejected = ApiError::from_exchange(400, -2019, "Margin is insufficient.".into());
        assert!(matches!(rejected, ApiError::Rejected { .. }));
        assert_eq!(rejected.code(), Some(-2019));
        assert_eq!(
            rejected.to_string(),
            "Request rejected by exchange (code -2019): Margin is insufficient."
        );
    }
}
