use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Network(String),
    #[error("translation service returned status {status}: {details}")]
    Status { status: u16, details: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("translation API returned no result")]
    NoResult,
    #[error("translation provider is not configured")]
    ProviderNotConfigured,
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<serde_json::Error> for TranslateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

impl From<url::ParseError> for TranslateError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidEndpoint(e.to_string())
    }
}
