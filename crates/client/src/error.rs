use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(reqwest::Error),
    #[error("The repayment service returned HTTP {status}")]
    Api { status: u16 },
    #[error("Malformed response from the repayment service: {0}")]
    Decode(reqwest::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // Body-decode failures are the service's fault, not the network's.
        if e.is_decode() {
            ApiError::Decode(e)
        } else {
            ApiError::Network(e)
        }
    }
}
