use thiserror::Error;

/// Typed failures from the upstream lyrics and generation services.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {status} - {body}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No lyrics container found on {0}")]
    MissingLyricsContainer(String),

    #[error("Lyrics container on {0} contained no text")]
    EmptyLyrics(String),

    #[error("Completion response contained no choices")]
    EmptyCompletion,

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Build a `Status` error from a non-success blocking response.
    pub fn from_response(endpoint: &str, response: reqwest::blocking::Response) -> Self {
        let status = response.status();
        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
            body,
        }
    }
}
