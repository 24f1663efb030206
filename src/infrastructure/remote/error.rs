use crate::shared::error::AppError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Remote rejected the request: {status} - {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

/// Status-class mapping onto the engine taxonomy. 4xx request-shape and
/// permission rejections become the fatal variants; everything else is a
/// transient network failure.
impl From<HttpClientError> for AppError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Rejected { status, body } => {
                let message = format!("{status} - {body}");
                match status {
                    StatusCode::BAD_REQUEST => AppError::InvalidInput(message),
                    StatusCode::UNAUTHORIZED => AppError::Auth(message),
                    StatusCode::FORBIDDEN => AppError::Unauthorized(message),
                    StatusCode::NOT_FOUND => AppError::NotFound(message),
                    _ => AppError::Network(message),
                }
            }
            HttpClientError::Transport(err) => AppError::Network(err.to_string()),
            HttpClientError::Decode(message) => AppError::DeserializationError(message),
        }
    }
}

pub async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, HttpClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(HttpClientError::Rejected { status, body })
}
