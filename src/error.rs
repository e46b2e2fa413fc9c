use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlinkistError {
    #[error("Request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("Blocked by an anti-bot challenge: {url}")]
    Challenge { url: String },
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to tag audio file: {0}")]
    Tagging(#[from] mp4ameta::Error),
    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = anyhow::Result<T, BlinkistError>;
