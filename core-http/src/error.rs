use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("response decoding failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, HttpError>;
