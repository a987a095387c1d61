use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token endpoint returned {status}: {message}")]
    TokenEndpoint { status: u16, message: String },

    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
