use provider_graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] core_auth::AuthError),

    #[error("Graph error: {0}")]
    Graph(GraphError),
}

// Surface token-acquisition failures as Auth at this boundary so callers
// can distinguish the two failure kinds without digging into GraphError.
impl From<GraphError> for CoreError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Auth(inner) => CoreError::Auth(inner),
            other => CoreError::Graph(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
