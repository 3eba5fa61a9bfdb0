use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("a server named '{0}' already exists")]
    Conflict(String),

    #[error("region '{0}' is not accepting new servers")]
    Unavailable(String),

    #[error("no answer recorded for '{0}'")]
    MissingAnswer(String),

    #[error("sandbox storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("invalid sandbox state: {0}")]
    State(#[from] serde_json::Error),
}

pub type CloudResult<T> = Result<T, CloudError>;
