use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no credentials for profile '{profile}' (tried: {})", tried.join(", "))]
    NotFound { profile: String, tried: Vec<String> },

    #[error("cannot read credentials file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credentials file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot encode credentials: {0}")]
    Encode(#[from] toml::ser::Error),
}
