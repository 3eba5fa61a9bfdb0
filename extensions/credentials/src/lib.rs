//! API credential lookup.
//!
//! A [`CredentialManager`] walks an explicit list of [`CredentialProvider`]s
//! and reports which one answered and whether its storage is safe.

pub mod credential;
pub mod error;
pub mod manager;
pub mod provider;

pub use credential::{Credential, StorageKind};
pub use error::CredentialError;
pub use manager::{CredentialManager, Resolved};
pub use provider::{CredentialProvider, EnvProvider, FileProvider, StaticProvider};
