//! Cloud provider contract for the cloudwiz wizard.
//!
//! [`CloudProvider`] is what the commands talk to. [`SandboxCloud`] serves a
//! static [`Catalog`] and keeps created servers in memory or a JSON file, so
//! the wizard can be exercised without an account.

pub mod catalog;
pub mod error;
pub mod lister;
pub mod provider;
pub mod request;
pub mod sandbox;
pub mod types;

pub use catalog::Catalog;
pub use error::{CloudError, CloudResult};
pub use lister::ProviderLister;
pub use provider::CloudProvider;
pub use request::{IMAGE_STEP, NAME_STEP, REGION_STEP, SIZE_STEP, SSH_KEY_STEP, ServerRequest};
pub use sandbox::SandboxCloud;
pub use types::{Image, Region, Server, ServerStatus, Size, SshKey};
