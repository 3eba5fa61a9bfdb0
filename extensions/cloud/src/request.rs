//! Turning a finished wizard state into an API request.

use crate::error::{CloudError, CloudResult};
use cloudwiz_core::State;
use serde::{Deserialize, Serialize};

pub const NAME_STEP: &str = "name";
pub const IMAGE_STEP: &str = "image";
pub const SIZE_STEP: &str = "size";
pub const REGION_STEP: &str = "region";
pub const SSH_KEY_STEP: &str = "ssh_key";

/// Parameters for a new server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRequest {
    pub name: String,
    pub image: String,
    pub size: String,
    pub region: String,
    #[serde(default)]
    pub ssh_key: Option<String>,
}

impl ServerRequest {
    /// Read the answers of the create-server steps.
    ///
    /// The key step is optional; every other step must have an answer.
    pub fn from_state(state: &State) -> CloudResult<Self> {
        Ok(Self {
            name: required(state, NAME_STEP)?,
            image: required(state, IMAGE_STEP)?,
            size: required(state, SIZE_STEP)?,
            region: required(state, REGION_STEP)?,
            ssh_key: answer(state, SSH_KEY_STEP),
        })
    }
}

fn answer(state: &State, step: &str) -> Option<String> {
    state
        .get_result(step)
        .and_then(|output| output.value.as_str().map(str::to_string))
}

fn required(state: &State, step: &str) -> CloudResult<String> {
    answer(state, step).ok_or_else(|| CloudError::MissingAnswer(step.to_string()))
}
