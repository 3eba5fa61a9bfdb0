//! The wizards behind each command.

use cloudwiz_cloud::{
    CloudProvider, IMAGE_STEP, NAME_STEP, ProviderLister, REGION_STEP, SIZE_STEP, SSH_KEY_STEP, Server,
};
use cloudwiz_core::{Flow, State, StateError, ValidationError};
use cloudwiz_std::{Choice, ConfirmStep, Prompter, SelectStep, TextStep, server_name_rule};
use std::sync::Arc;

pub const CREATE_FLOW: &str = "create-server";
pub const DELETE_FLOW: &str = "delete-server";
pub const SERVER_STEP: &str = "server";
pub const CONFIRM_STEP: &str = "confirm";

/// name, image, size, region, ssh key, confirm.
///
/// Names in `taken` are rejected before the flow moves on.
pub fn create_server(provider: Arc<dyn CloudProvider>, prompter: Arc<dyn Prompter>, taken: Vec<String>) -> Flow {
    let name = TextStep::new(NAME_STEP, "Server name", prompter.clone())
        .with_rule(server_name_rule)
        .with_check(move |output, _state| match output.value.as_text() {
            Some(name) if taken.iter().any(|t| t == name) => Err(ValidationError::new(format!(
                "A server named '{}' already exists.",
                name
            ))),
            _ => Ok(()),
        });

    let select = |step: &str, prompt: &str, lister: ProviderLister, empty: &str| {
        SelectStep::new(step, prompt, Arc::new(lister), prompter.clone()).with_empty_message(empty)
    };

    Flow::new(CREATE_FLOW)
        .then(name)
        .then(select(
            IMAGE_STEP,
            "Image",
            ProviderLister::images(provider.clone()),
            "No images are available.",
        ))
        .then(select(
            SIZE_STEP,
            "Size",
            ProviderLister::sizes(provider.clone()),
            "No sizes are available.",
        ))
        .then(select(
            REGION_STEP,
            "Region",
            ProviderLister::regions(provider.clone()),
            "No regions are accepting new servers.",
        ))
        .then(select(
            SSH_KEY_STEP,
            "SSH key",
            ProviderLister::ssh_keys(provider),
            "No SSH keys found. Add one to your account and try again.",
        ))
        .then(
            ConfirmStep::new(CONFIRM_STEP, "Create this server?", prompter.clone())
                .show(NAME_STEP, "Name")
                .show(IMAGE_STEP, "Image")
                .show(SIZE_STEP, "Size")
                .show(REGION_STEP, "Region")
                .show(SSH_KEY_STEP, "SSH key"),
        )
}

/// server, confirm. A `preselected` server skips straight to the confirmation;
/// going back from there offers the full list with it as the default.
pub fn delete_server(
    provider: Arc<dyn CloudProvider>,
    prompter: Arc<dyn Prompter>,
    preselected: Option<&Server>,
) -> Result<Flow, StateError> {
    let state = match preselected {
        Some(server) => {
            let mut state = State::new();
            state.add_result(SERVER_STEP, server_choice(server).to_output())?;
            state
        }
        None => State::new(),
    };

    Ok(Flow::with_state(DELETE_FLOW, state)
        .then(
            SelectStep::new(
                SERVER_STEP,
                "Server to delete",
                Arc::new(ProviderLister::servers(provider)),
                prompter.clone(),
            )
            .with_empty_message("You have no servers."),
        )
        .then(
            ConfirmStep::new(CONFIRM_STEP, "Delete this server?", prompter)
                .with_default(false)
                .show(SERVER_STEP, "Server"),
        ))
}

fn server_choice(server: &Server) -> Choice {
    Choice::new(&server.id, &server.name).with_detail(format!("{}, {}, {}", server.status, server.region, server.size))
}
