use cloudwiz_core::prelude::*;
use cloudwiz_std::prelude::*;
use cloudwiz_test::{FailingLister, Input, ScriptedPrompter, assert_aborted, assert_completed, history_values};
use std::sync::Arc;
use std::time::Duration;

fn text(s: &str) -> Input {
    Input::Text(s.to_string())
}

fn regions() -> Arc<dyn ResourceLister> {
    Arc::new(StaticLister::new(vec![
        Choice::new("ams3", "Amsterdam 3"),
        Choice::new("fra1", "Frankfurt 1"),
        Choice::new("sgp1", "Singapore 1").with_detail("APAC"),
    ]))
}

#[tokio::test]
async fn test_text_rule_reprompts_inside_the_step() {
    let prompter = Arc::new(ScriptedPrompter::new([text("Web_01"), text("web-01")]));
    let step = TextStep::new("name", "Server name", prompter.clone()).with_rule(server_name_rule);

    let outcome = step.execute(&Context::new(), &State::new()).await;

    match outcome {
        Outcome::Next(output) => {
            assert_eq!(output.value, StepValue::from("web-01"));
            assert_eq!(output.meta("label"), Some("web-01"));
        }
        other => panic!("unexpected outcome: {:?}", other.kind()),
    }
    assert_eq!(prompter.asked().len(), 2);
    assert_eq!(prompter.notices(), vec!["  Use only lowercase letters, digits and '-'.".to_string()]);
}

#[tokio::test]
async fn test_text_offers_previous_answer_after_rewind() {
    let prompter = Arc::new(ScriptedPrompter::new([
        text("web-01"),
        Input::Back,
        Input::Default,
        Input::Yes,
    ]));
    let mut flow = Flow::new("create")
        .then(TextStep::new("name", "Server name", prompter.clone()).with_default("server-1"))
        .then(ConfirmStep::new("confirm", "Create?", prompter.clone()).show("name", "Name"));

    let result = Navigator::new().run(&mut flow, &Context::new()).await;

    assert_completed!(result, true);
    assert_eq!(history_values(flow.state()), vec!["web-01", "yes"]);
    let asked = prompter.asked();
    assert_eq!(asked[0].default.as_deref(), Some("server-1"));
    assert_eq!(asked[2].default.as_deref(), Some("web-01"));
}

#[tokio::test]
async fn test_select_records_id_with_label() {
    let prompter = Arc::new(ScriptedPrompter::new([Input::Pick(2)]));
    let step = SelectStep::new("region", "Region", regions(), prompter.clone());

    let Outcome::Next(output) = step.execute(&Context::new(), &State::new()).await else {
        panic!("expected an answer");
    };
    assert_eq!(output.value, StepValue::id("sgp1"));
    assert_eq!(output.label(), "Singapore 1");
    assert_eq!(output.meta("detail"), Some("APAC"));
    assert_eq!(prompter.asked()[0].choices, vec!["ams3", "fra1", "sgp1"]);
}

#[tokio::test]
async fn test_select_defaults_to_previous_choice() {
    let prompter = Arc::new(ScriptedPrompter::new([Input::Pick(1), Input::Back, Input::Default, Input::Yes]));
    let mut flow = Flow::new("create")
        .then(SelectStep::new("region", "Region", regions(), prompter.clone()))
        .then(ConfirmStep::new("confirm", "Create?", prompter.clone()));

    let result = Navigator::new().run(&mut flow, &Context::new()).await;

    assert_completed!(result, true);
    assert_eq!(
        flow.state().get_result("region").map(|o| o.value),
        Some(StepValue::id("fra1"))
    );
    assert_eq!(prompter.asked()[2].default.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_empty_listing_explains_and_ends_the_flow() {
    let prompter = Arc::new(ScriptedPrompter::new([text("web-01")]));
    let mut flow = Flow::new("create")
        .then(TextStep::new("name", "Server name", prompter.clone()))
        .then(
            SelectStep::new("ssh_key", "SSH key", Arc::new(StaticLister::default()), prompter.clone())
                .with_empty_message("No SSH keys found."),
        );

    let result = Navigator::new().run(&mut flow, &Context::new()).await;

    assert_aborted!(result, EmptyState);
    assert_eq!(prompter.notices(), vec!["No SSH keys found.".to_string()]);
    assert_eq!(prompter.asked().len(), 1);
}

#[tokio::test]
async fn test_listing_failure_is_a_step_fault() {
    let prompter = Arc::new(ScriptedPrompter::new([]));
    let mut flow = Flow::new("create").then(SelectStep::new(
        "image",
        "Image",
        Arc::new(FailingLister::new("connection refused")),
        prompter,
    ));

    let error = Navigator::new()
        .run(&mut flow, &Context::new())
        .await
        .unwrap_err();

    assert_eq!(error.step(), Some("image"));
    let chain = format!("{:#}", anyhow::Error::new(error));
    assert!(chain.contains("could not list image"), "{}", chain);
    assert!(chain.contains("connection refused"), "{}", chain);
}

#[tokio::test]
async fn test_check_rejection_reasks_through_navigator() {
    let prompter = Arc::new(ScriptedPrompter::new([Input::Pick(0), Input::Pick(1)]));
    let step = SelectStep::new("region", "Region", regions(), prompter.clone()).with_check(|output, _| {
        match output.value.as_id() {
            Some("ams3") => Err(ValidationError::new("Amsterdam is full.")),
            _ => Ok(()),
        }
    });
    let rejected = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = rejected.clone();
    let navigator = Navigator::new().with_notifier(move |_step: &str, error: &ValidationError| {
        sink.lock().push(error.to_string());
    });
    let mut flow = Flow::new("create").then(step);

    let result = navigator.run(&mut flow, &Context::new()).await;

    assert_completed!(result, StepValue::id("fra1"));
    assert_eq!(*rejected.lock(), vec!["Amsterdam is full.".to_string()]);
}

#[tokio::test]
async fn test_confirm_no_cancels_after_summary() {
    let prompter = Arc::new(ScriptedPrompter::new([text("web-01"), Input::Pick(0), Input::No]));
    let mut flow = Flow::new("create")
        .then(TextStep::new("name", "Server name", prompter.clone()))
        .then(SelectStep::new("region", "Region", regions(), prompter.clone()))
        .then(
            ConfirmStep::new("confirm", "Create?", prompter.clone())
                .show("name", "Name")
                .show("region", "Region")
                .show("size", "Size"),
        );

    let result = Navigator::new().run(&mut flow, &Context::new()).await;

    assert_aborted!(result, Cancelled);
    assert_eq!(
        prompter.notices(),
        vec!["  Name:    web-01\n  Region:  Amsterdam 3\n  Size:    (not set)".to_string()]
    );
}

#[tokio::test]
async fn test_back_from_first_prompt_cancels() {
    let prompter = Arc::new(ScriptedPrompter::new([Input::Back]));
    let mut flow = Flow::new("create").then(TextStep::new("name", "Server name", prompter));
    assert_aborted!(Navigator::new().run(&mut flow, &Context::new()).await, Cancelled);
}

struct StalledLister;

#[async_trait]
impl ResourceLister for StalledLister {
    async fn list(&self, _ctx: &Context) -> anyhow::Result<Vec<Choice>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_while_listing_interrupts() {
    let prompter = Arc::new(ScriptedPrompter::new([]));
    let mut flow = Flow::new("create").then(SelectStep::new(
        "image",
        "Image",
        Arc::new(StalledLister),
        prompter.clone(),
    ));
    let ctx = Context::new();
    ctx.cancel_after(Duration::from_secs(1));

    let result = Navigator::new().run(&mut flow, &ctx).await;

    assert_aborted!(result, Interrupted);
    assert!(prompter.asked().is_empty());
    assert!(flow.state().is_empty());
}

#[tokio::test]
async fn test_summary_aligns_non_ascii_captions() {
    let prompter = Arc::new(ScriptedPrompter::new([]));
    let confirm = ConfirmStep::new("confirm", "Create?", prompter)
        .show("region", "Région")
        .show("name", "Name");
    let mut state = State::new();
    state
        .add_result("region", Choice::new("fra1", "Frankfurt 1").to_output())
        .unwrap();

    assert_eq!(
        confirm.summary(&state),
        vec!["  Région:  Frankfurt 1".to_string(), "  Name:    (not set)".to_string()]
    );
}
