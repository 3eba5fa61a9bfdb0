//! Command handlers.
//!
//! Handlers return a [`Report`] and leave printing to `main`, so they can be
//! driven by a scripted prompter in tests.

use crate::flows;
use anyhow::{Context as _, Result, bail};
use cloudwiz_cloud::{CloudProvider, Server, ServerRequest};
use cloudwiz_core::{AbortReason, Context, Flow, FlowOutcome, Navigator, Outcome, Timeline, ValidationError};
use cloudwiz_credentials::{Credential, FileProvider};
use cloudwiz_std::Prompter;
use std::path::PathBuf;
use std::sync::Arc;

/// What a command did.
#[derive(Debug)]
pub enum Report {
    Created(Server),
    Deleted(Server),
    Listed(Vec<Server>),
    LoggedIn { profile: String, path: PathBuf },
    Aborted(AbortReason),
}

/// Shows rejected answers under the prompt.
pub struct ConsoleNotifier {
    prompter: Arc<dyn Prompter>,
}

impl ConsoleNotifier {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self { prompter }
    }
}

impl cloudwiz_core::Notifier for ConsoleNotifier {
    fn validation_failed(&self, step: &str, error: &ValidationError) {
        tracing::debug!(step, message = %error, "Answer rejected");
        self.prompter.notify(&format!("  {}", error));
    }
}

pub struct App {
    pub provider: Arc<dyn CloudProvider>,
    pub prompter: Arc<dyn Prompter>,
    pub navigator: Navigator,
}

impl App {
    pub fn new(provider: Arc<dyn CloudProvider>, prompter: Arc<dyn Prompter>) -> Self {
        let navigator = Navigator::new().with_notifier(ConsoleNotifier::new(prompter.clone()));
        Self {
            provider,
            prompter,
            navigator,
        }
    }

    /// Run `flow` and log its timeline at debug level, failed runs included.
    pub async fn navigate(&self, flow: &mut Flow, ctx: &Context) -> Result<(FlowOutcome, Timeline)> {
        let mut timeline = Timeline::new();
        let result = self.navigator.run_with_timeline(flow, ctx, &mut timeline).await;
        tracing::debug!(
            flow = flow.name(),
            timeline = %serde_json::to_string(&timeline)?,
            "Navigation"
        );
        Ok((result?, timeline))
    }

    pub async fn create(&self, ctx: &Context) -> Result<Report> {
        let taken = self
            .provider
            .list_servers()
            .await
            .context("Failed to list existing servers")?
            .into_iter()
            .map(|s| s.name)
            .collect();

        let mut flow = flows::create_server(self.provider.clone(), self.prompter.clone(), taken);
        match self.navigate(&mut flow, ctx).await?.0 {
            FlowOutcome::Aborted(reason) => Ok(Report::Aborted(reason)),
            FlowOutcome::Completed(_) => {
                let request = ServerRequest::from_state(flow.state())?;
                let server = self
                    .provider
                    .create_server(&request)
                    .await
                    .with_context(|| format!("Failed to create server '{}'", request.name))?;
                Ok(Report::Created(server))
            }
        }
    }

    pub async fn list(&self) -> Result<Report> {
        let servers = self.provider.list_servers().await.context("Failed to list servers")?;
        Ok(Report::Listed(servers))
    }

    pub async fn delete(&self, ctx: &Context, id: Option<&str>) -> Result<Report> {
        let preselected = match id {
            Some(id) => {
                let servers = self.provider.list_servers().await.context("Failed to list servers")?;
                match servers.into_iter().find(|s| s.id == id) {
                    Some(server) => Some(server),
                    None => bail!("No server with id '{}'", id),
                }
            }
            None => None,
        };

        let mut flow = flows::delete_server(self.provider.clone(), self.prompter.clone(), preselected.as_ref())?;
        match self.navigate(&mut flow, ctx).await?.0 {
            FlowOutcome::Aborted(reason) => Ok(Report::Aborted(reason)),
            FlowOutcome::Completed(_) => {
                let id = flow
                    .state()
                    .get_result(flows::SERVER_STEP)
                    .and_then(|output| output.value.as_id().map(str::to_string))
                    .context("No server was chosen")?;
                let server = self
                    .provider
                    .delete_server(&id)
                    .await
                    .with_context(|| format!("Failed to delete server '{}'", id))?;
                Ok(Report::Deleted(server))
            }
        }
    }

    /// Save a token for `profile`, asking for it when not given.
    pub async fn login(
        &self,
        ctx: &Context,
        store: &FileProvider,
        profile: &str,
        token: Option<String>,
    ) -> Result<Report> {
        let token = match token {
            Some(token) => token,
            None => match self.prompter.input(ctx, "API token", None).await.into_signal() {
                Ok(token) => token,
                Err(Outcome::Fault(error)) => return Err(error),
                Err(Outcome::Interrupted) => return Ok(Report::Aborted(AbortReason::Interrupted)),
                Err(Outcome::Back | Outcome::Cancel) => return Ok(Report::Aborted(AbortReason::Cancelled)),
                Err(Outcome::Empty) => return Ok(Report::Aborted(AbortReason::EmptyState)),
                Err(Outcome::Next(_)) => bail!("The token prompt returned an answer as a signal"),
            },
        };
        if token.trim().is_empty() {
            bail!("The API token cannot be empty");
        }
        store.store(profile, &Credential::new(token.trim()))?;
        Ok(Report::LoggedIn {
            profile: profile.to_string(),
            path: store.path().to_path_buf(),
        })
    }
}

/// Fixed-width server table.
pub fn render_servers(servers: &[Server]) -> String {
    if servers.is_empty() {
        return "You have no servers. Create one with `cloudwiz create`.".to_string();
    }
    let rows: Vec<[String; 5]> = servers
        .iter()
        .map(|s| {
            [
                s.id.clone(),
                s.name.clone(),
                s.status.to_string(),
                s.region.clone(),
                s.size.clone(),
            ]
        })
        .collect();
    let header = ["ID", "NAME", "STATUS", "REGION", "SIZE"];

    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&header)];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(line(&cells));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudwiz_cloud::{Catalog, SandboxCloud, ServerStatus};
    use cloudwiz_credentials::CredentialProvider;
    use cloudwiz_test::{Input, ScriptedPrompter};

    fn app(inputs: Vec<Input>) -> (App, Arc<ScriptedPrompter>, Arc<SandboxCloud>) {
        let cloud = Arc::new(SandboxCloud::new(Catalog::builtin().unwrap()));
        let prompter = Arc::new(ScriptedPrompter::new(inputs));
        (App::new(cloud.clone(), prompter.clone()), prompter, cloud)
    }

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    #[tokio::test]
    async fn test_create_walks_every_step() {
        let (app, prompter, cloud) = app(vec![
            text("web-01"),
            Input::Pick(1),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Yes,
        ]);

        let server = match app.create(&Context::new()).await.unwrap() {
            Report::Created(server) => server,
            other => panic!("unexpected report: {:?}", other),
        };
        assert_eq!(server.name, "web-01");
        assert_eq!(server.image, "ubuntu-24-04-x64");
        assert_eq!(server.region, "ams3");
        assert_eq!(server.ssh_key.as_deref(), Some("41920"));
        assert_eq!(cloud.list_servers().await.unwrap().len(), 1);
        assert_eq!(prompter.remaining(), 0);

        let summary = prompter.notices().join("\n");
        assert!(summary.contains("Ubuntu 24.04 LTS"), "{}", summary);
        assert!(summary.contains("web-01"), "{}", summary);
    }

    #[tokio::test]
    async fn test_back_from_confirm_changes_the_key_step() {
        let (app, prompter, _cloud) = app(vec![
            text("web-01"),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(1),
            Input::Pick(0),
            Input::Back,
            Input::Back,
            Input::Pick(2),
            Input::Pick(0),
            Input::Yes,
        ]);

        let Report::Created(server) = app.create(&Context::new()).await.unwrap() else {
            panic!("expected a created server");
        };
        assert_eq!(server.region, "sgp1");

        // Region was re-asked with the earlier pick as default.
        let asked = prompter.asked();
        let region_asks: Vec<_> = asked.iter().filter(|a| a.label == "Region").collect();
        assert_eq!(region_asks.len(), 2);
        assert_eq!(region_asks[1].default.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_asked_again() {
        let (app, prompter, cloud) = app(vec![
            text("db"),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Yes,
        ]);
        app.create(&Context::new()).await.unwrap();

        for input in [
            text("db"),
            text("db-2"),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Yes,
        ] {
            prompter.push(input);
        }
        let report = app.create(&Context::new()).await.unwrap();
        assert!(matches!(report, Report::Created(ref s) if s.name == "db-2"));
        assert!(
            prompter
                .notices()
                .iter()
                .any(|n| n.contains("A server named 'db' already exists."))
        );
        assert_eq!(cloud.list_servers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_declining_confirmation_creates_nothing() {
        let (app, _prompter, cloud) = app(vec![
            text("web-01"),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::No,
        ]);
        let report = app.create(&Context::new()).await.unwrap();
        assert!(matches!(report, Report::Aborted(AbortReason::Cancelled)));
        assert!(cloud.list_servers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_servers_is_empty_state() {
        let (app, prompter, _cloud) = app(vec![]);
        let report = app.delete(&Context::new(), None).await.unwrap();
        assert!(matches!(report, Report::Aborted(AbortReason::EmptyState)));
        assert_eq!(prompter.notices(), vec!["You have no servers.".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_by_id_starts_at_confirmation() {
        let (app, prompter, cloud) = app(vec![]);
        let server = cloud
            .create_server(&ServerRequest {
                name: "old".into(),
                image: "debian-12-x64".into(),
                size: "s-1vcpu-1gb".into(),
                region: "fra1".into(),
                ssh_key: None,
            })
            .await
            .unwrap();

        prompter.push(Input::Yes);
        let report = app.delete(&Context::new(), Some(&server.id)).await.unwrap();
        assert!(matches!(report, Report::Deleted(ref s) if s.id == server.id));
        assert_eq!(prompter.asked().len(), 1);
        assert!(prompter.notices()[0].contains("old"));
        assert!(cloud.list_servers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let (app, _prompter, _cloud) = app(vec![]);
        let error = app.delete(&Context::new(), Some("missing")).await.unwrap_err();
        assert!(error.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_interrupted_context_aborts_create() {
        let (app, _prompter, _cloud) = app(vec![text("web-01")]);
        let ctx = Context::new();
        ctx.cancel();
        let report = app.create(&ctx).await.unwrap();
        assert!(matches!(report, Report::Aborted(AbortReason::Interrupted)));
    }

    #[tokio::test]
    async fn test_login_stores_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProvider::new(dir.path().join("creds.toml"));
        let (app, _prompter, _cloud) = app(vec![text(" tok-123 ")]);

        let report = app.login(&Context::new(), &store, "ci", None).await.unwrap();
        assert!(matches!(report, Report::LoggedIn { ref profile, .. } if profile == "ci"));
        assert_eq!(store.fetch("ci").unwrap().map(|c| c.token().to_string()), Some("tok-123".into()));
    }

    #[tokio::test]
    async fn test_navigate_returns_the_timeline() {
        let (app, prompter, cloud) = app(vec![
            text("web-01"),
            Input::Pick(0),
            Input::Back,
            Input::Pick(2),
            Input::Pick(0),
            Input::Pick(0),
            Input::Pick(0),
            Input::Yes,
        ]);
        let mut flow = flows::create_server(cloud.clone(), prompter.clone(), Vec::new());

        let (outcome, timeline) = app.navigate(&mut flow, &Context::new()).await.unwrap();

        assert!(matches!(outcome, FlowOutcome::Completed(_)));
        assert_eq!(timeline.count_rewinds(), 1);
        assert_eq!(
            timeline.entered(),
            vec!["name", "image", "size", "image", "size", "region", "ssh_key", "confirm"]
        );
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn test_navigate_propagates_step_failures() {
        let (app, prompter, cloud) = app(vec![text("web-01"), Input::Yes]);
        let mut flow = flows::create_server(cloud.clone(), prompter.clone(), Vec::new());

        let error = app.navigate(&mut flow, &Context::new()).await.unwrap_err();
        assert!(error.to_string().contains("step 'image' failed"), "{}", error);
    }

    #[tokio::test]
    async fn test_login_prompt_signals_abort() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProvider::new(dir.path().join("creds.toml"));

        let (backed, _prompter, _cloud) = app(vec![Input::Back]);
        let report = backed.login(&Context::new(), &store, "default", None).await.unwrap();
        assert!(matches!(report, Report::Aborted(AbortReason::Cancelled)));

        let (interrupted, _prompter, _cloud) = app(vec![Input::Interrupt]);
        let report = interrupted.login(&Context::new(), &store, "default", None).await.unwrap();
        assert!(matches!(report, Report::Aborted(AbortReason::Interrupted)));
        assert!(!dir.path().join("creds.toml").exists());
    }

    #[test]
    fn test_render_servers_table() {
        let server = Server {
            id: "1f2e".into(),
            name: "web-01".into(),
            image: "debian-12-x64".into(),
            size: "s-1vcpu-1gb".into(),
            region: "ams3".into(),
            ssh_key: None,
            status: ServerStatus::Active,
            created_at: chrono::Utc::now(),
        };
        let table = render_servers(&[server]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID    NAME    STATUS  REGION  SIZE");
        assert_eq!(lines[1], "1f2e  web-01  active  ams3    s-1vcpu-1gb");
        assert!(render_servers(&[]).contains("no servers"));
    }
}
