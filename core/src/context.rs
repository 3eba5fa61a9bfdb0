use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Cooperative cancellation handed to every step.
///
/// Cloning a `Context` shares the underlying token. The engine has no
/// timeout of its own; callers layer one on with [`Context::cancel_after`].
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context cancelled together with this one, but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Cancel this context once `timeout` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn cancel_after(&self, timeout: Duration) {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    tracing::debug!(?timeout, "Context deadline reached");
                    token.cancel();
                }
                _ = token.cancelled() => {}
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_follows_parent() {
        let parent = Context::new();
        let child = parent.child();
        assert!(!child.is_cancelled());
        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_child_cancel_leaves_parent() {
        let parent = Context::new();
        let child = parent.child();
        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_deadline() {
        let ctx = Context::new();
        ctx.cancel_after(Duration::from_secs(30));
        assert!(!ctx.is_cancelled());
        tokio::time::timeout(Duration::from_secs(60), ctx.cancelled())
            .await
            .unwrap();
        assert!(ctx.is_cancelled());
    }
}
