//! Routes named deployment actions to their collaborators and blocks every
//! later action once one of them fails.

mod gate;
mod types;

use tokio::sync::Mutex;

use crate::action::Action;
use crate::services::Services;

pub use gate::GateState;
pub use types::{CallResult, BLOCKED_MESSAGE, SUCCESS_MESSAGE};

pub struct ActionProxy {
    services: Services,
    // Held across dispatch so concurrent callers are serialized behind the latch.
    gate: Mutex<GateState>,
}

impl ActionProxy {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            gate: Mutex::new(GateState::Open),
        }
    }

    /// Runs `action` with `args` unless an earlier action has failed.
    ///
    /// Never returns an error: handler failures, handler errors and unknown
    /// action names all become a failed `CallResult` and close the gate.
    pub async fn call(&self, action: &str, args: &[String]) -> CallResult {
        let mut gate = self.gate.lock().await;
        if gate.is_closed() {
            tracing::debug!(action, "skipping action, proxy is blocked");
            return CallResult::blocked();
        }

        tracing::info!("processing {}", action);

        let Some(parsed) = Action::parse(action) else {
            let message = format!("unknown action: {action}");
            gate.close(action, message.as_str());
            tracing::warn!(action, "unknown action, blocking further execution");
            return CallResult::failure(message);
        };

        let ok = match self.dispatch(parsed, args).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::error!(action, error = %format!("{e:#}"), "action handler errored");
                false
            }
        };

        if ok {
            return CallResult::success();
        }

        gate.close(action, parsed.error_message());
        tracing::warn!(
            action,
            reason = parsed.error_message(),
            "action failed, blocking further execution"
        );
        CallResult::failure(parsed.error_message())
    }

    pub async fn is_blocked(&self) -> bool {
        self.gate.lock().await.is_closed()
    }

    pub async fn state(&self) -> GateState {
        self.gate.lock().await.clone()
    }

    async fn dispatch(&self, action: Action, args: &[String]) -> anyhow::Result<bool> {
        let s = &self.services;
        match action {
            Action::NpmBuild => s.builder.build(args).await,
            Action::CatalogTo => s.catalog.to(args).await,
            Action::CatalogBack => s.catalog.back(args).await,
            Action::ProjectStart => s.project.start(args).await,
            Action::ProjectRestart => s.project.restart(args).await,
            Action::ProjectReplaceVersion => s.project.replace_version(args).await,
            Action::GitPush => s.vcs.push(args).await,
            Action::GitPull => s.vcs.pull(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex as StdMutex};

    use async_trait::async_trait;

    use super::*;
    use crate::services::{Builder, Catalog, ProjectControl, VersionControl};

    /// Stands in for every collaborator and records each call it receives.
    #[derive(Default)]
    struct Recorder {
        failing: HashSet<Action>,
        erroring: HashSet<Action>,
        calls: StdMutex<Vec<(Action, Vec<String>)>>,
    }

    impl Recorder {
        fn failing(actions: &[Action]) -> Self {
            Self {
                failing: actions.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn erroring(actions: &[Action]) -> Self {
            Self {
                erroring: actions.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn record(&self, action: Action, args: &[String]) -> anyhow::Result<bool> {
            self.calls.lock().unwrap().push((action, args.to_vec()));
            if self.erroring.contains(&action) {
                anyhow::bail!("{action} blew up");
            }
            Ok(!self.failing.contains(&action))
        }

        fn calls(&self) -> Vec<(Action, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Builder for Recorder {
        async fn build(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::NpmBuild, args)
        }
    }

    #[async_trait]
    impl Catalog for Recorder {
        async fn to(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::CatalogTo, args)
        }
        async fn back(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::CatalogBack, args)
        }
    }

    #[async_trait]
    impl ProjectControl for Recorder {
        async fn start(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::ProjectStart, args)
        }
        async fn restart(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::ProjectRestart, args)
        }
        async fn replace_version(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::ProjectReplaceVersion, args)
        }
    }

    #[async_trait]
    impl VersionControl for Recorder {
        async fn push(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::GitPush, args)
        }
        async fn pull(&self, args: &[String]) -> anyhow::Result<bool> {
            self.record(Action::GitPull, args)
        }
    }

    fn proxy_with(recorder: Arc<Recorder>) -> ActionProxy {
        ActionProxy::new(Services {
            builder: recorder.clone(),
            catalog: recorder.clone(),
            project: recorder.clone(),
            vcs: recorder,
        })
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn every_action_routes_to_its_handler() {
        for action in Action::ALL {
            let recorder = Arc::new(Recorder::default());
            let proxy = proxy_with(recorder.clone());

            let res = proxy.call(action.as_str(), &args(&["a", "b"])).await;

            assert_eq!(res, CallResult::success(), "{action}");
            assert_eq!(recorder.calls(), vec![(action, args(&["a", "b"]))]);
            assert!(!proxy.is_blocked().await);
        }
    }

    #[tokio::test]
    async fn every_failing_action_reports_its_text_and_blocks() {
        for action in Action::ALL {
            let proxy = proxy_with(Arc::new(Recorder::failing(&[action])));

            let res = proxy.call(action.as_str(), &[]).await;

            assert_eq!(res, CallResult::failure(action.error_message()));
            assert!(proxy.is_blocked().await, "{action} should block");
        }
    }

    #[tokio::test]
    async fn handler_error_counts_as_failure() {
        let recorder = Arc::new(Recorder::erroring(&[Action::ProjectRestart]));
        let proxy = proxy_with(recorder.clone());

        let res = proxy.call("project.restart", &[]).await;

        assert_eq!(res, CallResult::failure("failed to restart project"));
        assert_eq!(
            proxy.state().await,
            GateState::Closed {
                action: "project.restart".into(),
                reason: "failed to restart project".into(),
            }
        );
    }

    #[tokio::test]
    async fn blocked_proxy_never_dispatches_again() {
        let recorder = Arc::new(Recorder::failing(&[Action::NpmBuild]));
        let proxy = proxy_with(recorder.clone());

        assert!(!proxy.call("npm.build", &[]).await.success);

        for _ in 0..3 {
            for action in Action::ALL {
                let res = proxy.call(action.as_str(), &args(&["x"])).await;
                assert_eq!(res, CallResult::blocked());
            }
        }
        assert_eq!(proxy.call("unknown.action", &[]).await, CallResult::blocked());

        assert_eq!(recorder.calls().len(), 1);
    }

    #[tokio::test]
    async fn unknown_action_fails_and_blocks() {
        let recorder = Arc::new(Recorder::default());
        let proxy = proxy_with(recorder.clone());

        let res = proxy.call("unknown.action", &[]).await;

        assert_eq!(res, CallResult::failure("unknown action: unknown.action"));
        assert!(proxy.is_blocked().await);
        assert_eq!(proxy.call("git.pull", &[]).await, CallResult::blocked());
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn first_failure_is_the_one_remembered() {
        let proxy = proxy_with(Arc::new(Recorder::failing(&[Action::GitPush])));

        assert!(proxy.call("npm.build", &[]).await.success);
        assert!(!proxy.call("git.push", &[]).await.success);
        let _ = proxy.call("project.start", &[]).await;

        match proxy.state().await {
            GateState::Closed { action, .. } => assert_eq!(action, "git.push"),
            GateState::Open => panic!("expected closed gate"),
        }
    }

    #[tokio::test]
    async fn concurrent_calls_after_failure_are_blocked() {
        let recorder = Arc::new(Recorder::failing(&[Action::CatalogTo]));
        let proxy = Arc::new(proxy_with(recorder.clone()));

        assert!(!proxy.call("catalog.to", &[]).await.success);

        let mut handles = Vec::new();
        for action in Action::ALL {
            let proxy = proxy.clone();
            handles.push(tokio::spawn(async move {
                proxy.call(action.as_str(), &[]).await
            }));
        }
        for h in handles {
            assert_eq!(h.await.unwrap(), CallResult::blocked());
        }
        assert_eq!(recorder.calls().len(), 1);
    }
}
