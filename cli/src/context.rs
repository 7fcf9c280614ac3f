use std::sync::Arc;

use brewlog_core::audio::{AudioCues, RodioBackend};
use brewlog_core::context::{AppConfig, AppConfigExt};
use brewlog_core::recipe::BrewPlan;
use brewlog_core::session::{BrewSession, SessionHandle};
use brewlog_snapshot::SnapshotExporter;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;

use crate::watcher;

/// A loaded recipe and the session brewing it
pub struct ActiveBrew {
    pub plan: BrewPlan,
    pub session: SessionHandle,
    watcher: JoinHandle<()>,
}

impl ActiveBrew {
    /// Shut the session down and stop printing its progress
    pub async fn close(mut self) {
        if let Err(e) = self.session.shutdown().await {
            tracing::debug!(error = %e, "Session already closed");
        }
        self.watcher.abort();
    }
}

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// None until a recipe is loaded. Loading another recipe replaces it.
    brew: Arc<Mutex<Option<ActiveBrew>>>,
    pub exporter: Arc<SnapshotExporter>,
}

impl CliContext {
    pub fn new(config: AppConfig) -> Self {
        let exporter = SnapshotExporter::new(config.export.clone(), config.language);
        Self {
            config: Arc::new(RwLock::new(config)),
            brew: Arc::new(Mutex::new(None)),
            exporter: Arc::new(exporter),
        }
    }

    /// Start a session for `plan`, closing any previous one first.
    pub async fn start_brew(&self, plan: BrewPlan) {
        let config = self.config.read().await;
        let audio = AudioCues::new(Box::new(RodioBackend), &config.audio);
        let options = config.session_options();
        drop(config);

        let mut slot = self.brew.lock().await;
        if let Some(previous) = slot.take() {
            previous.close().await;
        }

        let session = BrewSession::spawn(plan.timeline.clone(), audio, options);
        let watcher = watcher::spawn_progress_printer(session.subscribe(), plan.timeline.clone());
        *slot = Some(ActiveBrew {
            plan,
            session,
            watcher,
        });
    }

    /// Lock the active brew slot
    pub async fn brew(&self) -> MutexGuard<'_, Option<ActiveBrew>> {
        self.brew.lock().await
    }

    pub async fn plan(&self) -> Option<BrewPlan> {
        self.brew().await.as_ref().map(|brew| brew.plan.clone())
    }

    pub async fn close_brew(&self) {
        if let Some(brew) = self.brew.lock().await.take() {
            brew.close().await;
        }
    }
}
