//! Delivery of an exported brew log
//!
//! Delivery is a chain of strategies tried in order. Each strategy either
//! delivers the artifact, declines (`Fallback`, a normal outcome such as a
//! dismissed share sheet) or fails. The chain stops at the first delivery;
//! declines and failures both move on to the next strategy.
//!
//! The default chain is native share, then download.

use std::path::PathBuf;

use async_trait::async_trait;
use brewlog_types::ExportSettings;

use crate::error::{ExportError, ShareError};
use crate::export::ExportArtifact;

/// Where the artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Handed to a share surface
    Shared { via: String },
    /// Written to a local file
    Downloaded(PathBuf),
}

impl std::fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryTarget::Shared { via } => write!(f, "shared via {via}"),
            DeliveryTarget::Downloaded(path) => write!(f, "saved to {}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(DeliveryTarget),
    /// Declined without error; try the next strategy
    Fallback,
    Failed(String),
}

#[async_trait]
pub trait DeliveryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt_deliver(&self, artifact: &ExportArtifact) -> DeliveryOutcome;
}

/// Ordered list of strategies
#[derive(Default)]
pub struct DeliveryChain {
    strategies: Vec<Box<dyn DeliveryStrategy>>,
}

impl DeliveryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: impl DeliveryStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Native share (command surface if configured), then download
    pub fn from_settings(settings: &ExportSettings) -> Self {
        let share_title = settings.share_title.clone();
        let chain = match settings
            .share_command
            .as_deref()
            .and_then(CommandShareSurface::from_command_line)
        {
            Some(surface) => Self::new().with(NativeShare::new(surface, share_title)),
            None => Self::new().with(NativeShare::new(NoShareSurface, share_title)),
        };
        chain.with(DownloadStrategy::from_settings(settings))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub async fn deliver(&self, artifact: &ExportArtifact) -> Result<DeliveryTarget, ExportError> {
        for strategy in &self.strategies {
            match strategy.attempt_deliver(artifact).await {
                DeliveryOutcome::Delivered(target) => {
                    tracing::info!(strategy = strategy.name(), %target, "Brew log delivered");
                    return Ok(target);
                }
                DeliveryOutcome::Fallback => {
                    tracing::debug!(strategy = strategy.name(), "Delivery declined, falling back");
                }
                DeliveryOutcome::Failed(reason) => {
                    tracing::warn!(strategy = strategy.name(), reason = %reason, "Delivery failed");
                }
            }
        }
        Err(ExportError::Undelivered)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Native Share
// ─────────────────────────────────────────────────────────────────────────────

/// A platform share affordance
#[async_trait]
pub trait ShareSurface: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_share_files(&self) -> bool;

    async fn share(&self, artifact: &ExportArtifact, title: &str) -> Result<(), ShareError>;
}

/// Desktop default: no share sheet
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShareSurface;

#[async_trait]
impl ShareSurface for NoShareSurface {
    fn name(&self) -> &'static str {
        "none"
    }

    fn can_share_files(&self) -> bool {
        false
    }

    async fn share(&self, _artifact: &ExportArtifact, _title: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable("no share surface".to_string()))
    }
}

/// Runs a share helper with the staged PNG path as its last argument.
///
/// The staged file is removed once the helper exits. Spawn failure means
/// sharing is unavailable; a non-zero exit means the user dismissed it.
#[derive(Debug, Clone)]
pub struct CommandShareSurface {
    program: String,
    args: Vec<String>,
    staging_dir: PathBuf,
}

impl CommandShareSurface {
    /// Parse a shell-style command line. `None` if it is empty or unbalanced.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = shlex::split(command)?.into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            staging_dir: std::env::temp_dir(),
        })
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}

#[async_trait]
impl ShareSurface for CommandShareSurface {
    fn name(&self) -> &'static str {
        "command"
    }

    fn can_share_files(&self) -> bool {
        true
    }

    async fn share(&self, artifact: &ExportArtifact, title: &str) -> Result<(), ShareError> {
        let path = self.staging_dir.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.png_bytes)
            .await
            .map_err(|source| ShareError::Stage {
                path: path.clone(),
                source,
            })?;

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .env("BREWLOG_SHARE_TITLE", title)
            .status()
            .await;

        // The helper has exited either way; the staged copy is no longer needed
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!(
                path = %path.display(),
                error = %e,
                "Failed to remove staged share file"
            );
        }

        let status =
            status.map_err(|e| ShareError::Unavailable(format!("{}: {e}", self.program)))?;
        if status.success() {
            Ok(())
        } else {
            Err(ShareError::Cancelled)
        }
    }
}

/// Share-sheet strategy. Never fails the export on its own account.
pub struct NativeShare<S: ShareSurface> {
    surface: S,
    title: String,
}

impl<S: ShareSurface> NativeShare<S> {
    pub fn new(surface: S, title: impl Into<String>) -> Self {
        Self {
            surface,
            title: title.into(),
        }
    }
}

#[async_trait]
impl<S: ShareSurface> DeliveryStrategy for NativeShare<S> {
    fn name(&self) -> &'static str {
        "native-share"
    }

    async fn attempt_deliver(&self, artifact: &ExportArtifact) -> DeliveryOutcome {
        if !self.surface.can_share_files() {
            return DeliveryOutcome::Fallback;
        }

        match self.surface.share(artifact, &self.title).await {
            Ok(()) => DeliveryOutcome::Delivered(DeliveryTarget::Shared {
                via: self.surface.name().to_string(),
            }),
            Err(ShareError::Unavailable(reason)) => {
                tracing::debug!(reason = %reason, "Share surface unavailable");
                DeliveryOutcome::Fallback
            }
            Err(ShareError::Cancelled) => {
                tracing::debug!("Share dismissed");
                DeliveryOutcome::Fallback
            }
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Download
// ─────────────────────────────────────────────────────────────────────────────

/// Writes the PNG into a directory
#[derive(Debug, Clone)]
pub struct DownloadStrategy {
    dir: PathBuf,
}

impl DownloadStrategy {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Configured directory, else the platform downloads dir, else the
    /// working directory
    pub fn from_settings(settings: &ExportSettings) -> Self {
        let dir = settings
            .download_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

}

#[async_trait]
impl DeliveryStrategy for DownloadStrategy {
    fn name(&self) -> &'static str {
        "download"
    }

    async fn attempt_deliver(&self, artifact: &ExportArtifact) -> DeliveryOutcome {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            return DeliveryOutcome::Failed(format!("{}: {e}", self.dir.display()));
        }

        let path = self.dir.join(&artifact.file_name);
        match tokio::fs::write(&path, &artifact.png_bytes).await {
            Ok(()) => DeliveryOutcome::Delivered(DeliveryTarget::Downloaded(path)),
            Err(e) => DeliveryOutcome::Failed(format!("{}: {e}", path.display())),
        }
    }
}
