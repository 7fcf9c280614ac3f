//! Brew log export
//!
//! `SnapshotExporter::export` renders the card for a timeline, encodes it as
//! PNG and runs the delivery chain. It only reads the timeline, so it can be
//! called while a brew session is running. At most one export runs at a time
//! per exporter; a second request while busy returns `ExportError::Busy`
//! without side effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use brewlog_core::timeline::RecipeTimeline;
use brewlog_types::{BrewMetadata, ExportSettings, Language};

use crate::card::BrewCard;
use crate::delivery::{DeliveryChain, DeliveryTarget};
use crate::encode::encode_png;
use crate::error::{ExportError, RenderError};
use crate::renderer::Renderer;

const MIN_SCALE: f32 = 1.0;
const MAX_SCALE: f32 = 4.0;
const DEFAULT_SCALE: f32 = 3.0;

/// An encoded brew log ready for delivery
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub file_name: String,
    pub target: DeliveryTarget,
    pub width: u32,
    pub height: u32,
}

/// `<prefix>-<unix millis>.png`
pub fn export_file_name(prefix: &str) -> String {
    format!("{}-{}.png", prefix, chrono::Utc::now().timestamp_millis())
}

fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        DEFAULT_SCALE
    }
}

/// Clears the busy flag on every exit path
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SnapshotExporter {
    settings: ExportSettings,
    language: Language,
    renderer: Arc<Mutex<Renderer>>,
    busy: Arc<AtomicBool>,
    chain: DeliveryChain,
}

impl SnapshotExporter {
    pub fn new(settings: ExportSettings, language: Language) -> Self {
        let chain = DeliveryChain::from_settings(&settings);
        Self {
            settings,
            language,
            renderer: Arc::new(Mutex::new(Renderer::new())),
            busy: Arc::new(AtomicBool::new(false)),
            chain,
        }
    }

    /// Replace the delivery chain
    pub fn with_chain(mut self, chain: DeliveryChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// True while an export is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn export(
        &self,
        timeline: &RecipeTimeline,
        metadata: &BrewMetadata,
    ) -> Result<ExportReport, ExportError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("Export requested while another is in progress");
            return Err(ExportError::Busy);
        };

        let artifact = self.render(timeline, metadata).await.inspect_err(|e| {
            tracing::error!(error = %e, "Brew log render failed");
        })?;

        let target = self.chain.deliver(&artifact).await?;
        Ok(ExportReport {
            file_name: artifact.file_name,
            target,
            width: artifact.width,
            height: artifact.height,
        })
    }

    /// Wait for the settle delay, then rasterize and encode off the async
    /// runtime.
    async fn render(
        &self,
        timeline: &RecipeTimeline,
        metadata: &BrewMetadata,
    ) -> Result<ExportArtifact, ExportError> {
        if self.settings.settle_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.settle_delay_ms)).await;
        }

        let card = BrewCard::new(timeline, metadata, self.language.card_labels());
        let scale = clamp_scale(self.settings.scale);
        let renderer = Arc::clone(&self.renderer);
        let file_name = export_file_name(&self.settings.file_prefix);

        let started = std::time::Instant::now();
        let encoded = tokio::task::spawn_blocking(move || -> Result<_, ExportError> {
            let mut renderer = renderer.lock().unwrap_or_else(|e| e.into_inner());
            let rendered = card.render(&mut renderer, scale)?;
            let png_bytes = encode_png(&rendered)?;
            Ok((png_bytes, rendered.width, rendered.height))
        })
        .await
        .map_err(RenderError::Task)?;
        let (png_bytes, width, height) = encoded?;

        tracing::debug!(
            file_name = %file_name,
            width,
            height,
            scale,
            bytes = png_bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered brew log"
        );

        Ok(ExportArtifact {
            file_name,
            png_bytes,
            width,
            height,
            scale,
        })
    }
}

impl std::fmt::Debug for SnapshotExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotExporter")
            .field("settings", &self.settings)
            .field("language", &self.language)
            .field("busy", &self.is_busy())
            .field("strategies", &self.chain.len())
            .finish()
    }
}
