use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use brewlog_core::audio::AudioCues;
use brewlog_core::timeline::{RecipeStep, RecipeTimeline};
use brewlog_core::timer::TimerEngine;
use brewlog_types::{BrewMetadata, ExportSettings, Language};
use tokio::sync::Notify;

use crate::delivery::{
    DeliveryChain, DeliveryOutcome, DeliveryStrategy, DeliveryTarget, DownloadStrategy,
    NativeShare, NoShareSurface, ShareSurface,
};
use crate::error::{ExportError, RenderError, ShareError};
use crate::export::{ExportArtifact, SnapshotExporter};

// ═══════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════

fn settings() -> ExportSettings {
    ExportSettings {
        scale: 1.0,
        settle_delay_ms: 0,
        ..Default::default()
    }
}

fn timeline(steps: usize) -> RecipeTimeline {
    let steps = (0..steps)
        .map(|i| {
            let start = i as u32 * 30;
            RecipeStep::new(start, 30, 50.0 * (i + 1) as f64, "Pour")
                .with_description("Gentle circles")
        })
        .collect();
    RecipeTimeline::new(steps).unwrap()
}

fn metadata() -> BrewMetadata {
    BrewMetadata {
        coffee_weight: 20.0,
        total_water: 300.0,
        temperature: Some(92.0),
        water_ratio: Some("1:15".to_string()),
        grind_size: Some("Medium".to_string()),
        ..Default::default()
    }
}

fn artifact() -> ExportArtifact {
    ExportArtifact {
        file_name: "WBrC-Log-1.png".to_string(),
        png_bytes: vec![1, 2, 3],
        width: 450,
        height: 800,
        scale: 1.0,
    }
}

fn download_chain(dir: &tempfile::TempDir) -> DeliveryChain {
    DeliveryChain::new()
        .with(NativeShare::new(NoShareSurface, "Brewing Log"))
        .with(DownloadStrategy::new(dir.path()))
}

/// Share surface that errors with a fixed result
struct FixedShare {
    result: fn() -> Result<(), ShareError>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ShareSurface for FixedShare {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn can_share_files(&self) -> bool {
        true
    }

    async fn share(&self, _artifact: &ExportArtifact, _title: &str) -> Result<(), ShareError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.result)()
    }
}

/// Share surface that waits for a permit, then reports a dismissal
struct GatedShare {
    gate: Arc<Notify>,
}

#[async_trait]
impl ShareSurface for GatedShare {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn can_share_files(&self) -> bool {
        true
    }

    async fn share(&self, _artifact: &ExportArtifact, _title: &str) -> Result<(), ShareError> {
        self.gate.notified().await;
        Err(ShareError::Cancelled)
    }
}

struct FailingStrategy;

#[async_trait]
impl DeliveryStrategy for FailingStrategy {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn attempt_deliver(&self, _artifact: &ExportArtifact) -> DeliveryOutcome {
        DeliveryOutcome::Failed("disk on fire".to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Export
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_export_mid_brew_leaves_timer_untouched() {
    let plan = Arc::new(timeline(4));
    let mut engine = TimerEngine::new(Arc::clone(&plan), AudioCues::silent());
    engine.toggle();
    for _ in 0..45 {
        engine.tick();
    }
    let before = engine.snapshot();

    let dir = tempfile::tempdir().unwrap();
    let exporter = SnapshotExporter::new(settings(), Language::En).with_chain(download_chain(&dir));
    exporter.export(engine.timeline(), &metadata()).await.unwrap();

    assert_eq!(engine.snapshot(), before);
    assert!(engine.run_state().is_running());
}

#[tokio::test]
async fn test_share_unavailable_falls_back_to_download() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = SnapshotExporter::new(settings(), Language::En).with_chain(download_chain(&dir));

    let report = exporter.export(&timeline(3), &metadata()).await.unwrap();

    let DeliveryTarget::Downloaded(path) = &report.target else {
        panic!("expected download, got {:?}", report.target);
    };
    assert_eq!(path.parent(), Some(dir.path()));
    assert!(report.file_name.starts_with("WBrC-Log-"));
    assert_eq!(report.width, 450);

    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    assert!(!exporter.is_busy());
}

#[tokio::test]
async fn test_dismissed_share_falls_back_to_download() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = DeliveryChain::new()
        .with(NativeShare::new(
            FixedShare {
                result: || Err(ShareError::Cancelled),
                calls: Arc::clone(&calls),
            },
            "Brewing Log",
        ))
        .with(DownloadStrategy::new(dir.path()));
    let exporter = SnapshotExporter::new(settings(), Language::Ja).with_chain(chain);

    let report = exporter.export(&timeline(2), &metadata()).await.unwrap();
    assert!(matches!(report.target, DeliveryTarget::Downloaded(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_successful_share_skips_download() {
    let dir = tempfile::tempdir().unwrap();
    let chain = DeliveryChain::new()
        .with(NativeShare::new(
            FixedShare {
                result: || Ok(()),
                calls: Arc::new(AtomicUsize::new(0)),
            },
            "Brewing Log",
        ))
        .with(DownloadStrategy::new(dir.path()));
    let exporter = SnapshotExporter::new(settings(), Language::En).with_chain(chain);

    let report = exporter.export(&timeline(2), &metadata()).await.unwrap();
    assert_eq!(
        report.target,
        DeliveryTarget::Shared {
            via: "fixed".to_string()
        }
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_second_export_while_busy_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let gate = Arc::new(Notify::new());
    let chain = DeliveryChain::new()
        .with(NativeShare::new(
            GatedShare {
                gate: Arc::clone(&gate),
            },
            "Brewing Log",
        ))
        .with(DownloadStrategy::new(dir.path()));
    let exporter = SnapshotExporter::new(settings(), Language::En).with_chain(chain);
    let plan = timeline(2);
    let meta = metadata();

    let first = exporter.export(&plan, &meta);
    let second = async {
        while !exporter.is_busy() {
            tokio::task::yield_now().await;
        }
        let result = exporter.export(&plan, &meta).await;
        // still busy: the rejected request must not clear the flag
        assert!(exporter.is_busy());
        gate.notify_one();
        result
    };

    let (first, second) = tokio::join!(first, second);
    assert!(matches!(second, Err(ExportError::Busy)));
    assert!(matches!(
        first.unwrap().target,
        DeliveryTarget::Downloaded(_)
    ));
    assert!(!exporter.is_busy());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_render_failure_notifies_and_clears_busy() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = SnapshotExporter::new(
        ExportSettings {
            scale: 4.0,
            ..settings()
        },
        Language::En,
    )
    .with_chain(download_chain(&dir));

    // far taller than the largest pixmap at 4x
    let err = exporter
        .export(&timeline(200), &metadata())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::Render(RenderError::InvalidSize { .. })
    ));
    assert_eq!(err.user_notice(), Some("Error generating image"));
    assert!(!exporter.is_busy());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_empty_plan_exports() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = SnapshotExporter::new(settings(), Language::En).with_chain(download_chain(&dir));

    let report = exporter
        .export(&RecipeTimeline::empty(), &BrewMetadata::default())
        .await
        .unwrap();
    assert!(matches!(report.target, DeliveryTarget::Downloaded(_)));
}

#[tokio::test(start_paused = true)]
async fn test_settle_delay_precedes_rasterization() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = SnapshotExporter::new(
        ExportSettings {
            settle_delay_ms: 300,
            ..settings()
        },
        Language::En,
    )
    .with_chain(download_chain(&dir));
    let plan = timeline(2);
    let meta = metadata();

    let export = exporter.export(&plan, &meta);
    let observe = async {
        tokio::time::sleep(Duration::from_millis(299)).await;
        (
            exporter.is_busy(),
            std::fs::read_dir(dir.path()).unwrap().count(),
        )
    };

    let (result, (busy_mid_settle, files_mid_settle)) = tokio::join!(export, observe);
    assert!(busy_mid_settle);
    assert_eq!(files_mid_settle, 0);

    assert!(result.is_ok());
    assert!(!exporter.is_busy());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Delivery Chain
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_failed_strategy_moves_on() {
    let dir = tempfile::tempdir().unwrap();
    let chain = DeliveryChain::new()
        .with(FailingStrategy)
        .with(DownloadStrategy::new(dir.path()));

    let target = chain.deliver(&artifact()).await.unwrap();
    assert_eq!(
        target,
        DeliveryTarget::Downloaded(dir.path().join("WBrC-Log-1.png"))
    );
}

#[tokio::test]
async fn test_all_declined_is_undelivered() {
    let chain = DeliveryChain::new()
        .with(NativeShare::new(NoShareSurface, "Brewing Log"))
        .with(FailingStrategy);
    let err = chain.deliver(&artifact()).await.unwrap_err();
    assert!(matches!(err, ExportError::Undelivered));
    assert_eq!(err.user_notice(), None);
}

#[tokio::test]
async fn test_stage_error_is_a_failure_not_a_fallback() {
    let share = NativeShare::new(
        FixedShare {
            result: || Err(ShareError::Failed("helper crashed".to_string())),
            calls: Arc::new(AtomicUsize::new(0)),
        },
        "Brewing Log",
    );
    let outcome = share.attempt_deliver(&artifact()).await;
    assert!(matches!(outcome, DeliveryOutcome::Failed(_)));
}

#[tokio::test]
async fn test_download_creates_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("brews").join("2026");
    let outcome = DownloadStrategy::new(&nested)
        .attempt_deliver(&artifact())
        .await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Delivered(DeliveryTarget::Downloaded(nested.join("WBrC-Log-1.png")))
    );
    assert_eq!(std::fs::read(nested.join("WBrC-Log-1.png")).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_chain_from_settings() {
    let chain = DeliveryChain::from_settings(&ExportSettings {
        share_command: Some("xdg-share --title 'Brewing Log'".to_string()),
        ..Default::default()
    });
    assert_eq!(chain.len(), 2);
}

#[cfg(unix)]
mod command_share {
    use super::*;
    use crate::delivery::CommandShareSurface;

    fn surface(command: &str, dir: &tempfile::TempDir) -> NativeShare<CommandShareSurface> {
        let surface = CommandShareSurface::from_command_line(command)
            .unwrap()
            .with_staging_dir(dir.path());
        NativeShare::new(surface, "Brewing Log")
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(CommandShareSurface::from_command_line("").is_none());
        assert!(CommandShareSurface::from_command_line("share 'unbalanced").is_none());
    }

    #[tokio::test]
    async fn test_zero_exit_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = surface("true", &dir).attempt_deliver(&artifact()).await;
        assert_eq!(
            outcome,
            DeliveryOutcome::Delivered(DeliveryTarget::Shared {
                via: "command".to_string()
            })
        );
        assert!(!dir.path().join("WBrC-Log-1.png").exists());
    }

    #[tokio::test]
    async fn test_helper_sees_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        // `test -s <path>` exits 0 only if the file exists and is non-empty
        let outcome = surface("test -s", &dir).attempt_deliver(&artifact()).await;
        assert!(matches!(outcome, DeliveryOutcome::Delivered(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_dismissal() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = surface("false", &dir).attempt_deliver(&artifact()).await;
        assert_eq!(outcome, DeliveryOutcome::Fallback);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = surface("/nonexistent/brewlog-share-helper", &dir)
            .attempt_deliver(&artifact())
            .await;
        assert_eq!(outcome, DeliveryOutcome::Fallback);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
