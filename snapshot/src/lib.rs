//! Brew log snapshot exporter
//!
//! Renders a recipe timeline and its metadata into a fixed-width PNG card
//! and hands it to the first delivery strategy that accepts it.
//!
//! - [`renderer`] - tiny-skia pixmaps and cosmic-text glyph rasterization
//! - [`canvas`] - Logical-pixel drawing surface with a measure-only mode
//! - [`widgets`] - Card building blocks
//! - [`card`] - The brew log layout
//! - [`encode`] - PNG encoding with pixel density metadata
//! - [`delivery`] - Native share and download strategies
//! - [`export`] - The exporter that ties them together

pub mod canvas;
pub mod card;
pub mod delivery;
pub mod encode;
pub mod error;
pub mod export;
pub mod renderer;
pub mod utils;
pub mod widgets;

#[cfg(test)]
mod export_tests;

pub use card::{BrewCard, CARD_WIDTH, RenderedCard};
pub use delivery::{
    CommandShareSurface, DeliveryChain, DeliveryOutcome, DeliveryStrategy, DeliveryTarget,
    DownloadStrategy, NativeShare, NoShareSurface, ShareSurface,
};
pub use error::{ExportError, RenderError, ShareError};
pub use export::{ExportArtifact, ExportReport, SnapshotExporter, export_file_name};
pub use renderer::{FontWeight, Renderer};
