//! Error types for the snapshot exporter

use std::path::PathBuf;

use thiserror::Error;

/// Rasterization failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("card size {width}x{height} is out of range")]
    InvalidSize { width: u32, height: u32 },

    #[error("card layout produced an unusable height ({0})")]
    Layout(f32),

    #[error("render task failed")]
    Task(#[source] tokio::task::JoinError),
}

/// Native share failures. `Unavailable` and `Cancelled` are normal outcomes
/// that send the export on to the download fallback.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("sharing is not available: {0}")]
    Unavailable(String),

    #[error("share was cancelled")]
    Cancelled,

    #[error("failed to stage file for sharing at {path}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("share failed: {0}")]
    Failed(String),
}

/// Top-level export failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("failed to render brew log")]
    Render(#[from] RenderError),

    #[error("failed to encode brew log image")]
    Encode(#[from] png::EncodingError),

    #[error("no delivery method accepted the brew log")]
    Undelivered,
}

impl ExportError {
    /// The one message a host should show the user, if any.
    ///
    /// Only rendering and encoding failures are user-visible; everything else
    /// degrades silently.
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            ExportError::Render(_) | ExportError::Encode(_) => Some("Error generating image"),
            ExportError::Busy | ExportError::Undelivered => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_render_failures_notify() {
        let render = ExportError::Render(RenderError::Layout(f32::NAN));
        assert_eq!(render.user_notice(), Some("Error generating image"));
        assert_eq!(ExportError::Busy.user_notice(), None);
        assert_eq!(ExportError::Undelivered.user_notice(), None);
    }
}
