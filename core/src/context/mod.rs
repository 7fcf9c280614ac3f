mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, AudioSettings, ExportSettings, Language, ToneSettings};
pub use error::ConfigError;
