//! Shared data types for brewlog
//!
//! This crate contains the serializable types shared between the engine
//! (brewlog-core), the exporter (brewlog-snapshot) and the host (brewlog-cli):
//! the recipe document produced by the recipe-generation service, brew
//! metadata, and the user configuration.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Recipe Input (wire format from the recipe-generation service)
// ─────────────────────────────────────────────────────────────────────────────

/// One step of a recipe as received from the recipe-generation service.
///
/// Numbers are kept wide (signed / float) on purpose: the timeline validator
/// in brewlog-core reports negative or fractional values as invariant
/// violations instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInput {
    /// Seconds after brew start at which this step becomes active
    #[serde(alias = "startTimeSec")]
    pub start_offset_sec: f64,

    /// Nominal length of the step in seconds
    pub duration_sec: f64,

    /// Running total of water (ml) in the vessel by the end of this step
    #[serde(alias = "waterAmount")]
    pub cumulative_water_amount: f64,

    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub description: String,

    /// Optional per-step water temperature hint (°C)
    #[serde(default, alias = "waterTemp", skip_serializing_if = "Option::is_none")]
    pub water_temp_c: Option<f64>,
}

impl RecipeStepInput {
    pub fn new(
        start_offset_sec: f64,
        duration_sec: f64,
        cumulative_water_amount: f64,
        action: impl Into<String>,
    ) -> Self {
        Self {
            start_offset_sec,
            duration_sec,
            cumulative_water_amount,
            action: action.into(),
            description: String::new(),
            water_temp_c: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_water_temp(mut self, temp_c: f64) -> Self {
        self.water_temp_c = Some(temp_c);
        self
    }
}

/// Narrative and dosing metadata for one brew. Opaque to the timer engine;
/// the snapshot exporter renders it on the brew log card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrewMetadata {
    /// Dose in grams
    pub coffee_weight: f64,
    /// Total water in ml
    pub total_water: f64,
    /// Brew water temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Ratio as displayed, e.g. "1:15"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grind_size: Option<String>,
    pub tasting_notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barista_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion_inspiration: Option<String>,
}

/// A complete recipe document: metadata plus the ordered step list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    #[serde(flatten)]
    pub metadata: BrewMetadata,
    #[serde(default)]
    pub steps: Vec<RecipeStepInput>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio
// ─────────────────────────────────────────────────────────────────────────────

/// Oscillator shape used to synthesize a cue tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single tone: frequency, length and waveform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSettings {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    #[serde(default)]
    pub waveform: Waveform,
}

impl ToneSettings {
    /// Short C5 blip played when the current step changes
    pub fn step_transition() -> Self {
        Self {
            frequency_hz: 523.25,
            duration_ms: 200,
            waveform: Waveform::Square,
        }
    }

    /// Long A5 tone played when the brew finishes
    pub fn completion() -> Self {
        Self {
            frequency_hz: 880.0,
            duration_ms: 800,
            waveform: Waveform::Sine,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_volume() -> u8 {
    100
}

/// Audio cue settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master sound toggle (the speaker button)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Volume level (0-100), applied on top of the fixed cue gain
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default = "ToneSettings::step_transition")]
    pub transition_tone: ToneSettings,

    #[serde(default = "ToneSettings::completion")]
    pub completion_tone: ToneSettings,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 100,
            transition_tone: ToneSettings::step_transition(),
            completion_tone: ToneSettings::completion(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────────────────────────────────────

fn default_file_prefix() -> String {
    "WBrC-Log".to_string()
}

fn default_scale() -> f32 {
    3.0
}

fn default_settle_delay_ms() -> u64 {
    300
}

fn default_share_title() -> String {
    "Brewing Log".to_string()
}

/// Settings for the brew log image export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// File name prefix; files are named `<prefix>-<unix millis>.png`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Pixel density multiplier for rasterization
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Wait before rasterizing so fonts and layout can settle
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Where downloads land. None = platform downloads dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,

    /// Command used as the native share surface, e.g. a desktop share helper.
    /// The PNG path is appended as the last argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_command: Option<String>,

    #[serde(default = "default_share_title")]
    pub share_title: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            scale: default_scale(),
            settle_delay_ms: default_settle_delay_ms(),
            download_dir: None,
            share_command: None,
            share_title: default_share_title(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Language / Card Labels
// ─────────────────────────────────────────────────────────────────────────────

/// Display language for the brew log card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ja")]
    Ja,
}

/// Static labels printed on the brew log card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLabels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub dose: &'static str,
    pub volume: &'static str,
    pub temp_ratio: &'static str,
    pub grind: &'static str,
    pub analysis: &'static str,
    pub steps: &'static str,
    pub champion: &'static str,
}

impl Language {
    pub fn card_labels(&self) -> CardLabels {
        let (dose, volume, analysis, steps, champion) = match self {
            Language::En => (
                "Dose (g)",
                "Volume (ml)",
                "Champion Match Analysis",
                "Brewing Steps",
                "Extraction Theory",
            ),
            Language::ZhTw => (
                "粉重 (Dose)",
                "液量 (Volume)",
                "冠軍媒合分析報告",
                "沖煮流程詳解",
                "採用萃取理論",
            ),
            Language::Ja => (
                "粉量 (g)",
                "抽出量 (ml)",
                "チャンピオン選定分析",
                "抽出ステップ詳細",
                "採用された理論",
            ),
        };

        CardLabels {
            title: "BARISTA'S LOG",
            subtitle: "AI MASTER BREWING ENGINE",
            dose,
            volume,
            temp_ratio: "Temp / Ratio",
            grind: "Recommended Grind Setting",
            analysis,
            steps,
            champion,
        }
    }

    /// Parse the short codes used in config files and on the command line
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "zh-TW" | "zh-tw" | "zh" => Some(Language::ZhTw),
            "ja" => Some(Language::Ja),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

fn default_tick_interval_ms() -> u64 {
    1000
}

/// User configuration.
///
/// Note: Persistence methods (load/save) are provided by brewlog-core via the
/// `AppConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub language: Language,

    /// Length of one engine tick. Only demos and tests change this.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub audio: AudioSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            tick_interval_ms: default_tick_interval_ms(),
            audio: AudioSettings::default(),
            export: ExportSettings::default(),
        }
    }
}
