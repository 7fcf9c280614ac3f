//! Recipe ingestion
//!
//! Turns a recipe document (JSON from the recipe-generation service) into a
//! validated `BrewPlan`. This is the only way a brew session gets a timeline,
//! so a malformed step list stops here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use brewlog_types::{BrewMetadata, RecipeDocument};
use thiserror::Error;

use crate::timeline::{RecipeTimeline, TimelineError};

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("failed to read recipe {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipe")]
    Parse(#[from] serde_json::Error),

    #[error("invalid recipe steps")]
    Invalid(#[from] TimelineError),
}

/// A validated timeline plus the metadata printed on the brew log
#[derive(Debug, Clone)]
pub struct BrewPlan {
    pub metadata: BrewMetadata,
    pub timeline: Arc<RecipeTimeline>,
}

impl BrewPlan {
    pub fn from_document(document: RecipeDocument) -> Result<Self, RecipeError> {
        let timeline = RecipeTimeline::try_from(document.steps)?;
        Ok(Self {
            metadata: document.metadata,
            timeline: Arc::new(timeline),
        })
    }
}

pub fn parse_recipe(json: &str) -> Result<BrewPlan, RecipeError> {
    let document: RecipeDocument = serde_json::from_str(json)?;
    BrewPlan::from_document(document)
}

pub fn load_recipe_file(path: &Path) -> Result<BrewPlan, RecipeError> {
    let json = std::fs::read_to_string(path).map_err(|source| RecipeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let plan = parse_recipe(&json)?;
    tracing::info!(
        path = %path.display(),
        steps = plan.timeline.len(),
        total_secs = plan.timeline.total_duration_secs(),
        "Loaded recipe"
    );
    Ok(plan)
}
