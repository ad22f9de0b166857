use std::path::PathBuf;

use kanafold_types::ParseFilterKindError;
use thiserror::Error;

/// Errors raised while turning configuration into a pipeline.
///
/// Filtering itself never fails; only loading and validating a
/// [`PipelineConfig`](crate::PipelineConfig) or a
/// [`PipelineBuilder`](crate::PipelineBuilder) can.
#[derive(Error, Debug)]
pub enum KanafoldError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownStage(#[from] ParseFilterKindError),
    #[error("pipeline must have at least one stage")]
    EmptyStages,
    #[error("`composite` is not a stage that can be configured")]
    CompositeStage,
}

pub type Result<T> = std::result::Result<T, KanafoldError>;
