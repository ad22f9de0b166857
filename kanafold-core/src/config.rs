//! Configuration for building a pipeline from data.
//!
//! [`PipelineConfig`] is the serializable form of a [`Pipeline`]: the
//! mapping table plus the stage order.
//!
//! # Examples
//!
//! ## Default configuration
//!
//! ```rust
//! use kanafold_core::PipelineConfig;
//!
//! let config = PipelineConfig::default();
//! assert!(config.mappings.is_empty());
//! assert_eq!(config.stages.len(), 11);
//! ```
//!
//! ## From JSON
//!
//! ```rust
//! use kanafold_core::PipelineConfig;
//!
//! let config = PipelineConfig::from_json_str(
//!     r#"{ "mappings": { "マツモトキヨシ": "ドラッグストア" } }"#,
//! )
//! .unwrap();
//!
//! let pipeline = config.build().unwrap();
//! assert_eq!(pipeline.filter("マツモトキヨシ！"), "ドラッグストア");
//! ```

use std::fs;
use std::path::Path;

use kanafold_types::{FilterKind, MappingTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::{Pipeline, CANONICAL_STAGES};
use crate::error::{KanafoldError, Result};

fn canonical_stage_names() -> Vec<String> {
    CANONICAL_STAGES
        .iter()
        .map(|kind| kind.as_str().to_owned())
        .collect()
}

/// Serializable pipeline description.
///
/// ```json
/// {
///   "mappings": { "１": "一", "２": "二" },
///   "stages": ["mapping", "lowercase", "whitespace_normalization"]
/// }
/// ```
///
/// Both fields are optional. A missing `stages` list means the canonical
/// order; a missing `mappings` table means no substitutions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Literal substitutions for the `mapping` stage.
    ///
    /// Keys should not contain one another; see
    /// [`MappingCharFilter`](crate::analyzer::MappingCharFilter).
    #[serde(default)]
    pub mappings: MappingTable,

    /// Stage names in application order, as returned by
    /// [`FilterKind::as_str`].
    #[serde(default = "canonical_stage_names")]
    pub stages: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mappings: MappingTable::default(),
            stages: canonical_stage_names(),
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| KanafoldError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded pipeline config");
        Self::from_json_str(&json)
    }

    /// Parses the stage names.
    ///
    /// # Errors
    ///
    /// [`KanafoldError::UnknownStage`] for a name that is not a stage.
    pub fn stage_kinds(&self) -> Result<Vec<FilterKind>> {
        self.stages
            .iter()
            .map(|name| name.parse::<FilterKind>().map_err(KanafoldError::from))
            .collect()
    }

    /// Builds the described pipeline.
    ///
    /// # Errors
    ///
    /// Unknown stage names, an empty stage list, or a `composite` stage.
    pub fn build(&self) -> Result<Pipeline> {
        Pipeline::builder()
            .mappings(&self.mappings)
            .stages(self.stage_kinds()?)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_canonical() {
        let config = PipelineConfig::default();
        assert_eq!(config.stage_kinds().unwrap(), CANONICAL_STAGES);

        let pipeline = config.build().unwrap();
        assert_eq!(pipeline.stages(), &CANONICAL_STAGES);
        assert_eq!(pipeline.filter("  Hello,   WORLD!  "), "hello world");
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn mappings_and_stages_parse() {
        let config = PipelineConfig::from_json_str(
            r#"{
                "mappings": { "１": "一", "２": "二", "３": "三" },
                "stages": ["mapping", "full_width_to_half_width", "lowercase"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.mappings.len(), 3);
        let pipeline = config.build().unwrap();
        assert_eq!(
            pipeline.stages(),
            &[
                FilterKind::Mapping,
                FilterKind::FullWidthToHalfWidth,
                FilterKind::Lowercase
            ]
        );
        assert_eq!(pipeline.filter("ＡＢＣ１２３"), "abc一二三");
    }

    #[test]
    fn unknown_stage_rejected() {
        let config = PipelineConfig::from_json_str(r#"{ "stages": ["stemming"] }"#).unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(err, KanafoldError::UnknownStage(ref e) if e.name == "stemming"));
    }

    #[test]
    fn empty_stage_list_rejected() {
        let config = PipelineConfig::from_json_str(r#"{ "stages": [] }"#).unwrap();
        assert!(matches!(config.build(), Err(KanafoldError::EmptyStages)));
    }

    #[test]
    fn composite_stage_rejected() {
        let config = PipelineConfig::from_json_str(r#"{ "stages": ["composite"] }"#).unwrap();
        assert!(matches!(config.build(), Err(KanafoldError::CompositeStage)));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = PipelineConfig::from_json_str(r#"{ "mapping": {} }"#).unwrap_err();
        assert!(matches!(err, KanafoldError::Json(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ not json"),
            Err(KanafoldError::Json(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PipelineConfig::from_path("/nonexistent/kanafold.json").unwrap_err();
        assert!(matches!(err, KanafoldError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/kanafold.json"));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let mut config = PipelineConfig::default();
        config
            .mappings
            .insert("マツモトキヨシ".into(), "ドラッグストア".into());

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_json_str(&json).unwrap(), config);
    }
}
