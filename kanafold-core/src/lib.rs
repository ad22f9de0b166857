//! Text normalization ahead of tokenization.
//!
//! Raw text goes through an ordered chain of stateless character filters
//! and comes out in one canonical form: user substitutions applied,
//! full-width forms folded, whitespace collapsed, lowercased, punctuation
//! stripped, NFKC-normalized and with standalone kana sound marks merged.
//!
//! ```
//! use kanafold_core::pipeline;
//!
//! let p = pipeline([("マツモトキヨシ", "ドラッグストア")]);
//! assert_eq!(p.filter("マツモトキヨシ　、。！？"), "ドラッグストア");
//! ```

pub mod analyzer;
pub mod config;
pub mod error;

pub use analyzer::{pipeline, Pipeline, PipelineBuilder};
pub use config::PipelineConfig;
pub use error::{KanafoldError, Result};
pub use kanafold_types::{CharFilter, FilterKind, MappingTable};
