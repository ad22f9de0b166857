//! Character filters.
//!
//! Each filter rewrites a whole string and knows nothing about the others:
//! - **Mapping**: user-supplied literal substitutions
//! - **Width**: full-width to half-width folding, ideographic space folding
//! - **Whitespace**: collapse runs, trim ends
//! - **Case**: locale-independent lowercasing
//! - **Punctuation**: drop General_Category=P code points
//! - **Compat**: NFKC normalization
//! - **Dakuten**: merge standalone sound marks into their base
//! - **Composite**: run filters in sequence
//! - **Pipeline**: the canonical chain and a builder for custom ones

pub mod case;
pub mod compat;
pub mod composite;
pub mod dakuten;
pub mod mapping;
pub mod pipeline;
pub mod punctuation;
pub mod whitespace;
pub mod width;

pub use case::LowercaseFilter;
pub use compat::CompatibilityNormalizationFilter;
pub use composite::CompositeCharFilter;
pub use dakuten::DakutenNormalizationFilter;
pub use mapping::MappingCharFilter;
pub use pipeline::{pipeline, Pipeline, PipelineBuilder, CANONICAL_STAGES};
pub use punctuation::PunctuationRemovalFilter;
pub use whitespace::WhitespaceNormalizationFilter;
pub use width::{FullWidthSpaceToHalfWidthFilter, FullWidthToHalfWidthFilter};
