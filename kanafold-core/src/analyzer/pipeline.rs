//! Pipeline assembly.
//!
//! [`pipeline`] builds the canonical chain used ahead of tokenization:
//!
//! ```text
//! mapping -> full_width_to_half_width -> full_width_space_to_half_width
//!         -> whitespace_normalization -> lowercase -> punctuation_removal
//!         -> compatibility_normalization -> dakuten_normalization
//!         -> lowercase -> punctuation_removal -> whitespace_normalization
//! ```
//!
//! User substitutions run first so their keys still match the raw input.
//! Width folding precedes whitespace collapsing so full-width spaces are
//! seen as spaces. NFKC expands compatibility forms into letters, punctuation
//! and spaces the earlier stages have already passed (`"℃"` -> `"°C"`,
//! `"㈱"` -> `"(株)"`, `"゛"` -> `" \u{3099}"`), and punctuation removal can
//! leave a dangling space (`"a 。"` -> `"a "`). The chain therefore closes by
//! lowercasing, stripping punctuation and collapsing whitespace once more, so
//! its output is a fixed point.
//!
//! [`PipelineBuilder`] assembles any other order from [`FilterKind`]s.

use std::sync::Arc;

use kanafold_types::{CharFilter, FilterKind};
use tracing::{debug, trace_span, warn};

use super::{
    CompatibilityNormalizationFilter, CompositeCharFilter, DakutenNormalizationFilter,
    FullWidthSpaceToHalfWidthFilter, FullWidthToHalfWidthFilter, LowercaseFilter,
    MappingCharFilter, PunctuationRemovalFilter, WhitespaceNormalizationFilter,
};
use crate::error::{KanafoldError, Result};

/// Stage order of the canonical pipeline.
pub const CANONICAL_STAGES: [FilterKind; 11] = [
    FilterKind::Mapping,
    FilterKind::FullWidthToHalfWidth,
    FilterKind::FullWidthSpaceToHalfWidth,
    FilterKind::WhitespaceNormalization,
    FilterKind::Lowercase,
    FilterKind::PunctuationRemoval,
    FilterKind::CompatibilityNormalization,
    FilterKind::DakutenNormalization,
    FilterKind::Lowercase,
    FilterKind::PunctuationRemoval,
    FilterKind::WhitespaceNormalization,
];

/// Builds the canonical pipeline around a mapping table.
///
/// # Examples
///
/// ```
/// use kanafold_core::pipeline;
///
/// let p = pipeline([("１", "一"), ("２", "二"), ("３", "三")]);
/// assert_eq!(p.filter("ＡＢＣ１２３"), "abc一二三");
/// ```
pub fn pipeline<I, K, V>(mappings: I) -> Pipeline
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Pipeline::canonical(mappings)
}

/// A built, immutable filter chain.
///
/// `Pipeline` is `Send + Sync`; one instance can serve any number of threads
/// without locking, since every call allocates its own output.
pub struct Pipeline {
    chain: CompositeCharFilter,
    stages: Vec<FilterKind>,
}

impl Pipeline {
    /// The canonical chain (see the module docs) around `mappings`.
    pub fn canonical<I, K, V>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::assemble(MappingCharFilter::new(mappings), &CANONICAL_STAGES)
    }

    /// Starts an empty builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Stage kinds in application order.
    #[inline]
    pub fn stages(&self) -> &[FilterKind] {
        &self.stages
    }

    /// Normalizes `text` and returns a new string.
    #[inline]
    pub fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    /// Normalizes `text` into an existing buffer, clearing it first.
    pub fn filter_into(&self, text: &str, out: &mut String) {
        let _span = trace_span!("pipeline.filter", bytes = text.len()).entered();
        self.chain.filter_into(text, out);
    }

    fn assemble(mapping: MappingCharFilter, stages: &[FilterKind]) -> Self {
        if stages.contains(&FilterKind::Mapping) {
            for (outer, inner) in mapping.conflicts() {
                warn!(outer, inner, "mapping key contains another key; output depends on rule order");
            }
        }

        let rules = mapping.len();
        let mapping = Arc::new(mapping);
        let filters = stages
            .iter()
            .filter_map(|&kind| make_filter(kind, &mapping))
            .collect();

        debug!(
            stages = ?stages,
            rules,
            "built character filter pipeline"
        );

        Self {
            chain: CompositeCharFilter::new(filters),
            stages: stages.to_vec(),
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("stages", &self.stages).finish()
    }
}

impl CharFilter for Pipeline {
    #[inline]
    fn filter(&self, text: &str) -> String {
        Pipeline::filter(self, text)
    }

    #[inline]
    fn filter_into(&self, text: &str, out: &mut String) {
        Pipeline::filter_into(self, text, out)
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::Composite
    }
}

fn make_filter(kind: FilterKind, mapping: &Arc<MappingCharFilter>) -> Option<Box<dyn CharFilter>> {
    let filter: Box<dyn CharFilter> = match kind {
        FilterKind::Mapping => Box::new(Arc::clone(mapping)),
        FilterKind::FullWidthToHalfWidth => Box::new(FullWidthToHalfWidthFilter),
        FilterKind::FullWidthSpaceToHalfWidth => Box::new(FullWidthSpaceToHalfWidthFilter),
        FilterKind::WhitespaceNormalization => Box::new(WhitespaceNormalizationFilter),
        FilterKind::Lowercase => Box::new(LowercaseFilter),
        FilterKind::PunctuationRemoval => Box::new(PunctuationRemovalFilter),
        FilterKind::CompatibilityNormalization => Box::new(CompatibilityNormalizationFilter),
        FilterKind::DakutenNormalization => Box::new(DakutenNormalizationFilter),
        FilterKind::Composite => return None,
    };
    Some(filter)
}

/// Assembles a pipeline from an explicit stage list.
///
/// # Examples
///
/// ```
/// use kanafold_core::Pipeline;
/// use kanafold_types::FilterKind;
///
/// let p = Pipeline::builder()
///     .stage(FilterKind::Lowercase)
///     .stage(FilterKind::PunctuationRemoval)
///     .build()
///     .unwrap();
///
/// assert_eq!(p.filter("Hello, World!"), "hello world");
/// ```
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    mapping: MappingCharFilter,
    stages: Vec<FilterKind>,
}

impl PipelineBuilder {
    /// Sets the table used by every [`FilterKind::Mapping`] stage.
    pub fn mappings<I, K, V>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.mapping = MappingCharFilter::new(mappings);
        self
    }

    /// Appends one stage.
    pub fn stage(mut self, kind: FilterKind) -> Self {
        self.stages.push(kind);
        self
    }

    /// Appends several stages in order.
    pub fn stages<I: IntoIterator<Item = FilterKind>>(mut self, kinds: I) -> Self {
        self.stages.extend(kinds);
        self
    }

    /// Validates the stage list and builds the pipeline.
    ///
    /// # Errors
    ///
    /// [`KanafoldError::EmptyStages`] for an empty list and
    /// [`KanafoldError::CompositeStage`] if `Composite` was listed.
    pub fn build(self) -> Result<Pipeline> {
        if self.stages.is_empty() {
            return Err(KanafoldError::EmptyStages);
        }
        if self.stages.contains(&FilterKind::Composite) {
            return Err(KanafoldError::CompositeStage);
        }
        Ok(Pipeline::assemble(self.mapping, &self.stages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numerals() -> [(&'static str, &'static str); 3] {
        [("１", "一"), ("２", "二"), ("３", "三")]
    }

    #[test]
    fn canonical_stage_order() {
        let p = pipeline(numerals());
        assert_eq!(p.stages(), &CANONICAL_STAGES);
        assert_eq!(p.stages().len(), 11);
        assert_eq!(p.stages()[0], FilterKind::Mapping);
        assert_eq!(p.stages()[7], FilterKind::DakutenNormalization);
        assert_eq!(
            &p.stages()[8..],
            &[
                FilterKind::Lowercase,
                FilterKind::PunctuationRemoval,
                FilterKind::WhitespaceNormalization,
            ]
        );
    }

    #[test]
    fn compatibility_expansions_are_refolded() {
        let p = pipeline(Vec::<(String, String)>::new());
        let cases = [
            ("気温25℃", "気温25°c"),
            ("Brand™", "brandtm"),
            ("㈱", "株"),
            ("⑴項目", "1項目"),
            ("⒈ はじめに", "1 はじめに"),
            ("ℌ", "h"),
        ];
        for (input, want) in cases {
            let once = p.filter(input);
            assert_eq!(once, want, "input {input:?}");
            assert_eq!(p.filter(&once), once, "not a fixed point for {input:?}");
        }
    }

    #[test]
    fn full_width_folding_with_mapping() {
        assert_eq!(pipeline(numerals()).filter("ＡＢＣ１２３"), "abc一二三");
    }

    #[test]
    fn mapping_punctuation_and_space() {
        let p = pipeline([("マツモトキヨシ", "ドラッグストア")]);
        assert_eq!(p.filter("マツモトキヨシ　、。！？"), "ドラッグストア");
    }

    #[test]
    fn mixed_sample() {
        let p = pipeline([
            ("マツモトキヨシ", "ドラッグストア"),
            ("１", "一"),
            ("２", "二"),
            ("３", "三"),
        ]);
        let input = "ＡＢＣ１２３　ｱｲｳｴｵ　カキクケコ　ﾊﾟﾋﾟﾌﾟﾍﾟﾎﾟ　、。！？　マツモトキヨシ";
        assert_eq!(
            p.filter(input),
            "abc一二三 アイウエオ カキクケコ パピプペポ ドラッグストア"
        );
    }

    #[test]
    fn standalone_voiced_mark_merges_through_pipeline() {
        let p = pipeline(Vec::<(String, String)>::new());
        assert_eq!(p.filter("カ\u{309B}"), "ガ");
        assert_eq!(p.filter("ハ\u{309C}ヒ\u{309C}"), "パピ");
    }

    #[test]
    fn whitespace_collapse() {
        let p = pipeline(Vec::<(String, String)>::new());
        assert_eq!(p.filter("a   b\tc"), "a b c");
        assert_eq!(p.filter("  a , b  "), "a b");
    }

    #[test]
    fn empty_input() {
        assert_eq!(pipeline(numerals()).filter(""), "");
    }

    #[test]
    fn builder_custom_order() {
        let p = Pipeline::builder()
            .mappings([("Foo", "bar")])
            .stages([FilterKind::Lowercase, FilterKind::Mapping])
            .build()
            .unwrap();
        // Lowercasing first breaks the case-sensitive key.
        assert_eq!(p.filter("Foo"), "foo");
    }

    #[test]
    fn builder_mapping_stage_may_repeat() {
        let p = Pipeline::builder()
            .mappings([("a", "b")])
            .stages([FilterKind::Mapping, FilterKind::Mapping])
            .build()
            .unwrap();
        assert_eq!(p.filter("aa"), "bb");
    }

    #[test]
    fn builder_rejects_empty() {
        let err = Pipeline::builder().build().unwrap_err();
        assert!(matches!(err, KanafoldError::EmptyStages));
    }

    #[test]
    fn builder_rejects_composite() {
        let err = Pipeline::builder()
            .stage(FilterKind::Lowercase)
            .stage(FilterKind::Composite)
            .build()
            .unwrap_err();
        assert!(matches!(err, KanafoldError::CompositeStage));
    }

    #[test]
    fn pipeline_is_a_char_filter() {
        let p: Box<dyn CharFilter> = Box::new(pipeline(numerals()));
        assert_eq!(p.kind(), FilterKind::Composite);
        assert_eq!(p.filter("１"), "一");
    }
}
