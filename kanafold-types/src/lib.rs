//! Core types and traits for the kanafold character filter pipeline.
//!
//! This crate holds the pieces every filter shares, so that filter
//! implementations and the crates that assemble them agree on:
//!
//! - **One capability**: [`CharFilter`], a pure `&str -> String` rewrite
//! - **Stable stage names**: [`FilterKind`], used by configuration and logs
//! - **Mapping tables**: [`MappingTable`], the user-supplied substitution table

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// User-supplied substitution table: literal pattern -> literal replacement.
///
/// Keys are unordered. Output is only well-defined when no key contains
/// another and no replacement can produce a match for a different key.
pub type MappingTable = FxHashMap<String, String>;

/// A stateless text-to-text rewrite applied before tokenization.
///
/// Filters are total: every input, including the empty string, produces an
/// output and nothing can fail. Implementations hold no mutable state, so a
/// single instance may be shared across threads and reused indefinitely.
///
/// # Examples
///
/// ```
/// use kanafold_types::{CharFilter, FilterKind};
///
/// struct Trim;
///
/// impl CharFilter for Trim {
///     fn filter(&self, text: &str) -> String {
///         text.trim().to_owned()
///     }
///
///     fn kind(&self) -> FilterKind {
///         FilterKind::WhitespaceNormalization
///     }
/// }
///
/// assert_eq!(Trim.filter("  abc "), "abc");
/// ```
pub trait CharFilter: Send + Sync {
    /// Rewrites `text` and returns the result as a new string.
    fn filter(&self, text: &str) -> String;

    /// Rewrites `text` into `out`, clearing it first.
    ///
    /// Lets hot loops reuse one buffer. The default delegates to
    /// [`CharFilter::filter`]; per-character filters write directly.
    #[inline]
    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.push_str(&self.filter(text));
    }

    /// The stage this filter implements.
    fn kind(&self) -> FilterKind;
}

impl<F: CharFilter + ?Sized> CharFilter for Box<F> {
    #[inline]
    fn filter(&self, text: &str) -> String {
        (**self).filter(text)
    }

    #[inline]
    fn filter_into(&self, text: &str, out: &mut String) {
        (**self).filter_into(text, out)
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        (**self).kind()
    }
}

impl<F: CharFilter + ?Sized> CharFilter for Arc<F> {
    #[inline]
    fn filter(&self, text: &str) -> String {
        (**self).filter(text)
    }

    #[inline]
    fn filter_into(&self, text: &str, out: &mut String) {
        (**self).filter_into(text, out)
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        (**self).kind()
    }
}

impl<F: CharFilter + ?Sized> CharFilter for &F {
    #[inline]
    fn filter(&self, text: &str) -> String {
        (**self).filter(text)
    }

    #[inline]
    fn filter_into(&self, text: &str, out: &mut String) {
        (**self).filter_into(text, out)
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        (**self).kind()
    }
}

/// Identifies a pipeline stage.
///
/// The snake_case name returned by [`FilterKind::as_str`] is stable and is
/// what configuration files and log lines use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Literal pattern substitution from a [`MappingTable`].
    Mapping,
    /// Full-width forms folded to their half-width equivalents.
    FullWidthToHalfWidth,
    /// Ideographic space (U+3000) replaced with an ASCII space.
    FullWidthSpaceToHalfWidth,
    /// Whitespace runs collapsed to one space, ends trimmed.
    WhitespaceNormalization,
    /// Locale-independent Unicode lowercasing.
    Lowercase,
    /// Removal of General_Category=P code points.
    PunctuationRemoval,
    /// NFKC compatibility normalization.
    CompatibilityNormalization,
    /// Merge of standalone voiced/semi-voiced sound marks into their base.
    DakutenNormalization,
    /// An ordered chain of other filters.
    Composite,
}

impl FilterKind {
    /// Every stage kind, in canonical pipeline order, followed by `Composite`.
    pub const ALL: [FilterKind; 9] = [
        FilterKind::Mapping,
        FilterKind::FullWidthToHalfWidth,
        FilterKind::FullWidthSpaceToHalfWidth,
        FilterKind::WhitespaceNormalization,
        FilterKind::Lowercase,
        FilterKind::PunctuationRemoval,
        FilterKind::CompatibilityNormalization,
        FilterKind::DakutenNormalization,
        FilterKind::Composite,
    ];

    /// Returns the stable snake_case name of this stage.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterKind::Mapping => "mapping",
            FilterKind::FullWidthToHalfWidth => "full_width_to_half_width",
            FilterKind::FullWidthSpaceToHalfWidth => "full_width_space_to_half_width",
            FilterKind::WhitespaceNormalization => "whitespace_normalization",
            FilterKind::Lowercase => "lowercase",
            FilterKind::PunctuationRemoval => "punctuation_removal",
            FilterKind::CompatibilityNormalization => "compatibility_normalization",
            FilterKind::DakutenNormalization => "dakuten_normalization",
            FilterKind::Composite => "composite",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown stage name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterKindError {
    /// The name that did not match any stage.
    pub name: String,
}

impl fmt::Display for ParseFilterKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter stage: {:?}", self.name)
    }
}

impl core::error::Error for ParseFilterKindError {}

impl FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseFilterKindError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reverse;

    impl CharFilter for Reverse {
        fn filter(&self, text: &str) -> String {
            text.chars().rev().collect()
        }

        fn kind(&self) -> FilterKind {
            FilterKind::Mapping
        }
    }

    #[test]
    fn default_filter_into_clears_buffer() {
        let mut out = String::from("stale");
        Reverse.filter_into("abc", &mut out);
        assert_eq!(out, "cba");
    }

    #[test]
    fn boxed_and_shared_filters_delegate() {
        let boxed: Box<dyn CharFilter> = Box::new(Reverse);
        assert_eq!(boxed.filter("ab"), "ba");
        assert_eq!(boxed.kind(), FilterKind::Mapping);

        let shared = Arc::new(Reverse);
        assert_eq!(shared.filter("xyz"), "zyx");
        assert_eq!((&Reverse).filter(""), "");
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.as_str().parse::<FilterKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "stemming".parse::<FilterKind>().unwrap_err();
        assert_eq!(err.name, "stemming");
        assert_eq!(err.to_string(), "unknown filter stage: \"stemming\"");
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in FilterKind::ALL.iter().enumerate() {
            for b in &FilterKind::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn mapping_table_is_a_plain_map() {
        let mut table = MappingTable::default();
        table.insert("１".to_owned(), "一".to_owned());
        assert_eq!(table.get("１").map(String::as_str), Some("一"));
    }
}
