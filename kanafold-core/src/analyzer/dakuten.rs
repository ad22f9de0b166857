//! Merging of standalone voiced / semi-voiced sound marks.
//!
//! Japanese text sometimes spells `ガ` as `カ` followed by the spacing mark
//! `゛` (U+309B) rather than the precomposed code point. NFKC does not merge
//! that pair because U+309B decomposes to a space plus the combining mark,
//! so the space stays in between. This pass merges the pair explicitly.

use kanafold_types::{CharFilter, FilterKind};
use unicode_normalization::UnicodeNormalization;

/// Spacing voiced sound mark (dakuten).
pub const VOICED_MARK: char = '\u{309B}';
/// Spacing semi-voiced sound mark (handakuten).
pub const SEMI_VOICED_MARK: char = '\u{309C}';

#[inline]
const fn combining_counterpart(ch: char) -> Option<char> {
    match ch {
        VOICED_MARK => Some('\u{3099}'),
        SEMI_VOICED_MARK => Some('\u{309A}'),
        _ => None,
    }
}

/// Composes `base` with a combining mark and keeps the first code point.
///
/// A base that cannot take the mark comes back unchanged (modulo its own
/// NFKC form) and the mark is lost.
#[inline]
fn compose_pair(base: char, mark: char) -> char {
    [base, mark].into_iter().nfkc().next().unwrap_or(base)
}

/// Merges a base character with a following standalone sound mark.
///
/// For every `゛`/`゜` after the first code point, the previous output code
/// point and the mark are composed under NFKC and the previous code point is
/// replaced by the first code point of the result. `カ゛` becomes `ガ`,
/// `ハ゜` becomes `パ`.
///
/// # Lossy
///
/// A mark whose base cannot take it (`a゛`, `ア゛`... where no precomposed
/// form exists) is dropped silently. A mark at the very start of the text
/// has no base and is kept as is.
///
/// # Examples
///
/// ```
/// use kanafold_core::analyzer::DakutenNormalizationFilter;
/// use kanafold_types::CharFilter;
///
/// let f = DakutenNormalizationFilter;
/// assert_eq!(f.filter("カ\u{309B}キ\u{309B}"), "ガギ");
/// assert_eq!(f.filter("\u{309B}カ"), "\u{309B}カ");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DakutenNormalizationFilter;

impl CharFilter for DakutenNormalizationFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());

        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                if let Some(mark) = combining_counterpart(ch) {
                    // i > 0 means at least one code point has been written.
                    if let Some(prev) = out.pop() {
                        out.push(compose_pair(prev, mark));
                    }
                    continue;
                }
            }
            out.push(ch);
        }
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::DakutenNormalization
    }
}
