//! East-Asian width folding.
//!
//! Two filters live here:
//! - [`FullWidthToHalfWidthFilter`] folds every character that has a narrow
//!   counterpart to that counterpart.
//! - [`FullWidthSpaceToHalfWidthFilter`] only rewrites the ideographic space.

use std::sync::OnceLock;

use kanafold_types::{CharFilter, FilterKind};
use memchr::memmem;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use unicode_normalization::char::decompose_compatible;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Maps the `<wide>` compatibility forms to their narrow originals.
///
/// Covers U+3000, the full-width ASCII block U+FF01..=U+FF5E, the white
/// parentheses U+FF5F/U+FF60 and the full-width signs U+FFE0..=U+FFE6.
#[inline]
const fn fold_full_width(c: char) -> Option<char> {
    let cp = c as u32;
    let narrow = match cp {
        0x3000 => 0x0020,
        0xFF01..=0xFF5E => cp - 0xFEE0,
        0xFF5F => 0x2985,
        0xFF60 => 0x2986,
        0xFFE0 => 0x00A2,
        0xFFE1 => 0x00A3,
        0xFFE2 => 0x00AC,
        0xFFE3 => 0x00AF,
        0xFFE4 => 0x00A6,
        0xFFE5 => 0x00A5,
        0xFFE6 => 0x20A9,
        _ => return None,
    };
    char::from_u32(narrow)
}

/// Wide -> half-width table for kana, CJK punctuation and Hangul jamo.
///
/// Built once from the `<narrow>` compatibility decompositions of
/// U+FF61..=U+FFDC, plus the standalone sound marks which have no
/// decomposition of their own. U+FFE8..=U+FFEE stay out: their wide sides
/// (`│←↑→↓■○`) are plain symbols, not full-width forms.
fn narrow_table() -> &'static FxHashMap<char, char> {
    static TABLE: OnceLock<FxHashMap<char, char>> = OnceLock::new();

    TABLE.get_or_init(|| {
        let mut table = FxHashMap::default();

        for cp in 0xFF61u32..=0xFFDC {
            let Some(half) = char::from_u32(cp) else {
                continue;
            };

            let mut wide: SmallVec<[char; 4]> = SmallVec::new();
            decompose_compatible(half, |d| wide.push(d));

            if let [w] = wide.as_slice() {
                if *w != half {
                    table.insert(*w, half);
                }
            }
        }

        table.insert('\u{309B}', '\u{FF9E}');
        table.insert('\u{309C}', '\u{FF9F}');
        table
    })
}

/// Converts full-width characters to their half-width ("narrow") forms.
///
/// - Full-width Latin letters, digits and ASCII symbols become ASCII
///   (`Ａ` -> `A`, `１` -> `1`, `！` -> `!`).
/// - Full-width currency and sign forms become their narrow signs (`￥` -> `¥`).
/// - The ideographic space becomes an ASCII space.
/// - Wide katakana, CJK punctuation and Hangul jamo with a half-width form are
///   narrowed (`カ` -> `ｶ`, `。` -> `｡`). The standalone sound marks
///   U+309B/U+309C become U+FF9E/U+FF9F, which compatibility normalization
///   later turns back into combining marks that compose with their base.
///
/// Characters that are already narrow, or have no narrow form, are unchanged.
///
/// # Examples
///
/// ```
/// use kanafold_core::analyzer::FullWidthToHalfWidthFilter;
/// use kanafold_types::CharFilter;
///
/// assert_eq!(FullWidthToHalfWidthFilter.filter("ＡＢＣ１２３"), "ABC123");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FullWidthToHalfWidthFilter;

impl CharFilter for FullWidthToHalfWidthFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());

        if text.is_ascii() {
            out.push_str(text);
            return;
        }

        let narrow = narrow_table();
        for ch in text.chars() {
            if ch.is_ascii() {
                out.push(ch);
            } else if let Some(folded) = fold_full_width(ch) {
                out.push(folded);
            } else {
                out.push(narrow.get(&ch).copied().unwrap_or(ch));
            }
        }
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::FullWidthToHalfWidth
    }
}

/// Replaces every ideographic space (U+3000) with one ASCII space.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullWidthSpaceToHalfWidthFilter;

impl CharFilter for FullWidthSpaceToHalfWidthFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());

        let mut buf = [0u8; 4];
        let needle = IDEOGRAPHIC_SPACE.encode_utf8(&mut buf).as_bytes();

        let mut last = 0usize;
        for pos in memmem::find_iter(text.as_bytes(), needle) {
            out.push_str(&text[last..pos]);
            out.push(' ');
            last = pos + needle.len();
        }
        out.push_str(&text[last..]);
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::FullWidthSpaceToHalfWidth
    }
}
