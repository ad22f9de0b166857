use kanafold_types::{CharFilter, FilterKind};
use unicode_normalization::{is_nfkc_quick, IsNormalized, UnicodeNormalization};

/// Unicode NFKC normalization.
///
/// Compatibility decomposition followed by canonical composition, so that
/// equivalent spellings converge:
///
/// - half-width katakana widen (`ｶ` -> `カ`), and a following half-width or
///   combining sound mark composes with its base (`ﾊﾟ` -> `パ`)
/// - circled and other enclosed forms unwrap (`①` -> `1`)
/// - ligatures split (`ﬁ` -> `fi`)
///
/// Text that passes the NFKC quick check is copied through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompatibilityNormalizationFilter;

impl CharFilter for CompatibilityNormalizationFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());

        if is_nfkc_quick(text.chars()) == IsNormalized::Yes {
            out.push_str(text);
        } else {
            out.extend(text.nfkc());
        }
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::CompatibilityNormalization
    }
}
