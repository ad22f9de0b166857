use kanafold_types::{CharFilter, FilterKind};

/// `İ`, whose full lowercase mapping appends U+0307.
const CAPITAL_I_WITH_DOT: char = '\u{0130}';

/// Locale-independent Unicode lowercasing.
///
/// Every code point is replaced by its simple (one-to-one) Unicode
/// lowercase mapping. No language-specific tailoring is applied: `I` always
/// becomes `i` (never the Turkish dotless `ı`), and `İ` becomes plain `i`
/// rather than `i` + U+0307. `ß` has no uppercase-to-lowercase change and is
/// kept.
///
/// ASCII bytes take a table-free fast path; everything else goes through
/// [`char::to_lowercase`]. U+0130 is the only code point whose full mapping
/// is longer than one character, so it is special-cased.
///
/// # Examples
///
/// ```
/// use kanafold_core::analyzer::LowercaseFilter;
/// use kanafold_types::CharFilter;
///
/// assert_eq!(LowercaseFilter.filter("ÜBER Café"), "über café");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseFilter;

impl CharFilter for LowercaseFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());

        for ch in text.chars() {
            if ch.is_ascii() {
                out.push(ch.to_ascii_lowercase());
            } else if ch == CAPITAL_I_WITH_DOT {
                out.push('i');
            } else {
                out.extend(ch.to_lowercase());
            }
        }
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::Lowercase
    }
}
