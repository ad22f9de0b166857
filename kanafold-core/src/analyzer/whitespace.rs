use kanafold_types::{CharFilter, FilterKind};

/// Collapses whitespace runs and trims both ends.
///
/// Splits on any run of Unicode `White_Space` code points (ASCII space,
/// tab, newlines, NBSP, U+3000, ...), drops empty fragments and rejoins the
/// rest with a single ASCII space. The output therefore never starts or ends
/// with a space and never contains two spaces in a row.
///
/// # Examples
///
/// ```
/// use kanafold_core::analyzer::WhitespaceNormalizationFilter;
/// use kanafold_types::CharFilter;
///
/// let f = WhitespaceNormalizationFilter;
/// assert_eq!(f.filter("  HELLO \t\n WORLD  "), "HELLO WORLD");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceNormalizationFilter;

impl CharFilter for WhitespaceNormalizationFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());

        // A space is only emitted once the next fragment starts, so trailing
        // runs never reach the output.
        let mut pending_space = false;

        for ch in text.chars() {
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }

            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::WhitespaceNormalization
    }
}
