use kanafold_types::{CharFilter, FilterKind};
use unicode_general_category::{get_general_category, GeneralCategory};

/// ASCII code points in General_Category=P. `$ + < = > ^ ` | ~` are symbols
/// (category S) and stay.
const ASCII_PUNCT: [bool; 128] = {
    let mut table = [false; 128];
    let punct = b"!\"#%&'()*,-./:;?@[\\]_{}";
    let mut i = 0;
    while i < punct.len() {
        table[punct[i] as usize] = true;
        i += 1;
    }
    table
};

#[inline]
fn is_punctuation(ch: char) -> bool {
    if ch.is_ascii() {
        return ASCII_PUNCT[ch as usize];
    }

    matches!(
        get_general_category(ch),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Removes every Unicode punctuation code point.
///
/// Punctuation means General_Category P (`Pc`, `Pd`, `Ps`, `Pe`, `Pi`, `Pf`,
/// `Po`). Symbols (`S*`), marks and whitespace are kept, and the remaining
/// code points keep their relative order.
///
/// Removal can leave doubled or trailing spaces behind (`"a , b"` becomes
/// `"a  b"`); the canonical pipeline re-collapses whitespace afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct PunctuationRemovalFilter;

impl CharFilter for PunctuationRemovalFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.reserve(text.len());
        out.extend(text.chars().filter(|&ch| !is_punctuation(ch)));
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::PunctuationRemoval
    }
}
