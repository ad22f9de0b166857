use std::borrow::Cow;

use kanafold_types::{CharFilter, FilterKind, MappingTable};
use memchr::memmem::Finder;
use rustc_hash::FxHashMap;

/// One compiled `pattern -> replacement` rule.
struct Rule {
    pattern: String,
    replacement: String,
    finder: Finder<'static>,
}

impl Rule {
    fn new(pattern: String, replacement: String) -> Self {
        let finder = Finder::new(pattern.as_bytes()).into_owned();
        Self {
            pattern,
            replacement,
            finder,
        }
    }

    /// Replaces every non-overlapping occurrence, scanning left to right.
    ///
    /// Returns the input untouched when the pattern does not occur.
    fn apply<'t>(&self, text: Cow<'t, str>) -> Cow<'t, str> {
        if self.finder.find(text.as_bytes()).is_none() {
            return text;
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0usize;

        // Both the pattern and the haystack are valid UTF-8, so a byte-level
        // match always starts and ends on a code point boundary.
        for pos in self.finder.find_iter(text.as_bytes()) {
            out.push_str(&text[last..pos]);
            out.push_str(&self.replacement);
            last = pos + self.pattern.len();
        }
        out.push_str(&text[last..]);

        Cow::Owned(out)
    }
}

/// Literal substring substitution from a user-supplied table.
///
/// Each pattern replaces all of its non-overlapping occurrences. Patterns are
/// applied one after another, longest first with ties broken by byte order,
/// so the result is deterministic even though the table itself is unordered.
///
/// The caller is still expected to supply a table where no key contains
/// another and no replacement creates a match for a different key. A table
/// that breaks this rule produces well-defined but probably unwanted output;
/// [`MappingCharFilter::conflicts`] reports such keys.
///
/// Empty patterns are skipped.
///
/// # Examples
///
/// ```
/// use kanafold_core::analyzer::MappingCharFilter;
/// use kanafold_types::CharFilter;
///
/// let f = MappingCharFilter::new([("１", "一"), ("２", "二")]);
/// assert_eq!(f.filter("１２３"), "一二３");
/// ```
#[derive(Default)]
pub struct MappingCharFilter {
    rules: Vec<Rule>,
}

impl MappingCharFilter {
    /// Compiles a mapping table into a filter.
    ///
    /// Duplicate patterns keep the last replacement seen.
    pub fn new<I, K, V>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table: FxHashMap<String, String> = mappings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        let mut pairs: Vec<(String, String)> = table.into_iter().collect();
        pairs.sort_unstable_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            rules: pairs
                .into_iter()
                .map(|(pattern, replacement)| Rule::new(pattern, replacement))
                .collect(),
        }
    }

    /// Compiles a borrowed [`MappingTable`].
    pub fn from_table(table: &MappingTable) -> Self {
        Self::new(table.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Number of active rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the filter has no rules and is a no-op.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Patterns in application order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.pattern.as_str())
    }

    /// Pairs `(outer, inner)` where key `outer` contains key `inner`.
    ///
    /// Such tables violate the non-overlap contract. Filtering is unaffected.
    pub fn conflicts(&self) -> Vec<(&str, &str)> {
        let mut found = Vec::new();
        for (i, outer) in self.rules.iter().enumerate() {
            for (j, inner) in self.rules.iter().enumerate() {
                if i != j && inner.finder.find(outer.pattern.as_bytes()).is_some() {
                    found.push((outer.pattern.as_str(), inner.pattern.as_str()));
                }
            }
        }
        found
    }
}

impl std::fmt::Debug for MappingCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|r| (&r.pattern, &r.replacement)))
            .finish()
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, text: &str) -> String {
        let mut current = Cow::Borrowed(text);
        for rule in &self.rules {
            current = rule.apply(current);
        }
        current.into_owned()
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::Mapping
    }
}
