use kanafold_types::{CharFilter, FilterKind};

/// An ordered chain of filters, itself a filter.
///
/// Each filter receives the previous filter's output. The chain is fixed at
/// construction; [`CompositeCharFilter::then`] consumes the chain and
/// returns a longer one, so a built chain can be shared freely.
///
/// Composites nest: a composite may contain other composites.
///
/// # Examples
///
/// ```
/// use kanafold_core::analyzer::{CompositeCharFilter, LowercaseFilter, WhitespaceNormalizationFilter};
/// use kanafold_types::CharFilter;
///
/// let chain = CompositeCharFilter::default()
///     .then(WhitespaceNormalizationFilter)
///     .then(LowercaseFilter);
///
/// assert_eq!(chain.filter("  HELLO   WORLD "), "hello world");
/// ```
#[derive(Default)]
pub struct CompositeCharFilter {
    filters: Vec<Box<dyn CharFilter>>,
}

impl CompositeCharFilter {
    /// Creates a chain from filters in application order.
    pub fn new(filters: Vec<Box<dyn CharFilter>>) -> Self {
        Self { filters }
    }

    /// Appends a filter to the end of the chain.
    #[must_use]
    pub fn then<F: CharFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the chain (nested composites count once).
    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True for an empty chain, which returns its input unchanged.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Stage kinds in application order.
    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.filters.iter().map(|f| f.kind())
    }
}

impl std::fmt::Debug for CompositeCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

impl CharFilter for CompositeCharFilter {
    #[inline]
    fn filter(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.filter_into(text, &mut out);
        out
    }

    /// Threads `text` through every filter, ping-ponging between `out` and
    /// one scratch buffer.
    fn filter_into(&self, text: &str, out: &mut String) {
        out.clear();
        out.push_str(text);

        let mut scratch = String::with_capacity(text.len());
        for filter in &self.filters {
            filter.filter_into(out.as_str(), &mut scratch);
            std::mem::swap(out, &mut scratch);
        }
    }

    #[inline]
    fn kind(&self) -> FilterKind {
        FilterKind::Composite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{
        LowercaseFilter, MappingCharFilter, PunctuationRemovalFilter,
        WhitespaceNormalizationFilter,
    };

    #[test]
    fn empty_chain_is_identity() {
        let chain = CompositeCharFilter::default();
        assert!(chain.is_empty());
        assert_eq!(chain.filter("Hello, World"), "Hello, World");
    }

    #[test]
    fn applies_in_order() {
        let map_then_lower = CompositeCharFilter::default()
            .then(MappingCharFilter::new([("A", "x")]))
            .then(LowercaseFilter);
        assert_eq!(map_then_lower.filter("Aa"), "xa");

        let lower_then_map = CompositeCharFilter::default()
            .then(LowercaseFilter)
            .then(MappingCharFilter::new([("A", "x")]));
        assert_eq!(lower_then_map.filter("Aa"), "aa");
    }

    #[test]
    fn nested_composites() {
        let inner = CompositeCharFilter::default()
            .then(PunctuationRemovalFilter)
            .then(WhitespaceNormalizationFilter);
        let outer = CompositeCharFilter::default()
            .then(LowercaseFilter)
            .then(inner);

        assert_eq!(outer.len(), 2);
        assert_eq!(outer.filter("HELLO , WORLD !"), "hello world");
    }

    #[test]
    fn kinds_in_order() {
        let filters: Vec<Box<dyn CharFilter>> = vec![
            Box::new(LowercaseFilter) as Box<dyn CharFilter>,
            Box::new(WhitespaceNormalizationFilter),
        ];
        let chain = CompositeCharFilter::new(filters);
        let kinds: Vec<FilterKind> = chain.kinds().collect();
        assert_eq!(
            kinds,
            [FilterKind::Lowercase, FilterKind::WhitespaceNormalization]
        );
        assert_eq!(chain.kind(), FilterKind::Composite);
    }

    #[test]
    fn filter_into_overwrites_buffer() {
        let chain = CompositeCharFilter::default().then(LowercaseFilter);
        let mut buf = String::from("leftover");
        chain.filter_into("ABC", &mut buf);
        assert_eq!(buf, "abc");
    }

    #[test]
    fn empty_input() {
        let chain = CompositeCharFilter::default()
            .then(LowercaseFilter)
            .then(WhitespaceNormalizationFilter);
        assert_eq!(chain.filter(""), "");
    }
}
