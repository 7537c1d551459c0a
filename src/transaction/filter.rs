//! Filter values that select which transactions an operation applies to.

use crate::transaction::DateRange;

/// A free-text search term, along with its numeric reading when it has one.
///
/// A term that parses as a finite number matches on exact price as well, so
/// searching "150" finds transactions priced at 150.00 even when neither text
/// field mentions 150.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Parses `raw` into a search term, or `None` when `raw` is empty.
    ///
    /// A term that does not parse as a number is not an error, it matches on
    /// the text fields only.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let price = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Some(Self {
            text: raw.to_owned(),
            price,
        })
    }

    /// The text to match against title and description.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The term read as a price, when the whole term is a finite number.
    pub fn price(&self) -> Option<f64> {
        self.price
    }
}

/// Selects the transactions an operation applies to.
///
/// The default filter matches every transaction. The same filter value drives
/// the listing and all aggregations, so a month/search combination means the
/// same set of transactions everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Restrict matches to sales within the range, inclusive on both ends.
    pub date_range: Option<DateRange>,
    /// Restrict matches to a title/description substring or an exact price.
    pub search: Option<SearchTerm>,
}

impl TransactionFilter {
    /// Builds a filter from an optional date range and an optional raw search
    /// term. An empty search term means no search restriction.
    pub fn new(date_range: Option<DateRange>, search_term: Option<&str>) -> Self {
        Self {
            date_range,
            search: search_term.and_then(SearchTerm::parse),
        }
    }
}


#[cfg(test)]
mod transaction_filter_tests {
    use super::TransactionFilter;

    #[test]
    fn default_filter_has_no_restrictions() {
        let filter = TransactionFilter::default();

        assert_eq!(filter.date_range, None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn empty_search_term_means_no_search_restriction() {
        let filter = TransactionFilter::new(None, Some(""));

        assert_eq!(filter.search, None);
    }
}
