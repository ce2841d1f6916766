//! Event-table location strategies.
//!
//! The TMD page has changed its markup before, so the table lookup is an
//! explicitly ordered strategy chain rather than a single selector. New
//! fallbacks get appended here without touching any field parsing.

use scraper::{ElementRef, Html, Selector};

/// One way of finding the event table in a parsed document.
#[derive(Debug, Clone, Copy)]
pub enum TableStrategy {
    /// Match the table element directly by selector.
    Direct(&'static str),
    /// Match a known header row, then walk up to its enclosing table.
    HeaderAncestor(&'static str),
}

/// Tried in order; first hit wins.
pub const TABLE_STRATEGIES: [TableStrategy; 3] = [
    TableStrategy::Direct("table#table_inside.tbis"),
    TableStrategy::Direct("table.tbis"),
    TableStrategy::HeaderAncestor("tr.tbis1"),
];

/// Event rows alternate between two stripe classes.
pub const EVENT_ROW_SELECTOR: &str = "tr.tbis_leq1, tr.tbis_leq2";

impl TableStrategy {
    /// Apply this single strategy to a document.
    pub fn apply<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        match self {
            TableStrategy::Direct(css) => {
                let selector = Selector::parse(css).ok()?;
                document.select(&selector).next()
            }
            TableStrategy::HeaderAncestor(css) => {
                let selector = Selector::parse(css).ok()?;
                let header = document.select(&selector).next()?;
                header
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "table")
            }
        }
    }
}

/// Locate the event table by trying every strategy in order.
pub fn locate_event_table(document: &Html) -> Option<ElementRef<'_>> {
    TABLE_STRATEGIES.iter().find_map(|strategy| {
        let found = strategy.apply(document);
        if found.is_some() {
            tracing::debug!(?strategy, "event table located");
        }
        found
    })
}

/// All event data rows of a table, newest first (source-page ordering).
pub fn event_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    match Selector::parse(EVENT_ROW_SELECTOR) {
        Ok(selector) => table.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"<tr class="tbis_leq1"><td>x</td></tr>"#;

    #[test]
    fn direct_strategy_matches_id_and_class() {
        let html = format!(
            r#"<table class="tbis" id="table_inside">{ROW}</table>"#
        );
        let doc = Html::parse_document(&html);
        assert!(TABLE_STRATEGIES[0].apply(&doc).is_some());
    }

    #[test]
    fn class_only_strategy_matches_without_id() {
        let html = format!(r#"<table class="tbis">{ROW}</table>"#);
        let doc = Html::parse_document(&html);
        assert!(TABLE_STRATEGIES[0].apply(&doc).is_none());
        assert!(TABLE_STRATEGIES[1].apply(&doc).is_some());
    }

    #[test]
    fn header_row_strategy_finds_enclosing_table() {
        let html = format!(
            r#"<table><tr class="tbis1"><th>Date</th></tr>{ROW}</table>"#
        );
        let doc = Html::parse_document(&html);
        assert!(TABLE_STRATEGIES[0].apply(&doc).is_none());
        assert!(TABLE_STRATEGIES[1].apply(&doc).is_none());
        let table = TABLE_STRATEGIES[2].apply(&doc).expect("ancestor table");
        assert_eq!(table.value().name(), "table");
    }

    #[test]
    fn chain_returns_none_when_nothing_matches() {
        let doc = Html::parse_document("<div><p>no tables here</p></div>");
        assert!(locate_event_table(&doc).is_none());
    }

    #[test]
    fn event_rows_match_both_stripe_classes() {
        let html = r#"<table class="tbis">
            <tr class="tbis1"><th>Date</th></tr>
            <tr class="tbis_leq1"><td>a</td></tr>
            <tr class="tbis_leq2"><td>b</td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let table = locate_event_table(&doc).unwrap();
        assert_eq!(event_rows(table).len(), 2);
    }
}
