//! Relation binding between a dependent record and its parent collection.
//!
//! Save side: a selected foreign-key value is swapped for the full parent
//! record found in the locally loaded collection. Read side: the embedded
//! parent yields its id back as the selection value. No request is made; a
//! stale or unloaded parent collection silently binds nothing.

use crate::{Crawler, EntityId, Filters, Resource};

/// First parent whose id, as text, equals `selected`.
pub fn resolve_selection<'a, P: Resource>(selected: &str, parents: &'a [P]) -> Option<&'a P> {
    if selected.is_empty() {
        return None;
    }
    parents
        .iter()
        .find(|parent| parent.id().is_some_and(|id| id.to_string() == selected))
}

/// Text value a selection control shows for an embedded parent.
pub fn selection_value<P: Resource>(parent: Option<&P>) -> String {
    parent
        .and_then(P::id)
        .map(|id| id.to_string())
        .unwrap_or_default()
}

impl Filters {
    /// Attaches the crawler matching `selected` from `crawlers`, or clears the
    /// reference when nothing matches.
    pub fn bind_crawler(mut self, selected: &str, crawlers: &[Crawler]) -> Self {
        self.crawler = resolve_selection(selected, crawlers).cloned();
        self
    }

    pub fn crawler_id(&self) -> Option<EntityId> {
        self.crawler.as_ref().and_then(|crawler| crawler.id)
    }

    pub fn crawler_selection(&self) -> String {
        selection_value(self.crawler.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crawlers() -> Vec<Crawler> {
        vec![
            Crawler::new("a", 1, "s1").with_id(1),
            Crawler::new("c", 3, "s3").with_id(3),
        ]
    }

    #[test]
    fn empty_selection_binds_nothing() {
        assert_eq!(resolve_selection("", &crawlers()), None);
    }

    #[test]
    fn match_is_on_exact_text() {
        assert_eq!(resolve_selection(" 3", &crawlers()), None);
        assert_eq!(resolve_selection("3", &crawlers()).and_then(|c| c.id), Some(3));
    }

    #[test]
    fn parent_without_id_never_matches() {
        let parents = vec![Crawler::new("draft", 0, "s")];
        assert_eq!(resolve_selection("0", &parents), None);
    }

    #[test]
    fn selection_round_trips_through_reference() {
        let filters = Filters::default().bind_crawler("1", &crawlers());
        assert_eq!(filters.crawler_id(), Some(1));
        assert_eq!(filters.crawler_selection(), "1");
        assert_eq!(Filters::default().crawler_selection(), "");
    }
}
