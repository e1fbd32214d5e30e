use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::content::{Article, ArticleHeader, Slug};
use crate::store::ArticleStore;

/// Filter criteria for a listing. All supplied filters must match, and
/// drafts only appear when `include_drafts` is set.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub include_drafts: bool,
}

/// Lazy walk over the store in publication order, newest first. The store
/// is an immutable snapshot, so calling [`ArticleStore::list`] again (or
/// cloning an unconsumed listing) restarts the same sequence.
#[derive(Clone)]
pub struct Listing<'a> {
    store: &'a ArticleStore,
    order: std::slice::Iter<'a, (DateTime<FixedOffset>, Slug)>,
    query: ListQuery,
}

impl<'a> Iterator for Listing<'a> {
    type Item = &'a Article;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (_, slug) = self.order.next()?;
            let Some(article) = self.store.get(slug) else {
                continue;
            };
            if self.query.matches(&article.header) {
                return Some(article);
            }
        }
    }
}

impl ListQuery {
    fn matches(&self, header: &ArticleHeader) -> bool {
        if header.draft && !self.include_drafts {
            return false;
        }
        if let Some(ref category) = self.category {
            if !header.categories.contains(category) {
                return false;
            }
        }
        if let Some(ref tag) = self.tag {
            if !header.tags.contains(tag) {
                return false;
            }
        }
        true
    }
}

impl ArticleStore {
    /// Articles matching `query`, newest first. Empty store or no match is
    /// an empty sequence, not an error.
    pub fn list(&self, query: &ListQuery) -> Listing<'_> {
        Listing {
            store: self,
            order: self.ordered().iter(),
            query: query.clone(),
        }
    }

    /// Tag usage across non-draft articles, most used first.
    pub fn tag_counts(&self) -> Vec<(String, u32)> {
        self.label_counts(|header| &header.tags)
    }

    /// Category usage across non-draft articles, most used first.
    pub fn category_counts(&self) -> Vec<(String, u32)> {
        self.label_counts(|header| &header.categories)
    }

    fn label_counts<F>(&self, labels: F) -> Vec<(String, u32)>
    where
        F: Fn(&ArticleHeader) -> &Vec<String>,
    {
        let mut census: HashMap<String, u32> = HashMap::new();
        for article in self.list(&ListQuery::default()) {
            for label in labels(&article.header).iter() {
                *census.entry(label.clone()).or_insert(0) += 1;
            }
        }

        // Most used labels first; the name untangles equal counts
        let mut counts: Vec<(String, u32)> = census.into_iter().collect();
        counts.sort_by(|a, b| {
            let (la, va) = a;
            let (lb, vb) = b;
            vb.cmp(va).then_with(|| la.cmp(lb))
        });
        counts
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::content::loader::parse_article;
    use crate::test_data::{MESSAGEPIPE_DRAFT, SCALA_NOTES, UNITASK_ARTICLE, VCONTAINER_ARTICLE};

    use super::*;

    fn sample_store() -> ArticleStore {
        let mut store = ArticleStore::new();
        for (slug, raw) in [
            ("vcontainer_scopes", VCONTAINER_ARTICLE),
            ("unitask_basics", UNITASK_ARTICLE),
            ("messagepipe_event_bus", MESSAGEPIPE_DRAFT),
            ("pattern_matching_notes", SCALA_NOTES),
        ] {
            let file = PathBuf::from(format!("articles/{}.md", slug));
            store
                .add(parse_article(Slug(slug.to_string()), &file, raw).unwrap())
                .unwrap();
        }
        store.sort();
        store
    }

    fn slugs(listing: Listing<'_>) -> Vec<String> {
        listing.map(|a| a.header.slug.0.clone()).collect()
    }

    #[test]
    fn test_newest_first() {
        let store = sample_store();
        let listed = slugs(store.list(&ListQuery::default()));
        // 2022-02-25 before 2022-02-24, draft excluded
        assert_eq!(
            listed,
            ["unitask_basics", "vcontainer_scopes", "pattern_matching_notes"]
        );
    }

    #[test]
    fn test_drafts_hidden_by_default() {
        let store = sample_store();
        let query = ListQuery::default();
        assert!(store.list(&query).all(|a| !a.header.draft));

        let query = ListQuery {
            include_drafts: true,
            ..Default::default()
        };
        let listed = slugs(store.list(&query));
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[0], "messagepipe_event_bus");
    }

    #[test]
    fn test_tag_filter() {
        let store = sample_store();
        let query = ListQuery {
            tag: Some("Unity".to_string()),
            ..Default::default()
        };
        let listed = slugs(store.list(&query));
        assert_eq!(listed, ["unitask_basics", "vcontainer_scopes"]);

        let query = ListQuery {
            tag: Some("Scala".to_string()),
            ..Default::default()
        };
        assert_eq!(slugs(store.list(&query)), ["pattern_matching_notes"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let store = sample_store();
        let query = ListQuery {
            category: Some("unity".to_string()),
            tag: Some("VContainer".to_string()),
            include_drafts: false,
        };
        assert_eq!(slugs(store.list(&query)), ["vcontainer_scopes"]);

        let query = ListQuery {
            category: Some("jvm".to_string()),
            tag: Some("Unity".to_string()),
            ..Default::default()
        };
        assert!(slugs(store.list(&query)).is_empty());
    }

    #[test]
    fn test_no_match_and_empty_store_yield_empty() {
        let store = sample_store();
        let query = ListQuery {
            tag: Some("Haskell".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list(&query).count(), 0);

        let empty = ArticleStore::new();
        assert_eq!(empty.list(&ListQuery::default()).count(), 0);
    }

    #[test]
    fn test_listing_restarts() {
        let store = sample_store();
        let query = ListQuery::default();

        let first_pass = slugs(store.list(&query));
        let second_pass = slugs(store.list(&query));
        assert_eq!(first_pass, second_pass);

        // A clone taken before consumption replays the sequence too
        let listing = store.list(&query);
        let replay = listing.clone();
        assert_eq!(listing.count(), replay.count());
    }

    #[test]
    fn test_date_ties_keep_insertion_order() {
        let raw_a = "[TITLE]: # (First in)\n[DATE]: # (2022-04-02 12:00:00)\n\nA.\n";
        let raw_b = "[TITLE]: # (Second in)\n[DATE]: # (2022-04-02 12:00:00)\n\nB.\n";
        let raw_c = "[TITLE]: # (Older)\n[DATE]: # (2022-04-01 12:00:00)\n\nC.\n";

        let mut store = ArticleStore::new();
        for (slug, raw) in [("first_in", raw_a), ("second_in", raw_b), ("older", raw_c)] {
            let file = PathBuf::from(format!("articles/{}.md", slug));
            store
                .add(parse_article(Slug(slug.to_string()), &file, raw).unwrap())
                .unwrap();
        }
        store.sort();

        let listed = slugs(store.list(&ListQuery::default()));
        assert_eq!(listed, ["first_in", "second_in", "older"]);
    }

    #[test]
    fn test_label_census() {
        let store = sample_store();

        // Draft's MessagePipe tag must not show up
        let tags = store.tag_counts();
        assert_eq!(
            tags,
            [
                ("Unity".to_string(), 2),
                ("Scala".to_string(), 1),
                ("UniTask".to_string(), 1),
                ("VContainer".to_string(), 1),
            ]
        );

        let categories = store.category_counts();
        assert_eq!(
            categories,
            [
                ("csharp".to_string(), 1),
                ("jvm".to_string(), 1),
                ("unity".to_string(), 1),
            ]
        );
    }
}
