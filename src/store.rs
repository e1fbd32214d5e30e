use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use spdlog::warn;

use crate::content::article_file::ArticleFile;
use crate::content::{Article, Slug};
use crate::error::LoadError;
use crate::scan::ArticleScan;

/// Immutable snapshot of loaded articles, keyed by slug. Queries never see
/// the store change underneath them.
pub struct ArticleStore {
    articles: HashMap<Slug, Article>,
    // (publication date, slug), newest first once sorted
    order: Vec<(DateTime<FixedOffset>, Slug)>,
}

pub struct LoadFailure {
    pub file: PathBuf,
    pub error: LoadError,
}

/// Result of a bulk load: the store plus the articles that did not make it.
/// One bad file never aborts the rest of the load.
pub struct LoadOutcome {
    pub store: ArticleStore,
    pub failures: Vec<LoadFailure>,
}

impl ArticleStore {
    pub fn new() -> ArticleStore {
        ArticleStore {
            articles: Default::default(),
            order: Default::default(),
        }
    }

    /// Adds one article. A slug already present is rejected with
    /// [`LoadError::DuplicateSlug`]; the article loaded first wins.
    pub fn add(&mut self, article: Article) -> Result<(), LoadError> {
        let slug = article.header.slug.clone();
        if let Some(kept) = self.articles.get(&slug) {
            return Err(LoadError::DuplicateSlug {
                slug,
                kept: kept.header.file_name.clone(),
                rejected: article.header.file_name.clone(),
            });
        }

        self.order.push((article.header.published_at, slug.clone()));
        self.articles.insert(slug, article);
        Ok(())
    }

    /// Orders the store newest first. `sort_by` is stable, so articles
    /// sharing a publication instant keep their insertion order.
    pub fn sort(&mut self) {
        self.order.sort_by(|a, b| {
            let (da, _) = a;
            let (db, _) = b;
            db.cmp(da)
        });
    }

    pub fn get(&self, slug: &Slug) -> Option<&Article> {
        self.articles.get(slug)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub(crate) fn ordered(&self) -> &[(DateTime<FixedOffset>, Slug)] {
        &self.order
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans `root_dir` and loads every article found into a fresh store.
/// Malformed articles and duplicate slugs are reported in the outcome and
/// logged, without touching the articles that loaded cleanly.
pub fn load_store(root_dir: &Path, article_file: &str) -> io::Result<LoadOutcome> {
    let scan = ArticleScan {
        root_dir: root_dir.to_path_buf(),
        article_file: article_file.to_string(),
    };
    let sources = scan.sources()?;

    let mut store = ArticleStore::new();
    let mut failures = vec![];

    for source in sources {
        let loaded = ArticleFile::from_file(source.slug.clone(), source.file_path.clone())
            .map_err(LoadError::from)
            .and_then(|file| file.parse())
            .and_then(|article| store.add(article));

        if let Err(error) = loaded {
            warn!("Skipping {}: {}", source.file_path.display(), error);
            failures.push(LoadFailure {
                file: source.file_path,
                error,
            });
        }
    }

    store.sort();
    Ok(LoadOutcome { store, failures })
}
