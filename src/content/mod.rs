use std::fmt;
use std::fmt::Formatter;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub mod article_file;
pub mod body;
pub mod loader;
pub mod parsing_utils;

use crate::content::body::Body;

/// Metadata block of one article, as authored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleHeader {
    #[serde(skip)]
    pub file_name: PathBuf,
    pub slug: Slug,
    pub title: String,
    pub published_at: DateTime<FixedOffset>,
    pub draft: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// One authored post: header metadata plus the segmented body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub header: ArticleHeader,
    pub body: Body,
}

/// Store-wide identity of an article, derived from its file path.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slug={}, date={}, draft={}\ntitle={}\nbody:\n{}",
            self.header.slug,
            self.header.published_at,
            self.header.draft,
            self.header.title,
            self.body
        )
    }
}
