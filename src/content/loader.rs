use std::path::Path;

use crate::content::body::parse_body;
use crate::content::parsing_utils::{parse_article_header, render_article_header};
use crate::content::{Article, ArticleHeader, Slug};
use crate::error::LoadError;

/// Pure transformation of one raw text blob into an [`Article`]. The slug is
/// assigned by the caller since identity comes from the file path, not from
/// the text itself.
pub fn parse_article(slug: Slug, file_name: &Path, raw: &str) -> Result<Article, LoadError> {
    let (parsed, mut lines, mut maybe_line) = parse_article_header(file_name, raw.lines())?;

    // Blank lines between the header block and the body are separators,
    // not body content
    while let Some(line) = maybe_line {
        if !line.trim().is_empty() {
            break;
        }
        maybe_line = lines.next();
    }

    let body = parse_body(maybe_line.into_iter().chain(lines));

    Ok(Article {
        header: ArticleHeader {
            file_name: file_name.to_path_buf(),
            slug,
            title: parsed.title,
            published_at: parsed.published_at,
            draft: parsed.draft,
            categories: parsed.categories,
            tags: parsed.tags,
        },
        body,
    })
}

/// Inverse of [`parse_article`]: re-loading the returned text yields an equal
/// record, metadata and body.
pub fn serialize_article(article: &Article) -> String {
    let mut buf = render_article_header(&article.header);
    buf.push('\n');
    buf.push_str(&article.body.to_string());
    buf
}
