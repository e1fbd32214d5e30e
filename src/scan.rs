use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::content::Slug;

/// One article located on disk, not yet loaded.
#[derive(Debug)]
pub struct ArticleSource {
    pub slug: Slug,
    pub file_path: PathBuf,
}

/// Walks a root directory for articles. Two layouts are recognized:
/// `<slug>/<article_file>` for articles that carry companion files, and flat
/// `<slug>.md` files directly under the root. Anything else is skipped.
pub struct ArticleScan {
    pub root_dir: PathBuf,
    pub article_file: String,
}

impl ArticleScan {
    /// Every article source under the root, sorted by slug so load order
    /// (and with it, tie-breaking in listings) does not depend on the
    /// platform's directory iteration order.
    pub fn sources(&self) -> io::Result<Vec<ArticleSource>> {
        let mut sources = self.dir_sources()?;
        sources.extend(self.flat_sources()?);
        sources.sort_by(|a, b| a.slug.0.cmp(&b.slug.0));
        Ok(sources)
    }

    fn flat_sources(&self) -> io::Result<Vec<ArticleSource>> {
        let mut sources = vec![];
        for entry in fs::read_dir(self.root_dir.as_path())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_path = entry.path();
            let Some(file_name) = file_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".md") {
                continue;
            }
            let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            sources.push(ArticleSource {
                slug: Slug(stem.to_string()),
                file_path: file_path.clone(),
            });
        }
        Ok(sources)
    }

    fn dir_sources(&self) -> io::Result<Vec<ArticleSource>> {
        let mut sources = vec![];
        for dir in Self::list_dirs(self.root_dir.as_path())? {
            if !Self::contains_file(&dir, &self.article_file)? {
                continue;
            }
            let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            sources.push(ArticleSource {
                slug: Slug(dir_name.to_string()),
                file_path: dir.join(&self.article_file),
            });
        }
        Ok(sources)
    }

    fn list_dirs(root_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = vec![];
        for entry in fs::read_dir(root_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn contains_file(dir: &Path, base_name: &str) -> io::Result<bool> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if entry.file_name().to_str() == Some(base_name) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_sample_articles() -> io::Result<()> {
        let scan = ArticleScan {
            root_dir: PathBuf::from("res/articles"),
            article_file: "index.md".to_string(),
        };

        let sources = scan.sources()?;
        let slugs: Vec<&str> = sources.iter().map(|s| s.slug.0.as_str()).collect();
        assert_eq!(
            slugs,
            [
                "20220110_pattern_matching_notes",
                "20220224_vcontainer_scopes",
                "20220225_unitask_basics",
                "20220305_messagepipe_event_bus",
            ]
        );

        // Directory articles resolve to their article file, flat ones to themselves
        let vcontainer = &sources[1];
        assert!(vcontainer.file_path.ends_with("20220224_vcontainer_scopes/index.md"));
        let unitask = &sources[2];
        assert!(unitask.file_path.ends_with("20220225_unitask_basics.md"));
        Ok(())
    }
}
