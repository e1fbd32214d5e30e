use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use crate::content::loader::parse_article;
use crate::content::{Article, Slug};
use crate::error::LoadError;

/// Raw bytes of one article as found on disk, before parsing.
#[derive(Debug)]
pub struct ArticleFile {
    pub slug: Slug,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ArticleFile {
    pub fn from_file(slug: Slug, file_path: PathBuf) -> io::Result<ArticleFile> {
        if !is_article_file(&file_path) {
            return Err(io::Error::new(
                ErrorKind::Unsupported,
                format!("Not a markdown article: {}", file_path.display()),
            ));
        }

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ArticleFile {
            slug,
            file_path,
            raw_content,
        })
    }

    pub fn parse(&self) -> Result<Article, LoadError> {
        parse_article(self.slug.clone(), &self.file_path, &self.raw_content)
    }
}

fn is_article_file(file_name: &PathBuf) -> bool {
    match file_name.to_str() {
        Some(x) => x.ends_with(".md"),
        None => false,
    }
}
