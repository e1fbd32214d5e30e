use std::fmt::Write;
use std::path::Path;
use std::str::Lines;

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

use crate::content::ArticleHeader;
use crate::error::LoadError;
use crate::text_utils::{format_header_date, parse_offset_date_time};

/// Header fields as authored, before the store assigns the slug.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHeader {
    pub title: String,
    pub published_at: DateTime<FixedOffset>,
    pub draft: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Parses the `[KEY]: # (value)` metadata block, optionally wrapped in an
/// HTML comment. Returns the parsed fields, the line iterator positioned
/// after the block and the first unconsumed line.
pub fn parse_article_header<'a>(
    file_name: &Path,
    lines: Lines<'a>,
) -> Result<(ParsedHeader, Lines<'a>, Option<&'a str>), LoadError> {
    let mut title: String = "".to_string();
    let mut date: String = "".to_string();
    let mut draft: String = "".to_string();
    let mut categories: String = "".to_string();
    let mut tags: String = "".to_string();
    let mut keys_seen = 0;

    let mut lines = lines;
    let mut maybe_line = lines.next();

    // Skip optional HTML comment in the beginning
    let mut start_with_comment = false;

    loop {
        if let Some(line) = maybe_line {
            let line = line.trim();

            // Empty lines are ok
            if line.is_empty() {
                maybe_line = lines.next();
                continue;
            }

            if line == "<!--" {
                maybe_line = lines.next();
                start_with_comment = true;
            }
            break;
        } else {
            break;
        }
    }

    loop {
        if let Some(line) = maybe_line {
            if line.is_empty() {
                maybe_line = lines.next();
                continue;
            }

            let (key, val) = match extract_header_entry(line) {
                None => break,
                Some((k, v)) => (k, v),
            };

            keys_seen += 1;
            match key {
                "TITLE" => title = val.to_string(),
                "DATE" => date = val.to_string(),
                "DRAFT" => draft = val.to_string(),
                "CATEGORIES" => categories = val.to_string(),
                "TAGS" => tags = val.to_string(),
                _ => {}
            }
        } else {
            break;
        }
        maybe_line = lines.next();
    }

    if start_with_comment {
        // Let's find the end of the comment
        loop {
            if let Some(line) = maybe_line {
                let line = line.trim();

                // Empty lines are ok.
                if line.is_empty() {
                    maybe_line = lines.next();
                    continue;
                }

                if line == "-->" {
                    maybe_line = lines.next();
                    break;
                }
            } else {
                return Err(LoadError::UnterminatedComment {
                    file: file_name.to_path_buf(),
                });
            }

            maybe_line = lines.next();
        }
    }

    if keys_seen == 0 {
        return Err(LoadError::MissingHeader {
            file: file_name.to_path_buf(),
        });
    }
    if title.is_empty() {
        return Err(LoadError::MissingField {
            field: "TITLE",
            file: file_name.to_path_buf(),
        });
    }
    if date.is_empty() {
        return Err(LoadError::MissingField {
            field: "DATE",
            file: file_name.to_path_buf(),
        });
    }

    let published_at = match parse_offset_date_time(&date) {
        Ok(d) => d,
        Err(reason) => {
            return Err(LoadError::InvalidDate {
                value: date,
                reason,
                file: file_name.to_path_buf(),
            })
        }
    };

    let header = ParsedHeader {
        title,
        published_at,
        draft: draft.trim().eq_ignore_ascii_case("true"),
        categories: extract_labels(&categories),
        tags: extract_labels(&tags),
    };

    Ok((header, lines, maybe_line))
}

/// Inverse of [`parse_article_header`]: the comment-wrapped metadata block,
/// empty label lists included so re-authoring keeps the skeleton visible.
pub fn render_article_header(header: &ArticleHeader) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "<!--");
    let _ = writeln!(&mut buf, "[TITLE]: # ({})", header.title);
    let _ = writeln!(&mut buf, "[DATE]: # ({})", format_header_date(&header.published_at));
    let _ = writeln!(&mut buf, "[DRAFT]: # ({})", header.draft);
    let _ = writeln!(&mut buf, "[CATEGORIES]: # ({})", header.categories.join(" "));
    let _ = writeln!(&mut buf, "[TAGS]: # ({})", header.tags.join(" "));
    let _ = writeln!(&mut buf, "-->");

    buf
}

pub fn extract_labels(labels_str: &str) -> Vec<String> {
    labels_str
        .split(' ')
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn extract_header_entry(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref HEADER_REGEX: Regex = Regex::new(r"\[(?P<key>\w+)\]: # \((?P<value>.*)\)").unwrap();
    }

    let res = HEADER_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|key| key.as_str());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None,
        }
    });

    res
}
