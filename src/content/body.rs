use std::fmt;
use std::fmt::Formatter;

use serde::Serialize;

/// Body of an article: prose interleaved with fenced, language-tagged code
/// blocks. Fences with no language label are not code segments and stay in
/// the surrounding prose.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Body {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Code { language: String, source: String },
}

impl Body {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Language labels of every code segment, in body order.
    pub fn code_languages(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Code { language, .. } => Some(language.as_str()),
                Segment::Text { .. } => None,
            })
            .collect()
    }
}

/// Splits body lines into prose and code segments. A code segment opens at a
/// line starting with ``` followed by a language label and closes at the next
/// bare ``` line; an unterminated fence runs to the end of the input.
pub fn parse_body<'a, I>(lines: I) -> Body
where
    I: Iterator<Item = &'a str>,
{
    let mut lines = lines;
    let mut segments = vec![];
    let mut text = String::new();

    while let Some(line) = lines.next() {
        let Some(language) = fence_language(line) else {
            text.push_str(line);
            text.push('\n');
            continue;
        };

        flush_text(&mut segments, &mut text);

        let mut source = String::new();
        for code_line in lines.by_ref() {
            if code_line.trim_end() == "```" {
                break;
            }
            source.push_str(code_line);
            source.push('\n');
        }
        segments.push(Segment::Code { language, source });
    }

    flush_text(&mut segments, &mut text);
    Body { segments }
}

fn flush_text(segments: &mut Vec<Segment>, text: &mut String) {
    if !text.is_empty() {
        segments.push(Segment::Text {
            text: std::mem::take(text),
        });
    }
}

fn fence_language(line: &str) -> Option<String> {
    let rest = line.strip_prefix("```")?;
    let language = rest.trim().split_whitespace().next()?;
    // Labels like c#, c++, objective-c; a stray backtick is not a language
    if !language
        .chars()
        .all(|c| c.is_alphanumeric() || "+-#_.".contains(c))
    {
        return None;
    }
    Some(language.to_string())
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text { text } => f.write_str(text)?,
                Segment::Code { language, source } => {
                    writeln!(f, "```{}", language)?;
                    f.write_str(source)?;
                    writeln!(f, "```")?;
                }
            }
        }
        Ok(())
    }
}
