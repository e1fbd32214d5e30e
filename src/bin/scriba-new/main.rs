use std::fmt::{Display, Formatter, Write};
use std::fs::{create_dir, File};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Title of the article
    #[arg(short, long)]
    title: Option<String>,

    /// Space-separated tags for the TAGS line
    #[arg(long)]
    tags: Option<String>,

    /// Space-separated categories for the CATEGORIES line
    #[arg(long)]
    categories: Option<String>,

    /// Mark the new article as a draft
    #[arg(short, long)]
    draft: bool,

    /// Article generation options
    #[arg(short, long, default_value_t = Output::Stdout)]
    output: Output,
}

#[derive(Clone, Debug, ValueEnum)]
enum Output {
    /// Writes the new article to stdout
    Stdout,
    /// Writes the new article to a <slug>.md file (articles without images)
    File,
    /// Writes the new article to a <slug>/index.md directory (articles with images)
    Dir,
}

impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Output::Stdout => "stdout",
            Output::File => "file",
            Output::Dir => "dir",
        };
        write!(f, "{}", name)
    }
}

fn render_header(
    title: Option<&str>,
    date: &str,
    draft: bool,
    categories: &str,
    tags: &str,
) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "<!--");
    let _ = writeln!(&mut buf, "[TITLE]: # ({})", title.unwrap_or("Replace with title"));
    let _ = writeln!(&mut buf, "[DATE]: # ({})", date);
    let _ = writeln!(&mut buf, "[DRAFT]: # ({})", draft);
    let _ = writeln!(&mut buf, "[CATEGORIES]: # ({})", categories);
    let _ = writeln!(&mut buf, "[TAGS]: # ({})", tags);
    let _ = writeln!(&mut buf, "-->");

    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example.");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content.");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Keep code in fences labeled with a language:");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "```csharp");
    let _ = writeln!(&mut buf, "// code goes here");
    let _ = writeln!(&mut buf, "```");

    buf
}

fn article_slug_from_title(title: &str, date: &DateTime<Local>) -> String {
    let alpha_chars: String = title
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ')
        .map(|c| if c == ' ' { '_' } else { c })
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut slug = String::new();
    let mut prev_char = None;

    for c in alpha_chars.chars() {
        if c != '_' || prev_char != Some('_') {
            slug.push(c);
        }
        prev_char = Some(c);
    }

    let slug = unidecode::unidecode(&slug);
    let date = date.format("%Y%m%d");

    format!("{}_{}", date, slug)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let date = Local::now();
    let date_str = date.format("%Y-%m-%d %H:%M:%S %:z").to_string();

    let req_title = !matches!(args.output, Output::Stdout);
    if req_title && args.title.is_none() {
        bail!("For file and dir outputs, title is required");
    }

    let header = render_header(
        args.title.as_deref(),
        &date_str,
        args.draft,
        args.categories.as_deref().unwrap_or(""),
        args.tags.as_deref().unwrap_or(""),
    );
    let body = render_body();

    match args.output {
        Output::Stdout => {
            print!("{}", header);
            print!("{}", body);
        }
        Output::File => {
            use std::io::Write;
            let slug = article_slug_from_title(args.title.as_deref().unwrap_or(""), &date);
            let file_name = format!("{}.md", slug);
            println!("Creating file {}", file_name);
            let mut file =
                File::create(&file_name).with_context(|| format!("creating {}", file_name))?;
            file.write_all(header.as_bytes())?;
            file.write_all(body.as_bytes())?;
        }
        Output::Dir => {
            use std::io::Write;
            let slug = article_slug_from_title(args.title.as_deref().unwrap_or(""), &date);
            let full_path: PathBuf = PathBuf::from(&slug).join("index.md");
            println!("Creating dir article {}", full_path.display());
            create_dir(&slug).with_context(|| format!("creating directory {}", slug))?;
            let mut file = File::create(&full_path)
                .with_context(|| format!("creating {}", full_path.display()))?;
            file.write_all(header.as_bytes())?;
            file.write_all(body.as_bytes())?;
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;
    use scriba::content::loader::parse_article;
    use scriba::content::Slug;

    use super::*;

    #[test]
    fn test_skeleton_loads_back() {
        let header = render_header(
            Some("Saving assets from editor scripts"),
            "2024-02-27 06:20:53 +00:00",
            true,
            "unity",
            "Unity EditorScript",
        );
        let raw = format!("{}{}", header, render_body());

        let article = parse_article(
            Slug("saving_assets".to_string()),
            &PathBuf::from("saving_assets.md"),
            &raw,
        )
        .unwrap();

        assert_eq!(article.header.title, "Saving assets from editor scripts");
        assert!(article.header.draft);
        assert_eq!(article.header.categories, ["unity"]);
        assert_eq!(article.header.tags, ["Unity", "EditorScript"]);
        assert_eq!(article.body.code_languages(), ["csharp"]);
    }

    #[test]
    fn test_slug_from_title() {
        let date = Local.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let title = "Article title of mine ábaco - dir2";
        let slug = article_slug_from_title(title, &date);
        assert_eq!(slug, "20240229_article_title_of_mine_abaco_dir2");
    }
}
