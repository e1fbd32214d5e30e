use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use scriba::config::{read_config, Config};
use scriba::content::{Article, Slug};
use scriba::listing::ListQuery;
use scriba::logger::configure_logger;
use scriba::paginator::Paginator;
use scriba::store::{load_store, LoadOutcome};
use scriba::text_utils::format_date_time;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// List articles, newest first
    List(ListArgs),
    /// Print one article
    Show(ShowArgs),
    /// Tag and category usage across the store
    Tags(CommonArgs),
    /// Load every article and report the ones that fail
    Check(CommonArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Only articles carrying this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Only articles in this category
    #[arg(short = 'C', long)]
    category: Option<String>,

    /// Include drafts in the listing
    #[arg(short, long)]
    drafts: bool,

    /// Page to show, 1-based
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Emit the page as JSON records instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Slug of the article to print
    slug: String,
}

/// Explicit flag first, then scriba.toml next to the current directory and
/// the executable, then the user config directory.
fn open_config(custom: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = custom {
        return read_config(&path).with_context(|| format!("reading {}", path.display()));
    }

    let mut candidates = vec![];
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join("scriba.toml"));
    }
    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("scriba.toml"));
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("scriba").join("scriba.toml"));
    }

    for candidate in &candidates {
        if candidate.is_file() {
            return read_config(candidate)
                .with_context(|| format!("reading {}", candidate.display()));
        }
    }

    Err(anyhow!(
        "no configuration file found, looked for: {}",
        candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

fn load(config: &Config) -> Result<LoadOutcome> {
    load_store(&config.paths.articles_dir, config.article_file_name()).with_context(|| {
        format!(
            "loading articles from {}",
            config.paths.articles_dir.display()
        )
    })
}

fn print_article_line(article: &Article) {
    let (date, time) = format_date_time(&article.header.published_at);
    let draft_mark = if article.header.draft { " [draft]" } else { "" };
    println!(
        "{} {}  {}  {}{}",
        date, time, article.header.slug, article.header.title, draft_mark
    );
}

fn list_cmd(args: ListArgs) -> Result<()> {
    let config = open_config(args.common.config)?;
    configure_logger(&config)?;
    let outcome = load(&config)?;

    let query = ListQuery {
        category: args.category,
        tag: args.tag,
        include_drafts: args.drafts || config.include_drafts(),
    };
    let articles: Vec<&Article> = outcome.store.list(&query).collect();

    let paginator = Paginator::from(&articles, config.defaults.page_size);
    if articles.is_empty() {
        if !args.json {
            println!("No articles match");
        } else {
            println!("[]");
        }
        return Ok(());
    }

    let page = paginator
        .get_page(args.page)
        .map_err(|reason| anyhow!(reason))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        for article in page {
            print_article_line(article);
        }
        if paginator.page_count() > 1 {
            println!("-- page {}/{}", args.page, paginator.page_count());
        }
    }

    Ok(())
}

fn show_cmd(args: ShowArgs) -> Result<()> {
    let config = open_config(args.common.config)?;
    configure_logger(&config)?;
    let outcome = load(&config)?;

    let slug = Slug(args.slug);
    let article = outcome
        .store
        .get(&slug)
        .ok_or_else(|| anyhow!("no article with slug '{}'", slug))?;

    println!("{}", article);
    Ok(())
}

fn tags_cmd(args: CommonArgs) -> Result<()> {
    let config = open_config(args.config)?;
    configure_logger(&config)?;
    let outcome = load(&config)?;

    println!("Tags:");
    for (tag, count) in outcome.store.tag_counts() {
        println!("  {:>4}  {}", count, tag);
    }
    println!("Categories:");
    for (category, count) in outcome.store.category_counts() {
        println!("  {:>4}  {}", count, category);
    }
    Ok(())
}

fn check_cmd(args: CommonArgs) -> Result<()> {
    let config = open_config(args.config)?;
    configure_logger(&config)?;
    let outcome = load(&config)?;

    println!(
        "{} article(s) loaded from {}",
        outcome.store.len(),
        config.paths.articles_dir.display()
    );

    if !outcome.failures.is_empty() {
        for failure in &outcome.failures {
            eprintln!("{}: {}", failure.file.display(), failure.error);
        }
        bail!("{} article(s) failed to load", outcome.failures.len());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::List(args) => list_cmd(args),
        Args::Show(args) => show_cmd(args),
        Args::Tags(args) => tags_cmd(args),
        Args::Check(args) => check_cmd(args),
    }
}
