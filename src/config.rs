use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Paths {
    pub articles_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub article_file_name: Option<String>,
    pub page_size: u32,
    pub include_drafts: Option<bool>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub log: Option<Log>,
}

impl Config {
    /// Base name of the article file inside directory articles.
    pub fn article_file_name(&self) -> &str {
        self.defaults.article_file_name.as_deref().unwrap_or("index.md")
    }

    pub fn include_drafts(&self) -> bool {
        self.defaults.include_drafts.unwrap_or(false)
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!(
                    "Error opening configuration file {}: {}",
                    cfg_path.display(),
                    e
                ),
            ))
        }
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Error parsing configuration file: {}", e),
            ))
        }
    };

    cfg.paths = Paths {
        articles_dir: parse_path(cfg.paths.articles_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r##"
[paths]
articles_dir = "res/articles"

[defaults]
article_file_name = "index.md"
page_size = 10
include_drafts = false

[log]
level = "Info"
log_to_console = true
location = "logs/scriba.log"
"##;
        let cfg: Config = toml::from_str::<Config>(toml_str).unwrap();
        assert_eq!(cfg.paths.articles_dir, PathBuf::from("res/articles"));
        assert_eq!(cfg.defaults.page_size, 10);
        assert_eq!(cfg.article_file_name(), "index.md");
        assert!(!cfg.include_drafts());
        assert!(cfg.log.is_some());
    }

    #[test]
    fn test_defaults_are_optional() {
        let toml_str = r##"
[paths]
articles_dir = "articles"

[defaults]
page_size = 5
"##;
        let cfg: Config = toml::from_str::<Config>(toml_str).unwrap();
        assert_eq!(cfg.article_file_name(), "index.md");
        assert!(!cfg.include_drafts());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_exe_dir_substitution() {
        let path = parse_path(PathBuf::from("${exe_dir}/articles"));
        assert!(!path.starts_with("${exe_dir}"));
        assert!(path.ends_with("articles"));
    }
}
