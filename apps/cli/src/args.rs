//! Command line arguments.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use urlc::CollectOptions;
use urlc::domain::config::AppConfigInner;
use urlc::domain::{OutputFormat, SearchMode};
use urlc_logger::LevelFilter;

const EXAMPLES: &str = "\
Examples:
  url-collector mtgal.com
  url-collector site1.com site2.com -n 50
  url-collector mtgal.com -m seo --brand 먹튀갤
  url-collector mtgal.com -m ranked --top 20 --scores
  url-collector mtgal.com -f json > urls.json
  url-collector --set-key YOUR_API_KEY";

/// Collects the URLs Google knows for a domain through the Serper API.
#[derive(Debug, Parser)]
#[command(name = "url-collector", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Domains to collect, with or without a scheme.
    pub domains: Vec<String>,

    /// Maximum results per domain.
    #[arg(short = 'n', long = "num", value_name = "NUM")]
    pub num: Option<usize>,

    /// Collection mode: article, seo or ranked.
    #[arg(short, long)]
    pub mode: Option<SearchMode>,

    /// Output format: table, json or txt.
    #[arg(short, long, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Save every domain's URLs into one file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save one timestamped file per domain into this directory.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Print raw search results.
    #[arg(long)]
    pub no_filter: bool,

    /// Keep only URLs positively identified as posts (article mode).
    #[arg(long)]
    pub strict: bool,

    /// Never ask the LLM classifier (seo mode).
    #[arg(long)]
    pub no_ai: bool,

    /// Brand to search instead of detecting it (seo mode).
    #[arg(long, value_name = "NAME")]
    pub brand: Option<String>,

    /// Keep at most N URLs (ranked mode).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Minimum score (seo and ranked modes).
    #[arg(long, value_name = "S", allow_hyphen_values = true)]
    pub min_score: Option<i32>,

    /// Keep URLs whose path contains this text; repeatable.
    #[arg(long = "category", value_name = "C")]
    pub categories: Vec<String>,

    /// Show scores in table output.
    #[arg(long)]
    pub scores: bool,

    /// Print percent-decoded URLs.
    #[arg(long)]
    pub decode: bool,

    /// Domains collected at once.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Config file (TOML, JSON or YAML).
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to rolling files in this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// More log output on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Save the Serper API key and exit.
    #[arg(long, value_name = "KEY")]
    pub set_key: Option<String>,

    /// Save the Groq API key and exit.
    #[arg(long, value_name = "KEY")]
    pub set_groq_key: Option<String>,
}

impl Cli {
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    #[must_use]
    pub fn mode(&self, config: &AppConfigInner) -> SearchMode {
        self.mode.unwrap_or(config.collect.mode)
    }

    /// Config defaults overridden by the flags that were given.
    #[must_use]
    pub fn options(&self, config: &AppConfigInner) -> CollectOptions {
        let defaults = CollectOptions::from_config(config);
        CollectOptions {
            limit: self.num.unwrap_or(defaults.limit),
            no_filter: self.no_filter,
            strict: self.strict || defaults.strict,
            use_ai: !self.no_ai && defaults.use_ai,
            brand: self.brand.clone(),
            top: self.top.or(defaults.top),
            min_score: self.min_score,
            categories: self.categories.clone(),
            concurrency: self.concurrency.unwrap_or(defaults.concurrency),
        }
    }

    #[must_use]
    pub const fn sets_keys(&self) -> bool {
        self.set_key.is_some() || self.set_groq_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use urlc::domain::config::AppConfig;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("url-collector").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "a.com", "b.com", "-n", "30", "-m", "RANKED", "-f", "json", "--top", "5", "--min-score", "-20",
            "--category", "free", "--category", "mt", "--no-ai", "--concurrency", "3",
        ]);
        let config = AppConfig::default();

        assert_eq!(cli.domains, ["a.com", "b.com"]);
        assert_eq!(cli.mode(&config), SearchMode::Ranked);
        assert_eq!(cli.format, OutputFormat::Json);

        let options = cli.options(&config);
        assert_eq!(options.limit, 30);
        assert_eq!(options.top, Some(5));
        assert_eq!(options.min_score, Some(-20));
        assert_eq!(options.categories, ["free", "mt"]);
        assert_eq!(options.concurrency, 3);
        assert!(!options.use_ai);
    }

    #[test]
    fn config_fills_missing_flags() {
        let mut config = AppConfig::default();
        config.collect.mode = SearchMode::Seo;
        config.collect.num_results = 40;
        config.filter.strict = true;

        let cli = parse(&["a.com"]);
        let options = cli.options(&config);
        assert_eq!(cli.mode(&config), SearchMode::Seo);
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(options.limit, 40);
        assert!(options.strict);
        assert!(options.use_ai);
        assert!(!cli.sets_keys());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(parse(&[]).log_level(), LevelFilter::WARN);
        assert_eq!(parse(&["-v"]).log_level(), LevelFilter::INFO);
        assert_eq!(parse(&["-vvvv"]).log_level(), LevelFilter::TRACE);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["url-collector", "a.com", "-m", "posts"]).is_err());
    }
}
