use crate::config::{Config, DateRange};
use crate::error::{BlameTallyError, Result};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "blametally")]
#[command(about = "Count the lines each author currently owns across git repositories")]
#[command(version)]
pub struct Cli {
    #[arg(
        long = "repo",
        value_name = "PATH",
        help = "Repository root to analyze; repeat for several (replaces the built-in list)"
    )]
    pub repos: Vec<PathBuf>,

    #[arg(
        long = "ext",
        value_name = "SUFFIX",
        help = "File name suffix to include, e.g. .go; repeatable (replaces the built-in list)"
    )]
    pub extensions: Vec<String>,

    #[arg(
        long = "forbid",
        value_name = "NAME",
        help = "File or directory name to skip; repeatable (replaces the built-in list)"
    )]
    pub forbidden: Vec<String>,

    #[arg(long, help = "Visit directory entries in name order for reproducible output")]
    pub sorted: bool,

    #[arg(
        long,
        value_name = "DURATION",
        value_parser = humantime::parse_duration,
        help = "Give up on a single git blame after this long (e.g. 30s, 2m)"
    )]
    pub timeout: Option<Duration>,

    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date, help = "Only count lines last changed on or after this date")]
    pub since: Option<NaiveDate>,

    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date, help = "Only count lines last changed on or before this date")]
    pub until: Option<NaiveDate>,

    #[arg(long, help = "Hide the progress spinner")]
    pub no_progress: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More log output on stderr (-v, -vv, -vvv)")]
    pub verbose: u8,
}

fn parse_date(input: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{input}': {e}"))
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Built-in defaults with every option given on the command line applied.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::default();

        if !self.repos.is_empty() {
            config.repositories = self.repos.clone();
        }
        if !self.extensions.is_empty() {
            config.approved_extensions = self.extensions.clone();
        }
        if !self.forbidden.is_empty() {
            config.forbidden_names = self.forbidden.clone();
        }

        if let (Some(since), Some(until)) = (self.since, self.until) {
            if since > until {
                return Err(BlameTallyError::InvalidDate(format!(
                    "Invalid range: since ({since}) is after until ({until})"
                )));
            }
        }
        let mut range = DateRange::new();
        if let Some(since) = self.since {
            range = range.with_since(since);
        }
        if let Some(until) = self.until {
            range = range.with_until(until);
        }

        config.date_range = range;
        config.sort_entries = self.sorted;
        config.blame_timeout = self.timeout;
        config.progress = !self.no_progress;
        Ok(config)
    }

    pub fn execute(self) -> anyhow::Result<()> {
        let config = self.config().context("Invalid options")?;
        let progress = crate::run::progress_bar(config.progress);
        crate::logging::init(self.verbose, progress.clone());
        crate::run::exec(&config, &progress)
    }
}
