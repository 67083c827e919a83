use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Names skipped wherever they appear in a tree, files and directories alike.
pub const FORBIDDEN_NAMES: &[&str] = &["settings", "config"];

/// Suffixes a file name must end with to be attributed.
pub const APPROVED_EXTENSIONS: &[&str] = &[".go"];

/// Repository roots walked when none are given on the command line.
pub const REPOSITORY_PATHS: &[&str] = &["/var/www/test/project1", "/var/www/test/project2"];

/// Everything a run needs, fixed before the first repository is touched.
#[derive(Debug, Clone)]
pub struct Config {
    pub forbidden_names: Vec<String>,
    pub approved_extensions: Vec<String>,
    pub repositories: Vec<PathBuf>,
    /// Visit directory entries in name order instead of listing order.
    pub sort_entries: bool,
    pub blame_timeout: Option<Duration>,
    pub date_range: DateRange,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forbidden_names: FORBIDDEN_NAMES.iter().map(|s| s.to_string()).collect(),
            approved_extensions: APPROVED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            repositories: REPOSITORY_PATHS.iter().map(PathBuf::from).collect(),
            sort_entries: false,
            blame_timeout: None,
            date_range: DateRange::default(),
            progress: true,
        }
    }
}

/// Inclusive bounds on the date a line was last touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    /// Lines without a readable date only pass an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return self.is_unbounded();
        };
        if let Some(since) = self.since {
            if date < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date > until {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn defaults_match_compiled_in_sets() {
        let config = Config::default();
        assert_eq!(config.forbidden_names, vec!["settings", "config"]);
        assert_eq!(config.approved_extensions, vec![".go"]);
        assert_eq!(config.repositories.len(), 2);
        assert!(!config.sort_entries);
        assert!(config.date_range.is_unbounded());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::new()
            .with_since(day("2021-01-01"))
            .with_until(day("2021-12-31"));
        assert!(range.contains(Some(day("2021-01-01"))));
        assert!(range.contains(Some(day("2021-12-31"))));
        assert!(!range.contains(Some(day("2020-12-31"))));
        assert!(!range.contains(Some(day("2022-01-01"))));
    }

    #[test]
    fn undated_lines_only_pass_unbounded_range() {
        assert!(DateRange::new().contains(None));
        assert!(!DateRange::new().with_since(day("2021-01-01")).contains(None));
    }
}
