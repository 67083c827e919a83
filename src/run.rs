use crate::blame::{Attributor, GitBlame};
use crate::config::Config;
use crate::filter::FileFilter;
use crate::git::GitRepo;
use crate::model::{AuthorTally, RepositoryTally, Summary};
use crate::report::print_report;
use crate::walk::RepositoryWalker;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, error, info};

/// Spinner shown on stderr while files are attributed. Ticking starts in `exec`.
pub fn progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{pos} files] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}

pub fn exec(config: &Config, pb: &ProgressBar) -> anyhow::Result<()> {
    let attributor = GitBlame::new().with_timeout(config.blame_timeout);

    pb.enable_steady_tick(Duration::from_millis(100));
    let summary = collect(config, &attributor, pb);
    pb.finish_and_clear();

    print_report(&summary);
    Ok(())
}

/// Walks every configured repository in order. Never fails; a repository
/// that cannot be read or is not under git ends up with no authors.
pub fn collect<A: Attributor + ?Sized>(
    config: &Config,
    attributor: &A,
    progress: &ProgressBar,
) -> Summary {
    let filter = FileFilter::from_config(config);
    let walker = RepositoryWalker::new(&filter, attributor)
        .with_date_range(config.date_range)
        .with_sorted_entries(config.sort_entries)
        .with_progress(progress.clone());

    let mut summary = Summary::default();
    for root in &config.repositories {
        info!(repository = %root.display(), "Processing repository");

        // Missing roots fall through to the walker, which logs the read failure.
        if root.is_dir() {
            match GitRepo::discover(root) {
                Ok(repo) => debug!(
                    work_tree = %repo.path().display(),
                    bare = repo.is_bare(),
                    "Found git repository"
                ),
                Err(e) => {
                    error!(repository = %root.display(), error = %e, "Not a git repository");
                    summary.push(RepositoryTally::new(root, AuthorTally::new()));
                    continue;
                }
            }
        }

        let authors = walker.collect(root);
        info!(
            repository = %root.display(),
            authors = authors.len(),
            lines = authors.total_lines(),
            "Finished repository"
        );
        summary.push(RepositoryTally::new(root, authors));
    }
    summary
}
