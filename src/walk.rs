use crate::blame::{count_lines, Attributor};
use crate::config::DateRange;
use crate::filter::FileFilter;
use crate::model::AuthorTally;
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, error, trace};
use walkdir::WalkDir;

/// Recursively attributes every approved file under a repository root.
///
/// Failures never abort the walk. An unreadable directory contributes
/// nothing for its subtree, a file whose attribution fails contributes
/// nothing, and both are logged.
pub struct RepositoryWalker<'a, A: Attributor + ?Sized> {
    filter: &'a FileFilter,
    attributor: &'a A,
    date_range: DateRange,
    sort_entries: bool,
    progress: ProgressBar,
}

impl<'a, A: Attributor + ?Sized> RepositoryWalker<'a, A> {
    pub fn new(filter: &'a FileFilter, attributor: &'a A) -> Self {
        Self {
            filter,
            attributor,
            date_range: DateRange::default(),
            sort_entries: false,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_sorted_entries(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn collect(&self, root: &Path) -> AuthorTally {
        let mut tally = AuthorTally::new();

        let mut walker = WalkDir::new(root).follow_links(false);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        // The root itself is never matched against the forbidden names.
        let entries = walker.into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let forbidden = self.filter.is_forbidden(&entry.file_name().to_string_lossy());
            if forbidden {
                debug!(path = %entry.path().display(), "Skipping forbidden name");
            }
            !forbidden
        });

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let directory = e.path().unwrap_or(root);
                    error!(directory = %directory.display(), error = %e, "Error reading directory");
                    continue;
                }
            };

            // Symlinks are not followed; a symlink is treated as a file.
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }

            if self.filter.has_approved_extension(&entry.file_name().to_string_lossy()) {
                self.attribute_file(root, entry.path(), &mut tally);
            } else {
                trace!(path = %entry.path().display(), "Extension not approved");
            }
        }
        tally
    }

    fn attribute_file(&self, root: &Path, path: &Path, tally: &mut AuthorTally) {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.progress.set_message(relative.display().to_string());

        match self.attributor.attribute(root, relative) {
            Ok(output) => {
                let counts = count_lines(&output, &self.date_range);
                debug!(
                    path = %relative.display(),
                    lines = counts.total_lines(),
                    "Attributed file"
                );
                tally.merge(&counts);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error getting git blame output");
            }
        }
        self.progress.inc(1);
    }
}
