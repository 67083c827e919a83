use crate::model::{AuthorLines, AuthorTally, RepositoryTally};

/// Sums every author's count across all repositories.
///
/// Authors appear in the order they are first met walking the repositories
/// in order, which is what `sort_descending` falls back on for equal counts.
pub fn total(repositories: &[RepositoryTally]) -> AuthorTally {
    let mut total = AuthorTally::new();
    for repository in repositories {
        total.merge(&repository.authors);
    }
    total
}

/// Stable sort by line count, largest first. Equal counts keep input order.
pub fn sort_descending(counts: &[AuthorLines]) -> Vec<AuthorLines> {
    let mut sorted = counts.to_vec();
    sorted.sort_by(|a, b| b.lines.cmp(&a.lines));
    sorted
}
