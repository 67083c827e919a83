use std::collections::HashMap;
use std::path::PathBuf;

/// Lines currently attributed to one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLines {
    pub author: String,
    pub lines: u64,
}

impl AuthorLines {
    pub fn new(author: impl Into<String>, lines: u64) -> Self {
        Self {
            author: author.into(),
            lines,
        }
    }
}

/// Per-author line counts in order of first appearance.
///
/// Holds at most one entry per author name. Names are compared exactly, so
/// `"Jane Doe"` and `"jane doe"` are two authors. Counts only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTally {
    entries: Vec<AuthorLines>,
    index: HashMap<String, usize>,
}

impl AuthorTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, author: &str, delta: u64) {
        match self.index.get(author).copied() {
            Some(i) => self.entries[i].lines += delta,
            None => {
                self.index.insert(author.to_string(), self.entries.len());
                self.entries.push(AuthorLines::new(author, delta));
            }
        }
    }

    /// Folds `other` into `self`, summing counts of authors present in both.
    /// Authors new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: &AuthorTally) {
        for entry in &other.entries {
            self.add(&entry.author, entry.lines);
        }
    }

    pub fn get(&self, author: &str) -> Option<u64> {
        self.index.get(author).map(|&i| self.entries[i].lines)
    }

    pub fn entries(&self) -> &[AuthorLines] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_lines(&self) -> u64 {
        self.entries.iter().map(|e| e.lines).sum()
    }

    /// A new list ordered by count, largest first. `self` is left untouched.
    pub fn sorted(&self) -> Vec<AuthorLines> {
        crate::aggregate::sort_descending(&self.entries)
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for AuthorTally {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut tally = AuthorTally::new();
        for (author, lines) in iter {
            tally.add(author.as_ref(), lines);
        }
        tally
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTally {
    pub root: PathBuf,
    pub authors: AuthorTally,
}

impl RepositoryTally {
    pub fn new(root: impl Into<PathBuf>, authors: AuthorTally) -> Self {
        Self {
            root: root.into(),
            authors,
        }
    }
}

/// Results of one run, one entry per configured repository in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub repositories: Vec<RepositoryTally>,
}

impl Summary {
    pub fn push(&mut self, repository: RepositoryTally) {
        self.repositories.push(repository);
    }

    pub fn total(&self) -> AuthorTally {
        crate::aggregate::total(&self.repositories)
    }
}
