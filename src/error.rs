use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlameTallyError>;

#[derive(Error, Debug)]
pub enum BlameTallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("git blame failed for {}: {stderr}", path.display())]
    Blame { path: PathBuf, stderr: String },
    #[error("git blame timed out for {} after {}", path.display(), humantime::format_duration(*after))]
    Timeout { path: PathBuf, after: Duration },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

// Manual From implementation for unboxed to boxed conversion
impl From<gix::discover::Error> for BlameTallyError {
    fn from(err: gix::discover::Error) -> Self {
        BlameTallyError::GitDiscover(Box::new(err))
    }
}
