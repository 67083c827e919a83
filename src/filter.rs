use crate::config::Config;

/// Decides which directory entries the walker looks at.
#[derive(Debug, Clone)]
pub struct FileFilter {
    forbidden_names: Vec<String>,
    approved_extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(forbidden_names: Vec<String>, approved_extensions: Vec<String>) -> Self {
        Self {
            forbidden_names,
            approved_extensions,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.forbidden_names.clone(),
            config.approved_extensions.clone(),
        )
    }

    /// Exact, case-sensitive match against the forbidden names. Applies to
    /// files and directories; `name` is a bare entry name, not a path.
    pub fn is_forbidden(&self, name: &str) -> bool {
        self.forbidden_names.iter().any(|forbidden| forbidden == name)
    }

    /// Case-sensitive suffix match against the approved extensions.
    pub fn has_approved_extension(&self, name: &str) -> bool {
        self.approved_extensions
            .iter()
            .any(|extension| name.ends_with(extension.as_str()))
    }
}
