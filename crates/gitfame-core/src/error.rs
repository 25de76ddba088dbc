/// Errors that can occur across the gitfame workspace.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate reports it through miette at the boundary.
///
/// # Examples
///
/// ```
/// use gitfame_core::FameError;
///
/// let err = FameError::Git("not a git repository".into());
/// assert!(err.to_string().contains("not a git repository"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FameError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git invocation failure: the process could not be spawned or exited
    /// non-zero (bad path, not a repository, unreadable file).
    #[error("git error: {0}")]
    Git(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
