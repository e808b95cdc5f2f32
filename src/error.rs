use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: missing or empty '{field}' field")]
    MissingCpuField { path: PathBuf, field: &'static str },

    #[error("missing required kernel modules: {}", .0.join(", "))]
    MissingModules(Vec<String>),

    #[error("unsupported architecture: {0}")]
    UnsupportedArch(String),
}

impl Error {
    /// True when the underlying cause is a nonexistent file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
