use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by scaffolding commands
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A file the command needs is not there (project "not configured")
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not valid JSON
    #[error("{} is not valid JSON: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but its top level is not a JSON object
    #[error("{} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    /// Refusing to overwrite generated output
    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    /// The project manifest has no usable `idRanges`
    #[error("no usable id range in {}", path.display())]
    MissingIdRange { path: PathBuf },

    /// A document value has an unexpected shape
    #[error("{0}")]
    InvalidValue(String),

    /// The user dismissed a prompt
    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScaffoldError {
    /// Whether the error should be reported to the user at all
    pub fn is_silent(&self) -> bool {
        matches!(self, ScaffoldError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
