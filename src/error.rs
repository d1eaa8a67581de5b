use std::path::PathBuf;

/// Everything that can abort a report run.
#[derive(Debug)]
pub enum ReportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Config(serde_yaml::Error),
    /// An amount that has to be summed or averaged is neither a number nor a
    /// numeric string.
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Json(err)
    }
}

impl From<serde_yaml::Error> for ReportError {
    fn from(err: serde_yaml::Error) -> Self {
        ReportError::Config(err)
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ReportError::Json(e) => write!(f, "Failed to parse event log: {}", e),
            ReportError::Config(e) => write!(f, "Failed to parse config: {}", e),
            ReportError::InvalidNumber { field, value } => {
                write!(f, "Field {} is not numeric: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            ReportError::Json(e) => Some(e),
            ReportError::Config(e) => Some(e),
            ReportError::InvalidNumber { .. } => None,
        }
    }
}
