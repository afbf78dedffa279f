//! Error types for cluster-stack-fetch
//!
//! Every failure is terminal. Each variant belongs to one exit-status category
//! so a wrapping shell script can branch on `$?`.

use crate::config::ValidationError;
use thiserror::Error;

/// Result type alias for cluster-stack-fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Exit status when required environment variables are missing
pub const EXIT_MISSING_ENV: i32 = 1;
/// Exit status for a missing or unknown mode argument
pub const EXIT_USAGE: i32 = 2;
/// Exit status when the manifest could not be downloaded, parsed or written
pub const EXIT_DOWNLOAD: i32 = 3;
/// Exit status when more than one target Secret was found
pub const EXIT_AMBIGUOUS: i32 = 4;
/// Exit status when no target Secret was found
pub const EXIT_NOT_FOUND: i32 = 5;

/// Error type for fetching and patching a release manifest
#[derive(Error, Debug)]
pub enum FetchError {
    /// One or more required environment variables are unset or empty
    #[error("{}", format_missing(.0))]
    MissingEnv(Vec<ValidationError>),

    /// Missing or unknown mode argument
    #[error("Usage: fetch-cso-cspo cso|cspo ({0})")]
    Usage(String),

    /// Download failed before an HTTP response was available
    #[error("There was an exception during downloading of URL: {0}")]
    Download(String),

    /// HTTP request errors (connect, status, body)
    #[error("There was an exception during downloading of URL: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors on the downloaded or patched file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// More than one document matched the target Secret
    #[error("There was a second match on the cluster-stack-variables secret section: {}", .0.join(", "))]
    AmbiguousTarget(Vec<String>),

    /// No document matched the target Secret
    #[error("There was no match on the cluster-stack-variables secret section")]
    TargetNotFound,

    /// The tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl FetchError {
    /// Process exit status for this failure category
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::MissingEnv(_) => EXIT_MISSING_ENV,
            FetchError::Usage(_) => EXIT_USAGE,
            FetchError::Download(_)
            | FetchError::Http(_)
            | FetchError::Io(_)
            | FetchError::Yaml(_)
            | FetchError::Logging(_) => EXIT_DOWNLOAD,
            FetchError::AmbiguousTarget(_) => EXIT_AMBIGUOUS,
            FetchError::TargetNotFound => EXIT_NOT_FOUND,
        }
    }
}

/// Join validation problems into a single line
fn format_missing(errors: &[ValidationError]) -> String {
    let parts: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    format!("Missing environment: {}", parts.join("; "))
}
