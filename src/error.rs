//! Custom error types for relnotes with improved type safety and error handling.

use thiserror::Error;

/// Main error type for relnotes operations.
#[derive(Error, Debug)]
pub enum RelnotesError {
    // Cli option errors
    #[error("option \"{option}\" required but not provided")]
    MissingArgument { option: String },

    #[error("option \"{option}\" required but {reason}")]
    MissingValue { option: String, reason: &'static str },

    #[error(
        "invalid type \"{found}\" for option \"{option}\" with value \"{value}\", must be \"{expected}\""
    )]
    TypeMismatch {
        option: String,
        value: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value \"{value}\" for option \"{option}\": {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: &'static str,
    },

    // File errors
    #[error("could not access file \"{path}\": {source}")]
    FileNotAccessible {
        path: String,
        source: std::io::Error,
    },

    #[error("could not parse file \"{path}\" as JSON: {source}")]
    JsonParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid \"{path}\" contents: {detail}")]
    SchemaValidation { path: String, detail: String },

    // Version/notes errors
    #[error("invalid semantic version: {0}")]
    InvalidSemver(#[from] semver::Error),

    #[error("no release note found for version \"{version}\" in file \"{path}\"")]
    ReleaseNoteMissing { version: String, path: String },

    #[error(
        "the release notes do not contain a release for version \"{version}\": {notes}"
    )]
    ReleaseNotFound { version: String, notes: String },

    // Forge/API errors
    #[error("forge operation failed: {0}")]
    ForgeError(String),

    #[error("network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using RelnotesError
pub type Result<T> = std::result::Result<T, RelnotesError>;

impl RelnotesError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create a missing argument error for an option key
    pub fn missing_argument(option: impl Into<String>) -> Self {
        Self::MissingArgument {
            option: option.into(),
        }
    }
}

// Implement From for reqwest errors (network/API)
impl From<reqwest::Error> for RelnotesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NetworkError(err.to_string())
        } else if err.is_status() {
            if let Some(status) = err.status() {
                if status.as_u16() == 401 || status.as_u16() == 403 {
                    Self::AuthenticationError(err.to_string())
                } else {
                    Self::NetworkError(err.to_string())
                }
            } else {
                Self::NetworkError(err.to_string())
            }
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for RelnotesError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::AuthenticationError(format!("Invalid header value: {}", err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for RelnotesError {
    fn from(err: octocrab::Error) -> Self {
        Self::ForgeError(format!("GitHub API error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = RelnotesError::forge("API call failed");
        assert_eq!(err.to_string(), "forge operation failed: API call failed");

        let err = RelnotesError::missing_argument("owner");
        assert_eq!(
            err.to_string(),
            "option \"owner\" required but not provided"
        );
    }

    #[test]
    fn test_from_conversions() {
        let semver_err = semver::Version::parse("invalid");
        assert!(semver_err.is_err());
        let err: RelnotesError = semver_err.unwrap_err().into();
        assert!(matches!(err, RelnotesError::InvalidSemver(_)));
    }
}
