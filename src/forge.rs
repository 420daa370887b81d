//! Interface to the Git forge hosting published releases.
//!
//! Provides token-based authentication, release creation, and asset upload
//! through a common trait.

/// Configuration and authentication for the forge connection.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Common trait for forge release operations.
pub mod traits;

/// Shared data types for release and asset requests.
pub mod types;
