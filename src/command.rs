//! Subcommand implementations.

/// Lint release notes against the package manifest version.
pub mod lint;

/// Publish a GitHub release with uploaded artifacts.
pub mod release;
