//! File access helpers: path validation and schema-checked JSON loading.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::{RelnotesError, Result};

/// Ensure a user-supplied file path exists and is accessible.
///
/// Relative paths are resolved against the current working directory. Fails
/// when the path was never supplied or is empty, naming the option it
/// belongs to, and when the resolved path cannot be accessed.
pub async fn validate_file(
    path: Option<&str>,
    option_key: &str,
) -> Result<PathBuf> {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return Err(RelnotesError::missing_argument(option_key));
    };

    let mut resolved = PathBuf::from(path);
    if resolved.is_relative() {
        resolved = std::env::current_dir()?.join(resolved);
    }

    if let Err(source) = tokio::fs::metadata(&resolved).await {
        return Err(RelnotesError::FileNotAccessible {
            path: resolved.display().to_string(),
            source,
        });
    }

    Ok(resolved)
}

/// Read a file as JSON and deserialize it into the typed model.
///
/// Parse failures and model (schema) violations are reported separately,
/// both naming the file.
pub async fn json_from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
        RelnotesError::FileNotAccessible {
            path: path.display().to_string(),
            source,
        }
    })?;

    let json: serde_json::Value =
        serde_json::from_str(&contents).map_err(|source| {
            RelnotesError::JsonParse {
                path: path.display().to_string(),
                source,
            }
        })?;

    serde_json::from_value(json).map_err(|source| {
        RelnotesError::SchemaValidation {
            path: path.display().to_string(),
            detail: source.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::notes::{PackageManifest, ReleaseNote};

    #[tokio::test]
    async fn validate_file_requires_a_path() {
        let err = validate_file(None, "notes-file").await.unwrap_err();
        assert!(matches!(err, RelnotesError::MissingArgument { .. }));
        assert!(err.to_string().contains("notes-file"));

        let err = validate_file(Some(""), "notes-file").await.unwrap_err();
        assert!(matches!(err, RelnotesError::MissingArgument { .. }));
    }

    #[tokio::test]
    async fn validate_file_names_resolved_absolute_path() {
        let err = validate_file(Some("does-not-exist.json"), "notes-file")
            .await
            .unwrap_err();

        let expected = std::env::current_dir()
            .unwrap()
            .join("does-not-exist.json");
        assert!(
            err.to_string().contains(&expected.display().to_string()),
            "{err}"
        );
    }

    #[tokio::test]
    async fn validate_file_returns_absolute_path_for_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();

        let resolved = validate_file(Some(&path), "notes-file").await.unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, file.path());
    }

    #[tokio::test]
    async fn json_from_file_loads_typed_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"version": "1.0.0", "fixes": ["bug"]}}]"#
        )
        .unwrap();

        let notes: Vec<ReleaseNote> =
            json_from_file(file.path()).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].version, "1.0.0");
        assert_eq!(notes[0].fixes, Some(vec!["bug".to_string()]));
    }

    #[tokio::test]
    async fn json_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let err = json_from_file::<Vec<ReleaseNote>>(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, RelnotesError::JsonParse { .. }));
        assert!(err.to_string().contains("as JSON"));
    }

    #[tokio::test]
    async fn json_from_file_reports_schema_violations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // valid JSON, but notes entries must not carry unknown fields
        write!(file, r#"[{{"version": "1.0.0", "extra": 1}}]"#).unwrap();

        let err = json_from_file::<Vec<ReleaseNote>>(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, RelnotesError::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn json_from_file_requires_manifest_version() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "pkg"}}"#).unwrap();

        let err = json_from_file::<PackageManifest>(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, RelnotesError::SchemaValidation { .. }));
    }
}
