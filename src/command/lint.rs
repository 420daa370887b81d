//! Lint command: verify release notes exist for the manifest version.
use clap::{ArgMatches, Command};
use log::*;
use std::path::Path;

use crate::{
    cli,
    error::{RelnotesError, Result},
    files,
    notes::{PackageManifest, ReleaseNote},
    opts::{self, OptKind, OptSpec},
};

pub const NAME: &str = "lint-release-notes";

pub const NOTES_FILE: OptSpec = OptSpec {
    key: "notes-file",
    aliases: &["notes", "n"],
    kind: OptKind::Str,
    help: "A path to the file containing release notes JSON to lint",
    default: Some("release-notes.json"),
};

pub const PACKAGE_FILE: OptSpec = OptSpec {
    key: "package-file",
    aliases: &["package", "p"],
    kind: OptKind::Str,
    help: "A path to the package manifest file for the package to lint",
    default: Some("package.json"),
};

pub const STRIP_SUFFIX: OptSpec = OptSpec {
    key: "strip-suffix",
    aliases: &["s", "suffix"],
    kind: OptKind::Bool,
    help: "Strip pre-release and build-metadata suffixes from the manifest \
           version before matching",
    default: Some("true"),
};

pub const SPECS: [&OptSpec; 3] = [&NOTES_FILE, &PACKAGE_FILE, &STRIP_SUFFIX];

/// Build the lint subcommand.
pub fn command() -> Command {
    let mut cmd = Command::new(NAME)
        .visible_alias("lint")
        .about("Lint the release notes for a package.");

    for spec in SPECS {
        cmd = cli::register(cmd, spec);
    }

    cmd
}

/// Resolve options and run the lint check.
pub async fn execute(matches: &ArgMatches) -> Result<()> {
    let bag = cli::bag_from_matches(matches, &SPECS);

    let notes_file = opts::string_value(&bag, &NOTES_FILE)?;
    let package_file = opts::string_value(&bag, &PACKAGE_FILE)?;
    let strip_suffix = opts::bool_value(&bag, &STRIP_SUFFIX)?.unwrap_or(true);

    let notes_path =
        files::validate_file(notes_file.as_deref(), NOTES_FILE.key).await?;
    let package_path =
        files::validate_file(package_file.as_deref(), PACKAGE_FILE.key)
            .await?;

    lint(&notes_path, &package_path, strip_suffix).await
}

/// Ensure the release notes contain an entry for the manifest version.
///
/// With `strip_version_suffix` the manifest version must parse as a semantic
/// version and is reduced to its bare MAJOR.MINOR.PATCH form before the
/// match. The notes collection is scanned linearly; duplicate versions are
/// tolerated.
pub async fn lint(
    notes_path: &Path,
    package_path: &Path,
    strip_version_suffix: bool,
) -> Result<()> {
    let release_notes: Vec<ReleaseNote> =
        files::json_from_file(notes_path).await?;
    let manifest: PackageManifest =
        files::json_from_file(package_path).await?;

    let mut version = manifest.version;

    if strip_version_suffix {
        let parsed = semver::Version::parse(&version)?;
        let bare =
            format!("{}.{}.{}", parsed.major, parsed.minor, parsed.patch);
        if bare != version {
            info!("stripped version suffix: \"{version}\" -> \"{bare}\"");
            version = bare;
        }
    }

    if !release_notes.iter().any(|note| note.version == version) {
        return Err(RelnotesError::ReleaseNoteMissing {
            version,
            path: notes_path.display().to_string(),
        });
    }

    info!("release notes valid");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        path
    }

    fn fixture(
        notes_json: &str,
        package_json: &str,
    ) -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let notes = write_file(dir.path(), "release-notes.json", notes_json);
        let package = write_file(dir.path(), "package.json", package_json);
        (dir, notes, package)
    }

    #[tokio::test]
    async fn passes_when_note_matches_manifest_version() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0.0"}]"#,
            r#"{"version": "1.0.0"}"#,
        );

        lint(&notes, &package, true).await.unwrap();
    }

    #[tokio::test]
    async fn fails_naming_missing_version_and_notes_path() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0.0"}]"#,
            r#"{"version": "2.0.0"}"#,
        );

        let err = lint(&notes, &package, true).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"2.0.0\""), "{msg}");
        assert!(msg.contains(&notes.display().to_string()), "{msg}");
    }

    #[tokio::test]
    async fn strips_prerelease_suffix_before_matching() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0.0"}]"#,
            r#"{"version": "1.0.0-1"}"#,
        );

        lint(&notes, &package, true).await.unwrap();
    }

    #[tokio::test]
    async fn strips_build_metadata_before_matching() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "2.1.0"}]"#,
            r#"{"version": "2.1.0-rc.1+build.5"}"#,
        );

        lint(&notes, &package, true).await.unwrap();
    }

    #[tokio::test]
    async fn suffixed_version_fails_without_stripping() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0.0"}]"#,
            r#"{"version": "1.0.0-1"}"#,
        );

        let err = lint(&notes, &package, false).await.unwrap_err();
        assert!(matches!(err, RelnotesError::ReleaseNoteMissing { .. }));
    }

    #[tokio::test]
    async fn invalid_semver_fails_when_stripping_requested() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0"}]"#,
            r#"{"version": "1.0"}"#,
        );

        let err = lint(&notes, &package, true).await.unwrap_err();
        assert!(matches!(err, RelnotesError::InvalidSemver(_)));
    }

    #[tokio::test]
    async fn non_semver_version_passes_without_stripping() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0"}]"#,
            r#"{"version": "1.0"}"#,
        );

        lint(&notes, &package, false).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_versions_are_tolerated() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0.0"}, {"version": "1.0.0"}]"#,
            r#"{"version": "1.0.0"}"#,
        );

        lint(&notes, &package, true).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_notes_file_fails_schema_validation() {
        let (_dir, notes, package) = fixture(
            r#"[{"version": "1.0.0", "extra": []}]"#,
            r#"{"version": "1.0.0"}"#,
        );

        let err = lint(&notes, &package, true).await.unwrap_err();
        assert!(matches!(err, RelnotesError::SchemaValidation { .. }));
    }
}
