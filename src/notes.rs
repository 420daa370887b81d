//! Release note data model and Markdown description rendering.

use serde::{Deserialize, Serialize};

use crate::error::{RelnotesError, Result};

/// Notes for one released version: optional free text plus categorized
/// change entries. Unknown fields in the JSON file are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseNote {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixes: Option<Vec<String>>,
}

impl ReleaseNote {
    /// Construct a note with only a version, useful in tests and fixtures.
    pub fn for_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            description: None,
            breaking: None,
            features: None,
            fixes: None,
        }
    }
}

/// Minimal view of a package manifest. Additional fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub version: String,
}

/// Categories of release note entries, in the fixed order they render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Breaking,
    Feature,
    Fix,
}

impl Category {
    pub const ALL: [Category; 3] =
        [Category::Breaking, Category::Feature, Category::Fix];

    /// Bolded Markdown heading for the category.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Breaking => "**Breaking Changes**",
            Category::Feature => "**New Features**",
            Category::Fix => "**Bug Fixes**",
        }
    }

    /// The note entries belonging to this category.
    pub fn entries<'a>(&self, note: &'a ReleaseNote) -> &'a [String] {
        let list = match self {
            Category::Breaking => &note.breaking,
            Category::Feature => &note.features,
            Category::Fix => &note.fixes,
        };
        list.as_deref().unwrap_or_default()
    }
}

/// Render the Markdown release description for `version`.
///
/// Emits, in order: the note's free-text description followed by a horizontal
/// rule, one block per non-empty category (Breaking, Feature, Fix), and an
/// "Additional Information" block when a build branch or build number is
/// supplied. Categories with no entries emit nothing. The first note whose
/// version matches wins when the collection contains duplicates.
pub fn render_description(
    notes: &[ReleaseNote],
    version: &str,
    build_branch: Option<&str>,
    build_number: Option<u64>,
) -> Result<String> {
    let Some(release) = notes.iter().find(|note| note.version == version)
    else {
        return Err(RelnotesError::ReleaseNotFound {
            version: version.to_string(),
            notes: serde_json::to_string(notes).unwrap_or_default(),
        });
    };

    let mut description = String::new();

    if let Some(text) = &release.description {
        description.push_str(text);
        description.push_str("\n\n---\n\n");
    }

    for category in Category::ALL {
        let entries = category.entries(release);
        if entries.is_empty() {
            continue;
        }
        description.push_str(category.heading());
        description.push('\n');
        for entry in entries {
            description.push_str("* ");
            description.push_str(entry);
            description.push('\n');
        }
        description.push('\n');
    }

    if build_branch.is_some() || build_number.is_some() {
        description.push_str("---\n\nAdditional Information");
        if let Some(branch) = build_branch {
            description.push_str(&format!("\n* Build Branch: {branch}"));
        }
        if let Some(number) = build_number {
            description.push_str(&format!("\n* Build Number: {number}"));
        }
    }

    Ok(description)
}
