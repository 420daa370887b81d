use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
/// Request to create a new release.
pub struct CreateReleaseRequest {
    /// Tag to create the release from, e.g. "v1.2.3".
    pub tag_name: String,
    /// Commitish the tag is created from. Defaults to the repository's
    /// default branch when absent.
    pub target_commitish: Option<String>,
    /// Whether the release should be marked as the repository's latest.
    pub latest: bool,
    /// Whether the release is created as a draft.
    pub draft: bool,
    /// Release title.
    pub name: String,
    /// Markdown release description.
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
/// Release entity returned by the forge after creation.
pub struct CreatedRelease {
    pub id: u64,
    pub html_url: String,
}

#[derive(Debug, PartialEq)]
/// Request to upload one binary asset to an existing release.
pub struct UploadAssetRequest {
    pub release_id: u64,
    /// Asset name, the base name of the artifact file.
    pub name: String,
    pub content: Vec<u8>,
}
