//! Release command: publish a versioned GitHub release with artifacts.
use clap::{ArgMatches, Command};
use log::*;
use secrecy::SecretString;
use std::path::PathBuf;

use crate::{
    cli,
    error::{RelnotesError, Result},
    files,
    forge::{
        config::RemoteConfig,
        github::Github,
        traits::Forge,
        types::{CreateReleaseRequest, UploadAssetRequest},
    },
    notes::{self, ReleaseNote},
    opts::{self, OptKind, OptSpec},
};

pub const NAME: &str = "release-github";

pub const API_URL: OptSpec = OptSpec {
    key: "api-url",
    aliases: &["api"],
    kind: OptKind::Str,
    help: "The URL of the GitHub API to interact with",
    default: Some("https://api.github.com"),
};

pub const ARTIFACTS: OptSpec = OptSpec {
    key: "artifacts",
    aliases: &["a", "artifact", "asset", "assets"],
    kind: OptKind::StrList,
    help: "A path to an artifact to upload to the GitHub release",
    default: None,
};

pub const AUTH_TOKEN: OptSpec = OptSpec {
    key: "auth-token",
    aliases: &["auth", "token"],
    kind: OptKind::Str,
    help: "The token used to authenticate with GitHub. Can be a personal \
           access token, OAuth app access token, etc.",
    default: None,
};

pub const BUILD_BRANCH: OptSpec = OptSpec {
    key: "build-branch",
    aliases: &["b", "branch"],
    kind: OptKind::Str,
    help: "The branch the release is based on",
    default: None,
};

pub const BUILD_NUMBER: OptSpec = OptSpec {
    key: "build-number",
    aliases: &["build", "number"],
    kind: OptKind::Str,
    help: "The number of the build that produced the artifacts being \
           released",
    default: None,
};

pub const DRAFT: OptSpec = OptSpec {
    key: "draft",
    aliases: &["d"],
    kind: OptKind::Bool,
    help: "Whether the release should be created as a draft or publicly \
           available",
    default: Some("false"),
};

pub const OWNER: OptSpec = OptSpec {
    key: "owner",
    aliases: &["o", "org"],
    kind: OptKind::Str,
    help: "The owner/organization of the GitHub repository",
    default: None,
};

pub const RELEASE_NOTES: OptSpec = OptSpec {
    key: "release-notes",
    aliases: &["n", "notes"],
    kind: OptKind::Str,
    help: "The path to the file containing release notes JSON",
    default: Some("release-notes.json"),
};

pub const REPOSITORY: OptSpec = OptSpec {
    key: "repository",
    aliases: &["r", "repo"],
    kind: OptKind::Str,
    help: "The name of the GitHub repository to create the release on",
    default: None,
};

pub const TAG_AS_LATEST: OptSpec = OptSpec {
    key: "tag-as-latest",
    aliases: &["l", "latest"],
    kind: OptKind::Bool,
    help: "Whether the version should also be denoted as the \"latest\" in \
           GitHub",
    default: Some("true"),
};

pub const TARGET: OptSpec = OptSpec {
    key: "target",
    aliases: &["t"],
    kind: OptKind::Str,
    help: "The commitish value that determines where the Git tag is created \
           from. Can be any branch or commit SHA. Defaults to the \
           repository's default branch",
    default: None,
};

pub const UPLOAD_URL: OptSpec = OptSpec {
    key: "upload-url",
    aliases: &["upload"],
    kind: OptKind::Str,
    help: "The base URL to use when uploading assets to GitHub",
    default: Some("https://uploads.github.com"),
};

pub const VERSION: OptSpec = OptSpec {
    key: "version",
    aliases: &["v"],
    kind: OptKind::Str,
    help: "The version being released",
    default: None,
};

pub const SPECS: [&OptSpec; 13] = [
    &API_URL,
    &ARTIFACTS,
    &AUTH_TOKEN,
    &BUILD_BRANCH,
    &BUILD_NUMBER,
    &DRAFT,
    &OWNER,
    &RELEASE_NOTES,
    &REPOSITORY,
    &TAG_AS_LATEST,
    &TARGET,
    &UPLOAD_URL,
    &VERSION,
];

/// Everything needed to publish one release.
#[derive(Debug)]
pub struct ReleaseRequest {
    pub artifact_paths: Vec<PathBuf>,
    pub branch: Option<String>,
    pub draft: bool,
    pub latest: bool,
    pub notes: Vec<ReleaseNote>,
    pub number: Option<u64>,
    pub target: Option<String>,
    pub version: String,
}

/// Build the release subcommand.
pub fn command() -> Command {
    let mut cmd = Command::new(NAME)
        .visible_alias("github")
        .about("Create a release in GitHub");

    for spec in SPECS {
        cmd = cli::register(cmd, spec);
    }

    cmd
}

/// Resolve options, validate referenced files, and publish the release.
pub async fn execute(matches: &ArgMatches) -> Result<()> {
    let mut bag = cli::bag_from_matches(matches, &SPECS);
    opts::coerce_positive_integer(&mut bag, &BUILD_NUMBER)?;

    let artifacts = opts::string_array_values(&bag, &ARTIFACTS)?;
    let auth_token = opts::required_string_value(&bag, &AUTH_TOKEN)?;
    let branch = opts::string_value(&bag, &BUILD_BRANCH)?;
    let number = opts::number_value(&bag, &BUILD_NUMBER)?;
    let draft = opts::bool_value(&bag, &DRAFT)?.unwrap_or(false);
    let api_url = opts::required_string_value(&bag, &API_URL)?;
    let notes_file = opts::required_string_value(&bag, &RELEASE_NOTES)?;
    let owner = opts::required_string_value(&bag, &OWNER)?;
    let repo = opts::required_string_value(&bag, &REPOSITORY)?;
    let latest = opts::bool_value(&bag, &TAG_AS_LATEST)?.unwrap_or(true);
    let target = opts::string_value(&bag, &TARGET)?;
    let upload_url = opts::required_string_value(&bag, &UPLOAD_URL)?;
    let version = opts::required_string_value(&bag, &VERSION)?;

    let notes_path =
        files::validate_file(Some(notes_file.as_str()), RELEASE_NOTES.key)
            .await?;
    let release_notes: Vec<ReleaseNote> =
        files::json_from_file(&notes_path).await?;

    let mut artifact_paths = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        artifact_paths.push(
            files::validate_file(Some(artifact.as_str()), ARTIFACTS.key)
                .await?,
        );
    }

    let forge = Github::new(RemoteConfig {
        api_url,
        upload_url,
        owner,
        repo,
        token: SecretString::from(auth_token),
    })?;

    run(
        &forge,
        ReleaseRequest {
            artifact_paths,
            branch,
            draft,
            latest,
            notes: release_notes,
            number,
            target,
            version,
        },
    )
    .await
}

/// Create the release and upload each artifact, strictly in sequence.
///
/// Any failure propagates immediately: uploads already completed are not
/// rolled back and the release is not deleted.
pub async fn run(forge: &dyn Forge, req: ReleaseRequest) -> Result<()> {
    let description = notes::render_description(
        &req.notes,
        &req.version,
        req.branch.as_deref(),
        req.number,
    )?;

    match req.number {
        Some(number) => info!(
            "creating release \"{}\" from build \"{}\"...",
            req.version, number
        ),
        None => info!("creating release \"{}\"...", req.version),
    }

    let release = forge
        .create_release(CreateReleaseRequest {
            tag_name: format!("v{}", req.version),
            target_commitish: req.target.clone(),
            latest: req.latest,
            draft: req.draft,
            name: req.version.clone(),
            body: description,
        })
        .await?;

    for path in &req.artifact_paths {
        info!("uploading artifact \"{}\"...", path.display());

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| RelnotesError::InvalidValue {
                option: ARTIFACTS.key.to_string(),
                value: path.display().to_string(),
                reason: "artifact path has no file name",
            })?;

        let content = tokio::fs::read(path).await?;

        forge
            .upload_asset(UploadAssetRequest {
                release_id: release.id,
                name,
                content,
            })
            .await?;
    }

    info!(
        "{} created at \"{}\"",
        if req.draft { "draft release" } else { "release" },
        release.html_url
    );

    Ok(())
}
