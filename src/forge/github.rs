//! Implements the Forge trait for GitHub
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use reqwest::header::{
    AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue,
    USER_AGENT,
};
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        traits::Forge,
        types::{CreateReleaseRequest, CreatedRelease, UploadAssetRequest},
    },
};

const ASSET_CONTENT_TYPE: &str = "application/octet-stream";

/// Wire body for the create-release endpoint. GitHub expects the
/// "make_latest" flag as the literal strings "true"/"false", and rejects a
/// null target_commitish, so that field is omitted when absent.
#[derive(Debug, Serialize)]
struct CreateReleaseBody<'a> {
    tag_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_commitish: Option<&'a str>,
    make_latest: &'a str,
    draft: bool,
    name: &'a str,
    body: &'a str,
}

/// GitHub forge implementation using Octocrab for release creation and a
/// plain HTTP client for asset uploads against the upload base URL.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
    uploader: reqwest::Client,
}

impl Github {
    /// Create GitHub clients with personal access token authentication and
    /// API base URL configuration. The repository name doubles as the
    /// user-agent identifier.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?
            .add_header(USER_AGENT, config.repo.clone())
            .build()?;

        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.token.expose_secret()
        ))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let uploader = reqwest::Client::builder()
            .user_agent(config.repo.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            config,
            instance,
            uploader,
        })
    }
}

#[async_trait]
impl Forge for Github {
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<CreatedRelease> {
        let endpoint = format!(
            "{}/repos/{}/{}/releases",
            self.config.api_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo
        );

        let body = serde_json::json!(CreateReleaseBody {
            tag_name: &req.tag_name,
            target_commitish: req.target_commitish.as_deref(),
            make_latest: if req.latest { "true" } else { "false" },
            draft: req.draft,
            name: &req.name,
            body: &req.body,
        });

        debug!("creating release for tag: {}", req.tag_name);

        let release: CreatedRelease =
            self.instance.post(endpoint, Some(&body)).await?;

        debug!("created release: {}", release.id);

        Ok(release)
    }

    async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()> {
        let endpoint = format!(
            "{}/repos/{}/{}/releases/{}/assets",
            self.config.upload_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            req.release_id
        );

        debug!("uploading asset \"{}\" to {endpoint}", req.name);

        let response = self
            .uploader
            .post(endpoint)
            .query(&[("name", req.name.as_str())])
            .header(CONTENT_TYPE, ASSET_CONTENT_TYPE)
            .header(CONTENT_LENGTH, req.content.len())
            .body(req.content)
            .send()
            .await?;

        response.error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_clients_from_remote_config() {
        let config = RemoteConfig {
            owner: "owner".into(),
            repo: "repo".into(),
            token: secrecy::SecretString::from("token".to_string()),
            ..RemoteConfig::default()
        };

        let forge = Github::new(config);
        assert!(forge.is_ok());
    }

    #[test]
    fn create_release_body_maps_latest_to_literal_strings() {
        let body = serde_json::json!(CreateReleaseBody {
            tag_name: "v1.0.0",
            target_commitish: None,
            make_latest: "true",
            draft: false,
            name: "1.0.0",
            body: "",
        });

        assert_eq!(body["make_latest"], "true");
        assert_eq!(body["tag_name"], "v1.0.0");
        // absent target must be omitted, not null
        assert!(body.get("target_commitish").is_none());
    }

    #[test]
    fn create_release_body_includes_target_when_present() {
        let body = serde_json::json!(CreateReleaseBody {
            tag_name: "v1.0.0",
            target_commitish: Some("abc123"),
            make_latest: "false",
            draft: true,
            name: "1.0.0",
            body: "notes",
        });

        assert_eq!(body["target_commitish"], "abc123");
        assert_eq!(body["draft"], true);
    }
}
