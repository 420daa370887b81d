//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{
    error::Result,
    forge::types::{CreateReleaseRequest, CreatedRelease, UploadAssetRequest},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Create a release on the forge and return the created entity.
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<CreatedRelease>;

    /// Upload one binary asset to an existing release.
    async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()>;
}
