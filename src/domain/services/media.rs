use async_trait::async_trait;

use crate::domain::models::media::{MediaError, UploadedImage};

/// External image host. Returns the host-assigned reference id.
#[async_trait]
pub trait MediaService: 'static + Sync + Send {
    async fn upload(&self, image: UploadedImage) -> Result<String, MediaError>;
}
