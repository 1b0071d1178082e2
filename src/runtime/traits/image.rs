// ABOUTME: Image operations capability for daemon clients.
// ABOUTME: Pull with a progress stream, list, and remove images.

use super::error::ClientError;
use super::shared_types::{ImageSummary, PullStream};
use crate::types::{ImageId, ImageName};
use async_trait::async_trait;

#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Start pulling an image. The pull is complete when the stream ends;
    /// a daemon-reported failure arrives as an `Err` item.
    async fn pull_image(&self, image: &ImageName) -> Result<PullStream, ClientError>;

    async fn list_images(&self) -> Result<Vec<ImageSummary>, ClientError>;

    async fn remove_image(&self, id: &ImageId, force: bool) -> Result<(), ClientError>;
}
