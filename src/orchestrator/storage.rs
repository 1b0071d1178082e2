// ABOUTME: Image and volume operations.
// ABOUTME: Pulls block until the daemon reports completion.

use futures::StreamExt;

use super::error::{map_client_error, map_pull_error, map_removal_error};
use super::{ContainerOrchestrator, Result, SpecError};
use crate::runtime::{ImageSummary, PullProgress, RuntimeClient};
use crate::types::{ImageId, ImageName, VolumeName};

impl<C: RuntimeClient> ContainerOrchestrator<C> {
    /// Pull an image and wait until the daemon reports completion.
    pub async fn pull_image(&self, image: &str) -> Result<()> {
        self.pull_image_with_progress(image, |_| {}).await
    }

    /// Pull an image, handing every progress event to `on_progress`.
    pub async fn pull_image_with_progress<F>(&self, image: &str, mut on_progress: F) -> Result<()>
    where
        F: FnMut(&PullProgress) + Send,
    {
        let name = ImageName::parse(image).map_err(SpecError::from)?;
        let reference = name.reference();
        tracing::info!("pulling {}", reference);

        let mut stream = self
            .client
            .pull_image(&name)
            .await
            .map_err(|e| map_pull_error(&reference, e))?;

        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| map_pull_error(&reference, e))?;
            tracing::debug!("pull {}: {}", reference, event.status);
            on_progress(&event);
        }

        tracing::info!("pulled {}", reference);
        Ok(())
    }

    pub async fn list_images(&self) -> Result<Vec<ImageId>> {
        Ok(self
            .list_image_summaries()
            .await?
            .into_iter()
            .map(|img| img.id)
            .collect())
    }

    pub async fn list_image_summaries(&self) -> Result<Vec<ImageSummary>> {
        self.client
            .list_images()
            .await
            .map_err(|e| map_client_error("list", "images", e))
    }

    /// Remove an image. Fails with `InUse` while a container references it.
    pub async fn remove_image(&self, id: &ImageId) -> Result<()> {
        tracing::debug!("removing image {}", id.short());
        self.client
            .remove_image(id, false)
            .await
            .map_err(|e| map_removal_error("remove image", id.as_str(), e))
    }

    pub async fn create_volume(&self, name: &VolumeName) -> Result<VolumeName> {
        tracing::debug!("creating volume {}", name);
        let volume = self
            .client
            .create_volume(name)
            .await
            .map_err(|e| map_client_error("create volume", name.as_str(), e))?;
        Ok(volume.name)
    }

    pub async fn list_volumes(&self) -> Result<Vec<VolumeName>> {
        let volumes = self
            .client
            .list_volumes()
            .await
            .map_err(|e| map_client_error("list", "volumes", e))?;
        Ok(volumes.into_iter().map(|v| v.name).collect())
    }

    /// Remove a volume. Fails with `InUse` while a container references it.
    pub async fn remove_volume(&self, name: &VolumeName) -> Result<()> {
        tracing::debug!("removing volume {}", name);
        self.client
            .remove_volume(name, false)
            .await
            .map_err(|e| map_removal_error("remove volume", name.as_str(), e))
    }
}
