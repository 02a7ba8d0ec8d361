//! Image list and shape endpoints

use crate::ComputeClient;
use crate::error::Result;
use ocompute_core::domain::image::ImageList;
use ocompute_core::domain::shape::Shape;

/// Container holding the images Oracle publishes for every account
const PUBLIC_IMAGES: &str = "/oracle/public";

impl ComputeClient {
    /// List image lists available to the account
    ///
    /// Returns the account's own image lists followed by the public ones.
    pub async fn list_images(&self) -> Result<Vec<ImageList>> {
        let mut images: Vec<ImageList> = self.get_list(&self.container_url("imagelist")).await?;

        let public_url = format!("{}/imagelist{}/", self.base_url, PUBLIC_IMAGES);
        images.extend(self.get_list::<ImageList>(&public_url).await?);

        Ok(images)
    }

    /// List all shapes
    pub async fn list_shapes(&self) -> Result<Vec<Shape>> {
        let url = format!("{}/shape/", self.base_url);
        self.get_list(&url).await
    }
}
