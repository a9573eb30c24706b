use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::image::DecodedImage;
use crate::domain::repository::ImageStore;
use crate::error::RecipesServiceError;

/// Sub-directory of the media root holding recipe images.
pub const RECIPE_IMAGE_DIR: &str = "recipes/images";

/// Writes images under `root` and serves them below `url_prefix`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    pub root: PathBuf,
    pub url_prefix: String,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        let mut url_prefix = url_prefix.to_owned();
        if !url_prefix.ends_with('/') {
            url_prefix.push('/');
        }
        Self {
            root: root.into(),
            url_prefix,
        }
    }
}

impl FsImageStore {
    /// File behind a URL this store handed out. `None` for anything else,
    /// including paths that would leave the image directory.
    fn path_of(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.strip_prefix(self.url_prefix.as_str())?);
        let contained = relative.starts_with(RECIPE_IMAGE_DIR)
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        contained.then(|| self.root.join(relative))
    }
}

impl ImageStore for FsImageStore {
    async fn save(&self, image: &DecodedImage) -> Result<String, RecipesServiceError> {
        let dir = self.root.join(RECIPE_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create image directory {}", dir.display()))?;
        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .with_context(|| format!("write image {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = image.bytes.len(), "stored recipe image");
        Ok(format!("{}{RECIPE_IMAGE_DIR}/{file_name}", self.url_prefix))
    }

    async fn remove(&self, url: &str) -> Result<(), RecipesServiceError> {
        let Some(path) = self.path_of(url) else {
            tracing::debug!(url, "image url outside media store, nothing to remove");
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed recipe image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove image {}", path.display()))
                .into()),
        }
    }
}
