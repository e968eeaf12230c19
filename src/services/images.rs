//! Image collaborator.
//!
//! Images are opaque to the placement core; this module only hands out
//! [`ImageRef`] handles and releases them again. Releasing is best-effort:
//! failures are logged and never propagated.

use crate::constants::IMAGES_DIR_NAME;
use crate::models::ImageRef;
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// What an acquired image is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// A sortable item picture
    Item,
    /// A category header picture
    Header,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => f.write_str("item"),
            Self::Header => f.write_str("header"),
        }
    }
}

/// Outcome of asking for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAcquisition {
    /// The image is stored and addressable by this handle.
    Acquired(ImageRef),
    /// The user dismissed the picker.
    Cancelled,
}

/// Image collaborator contract.
pub trait ImageStore {
    /// Stores the picked image for `activity_id`. `None` means nothing was picked.
    fn acquire_image(
        &self,
        activity_id: &str,
        kind: ImageKind,
        source: Option<&Path>,
    ) -> Result<ImageAcquisition>;

    /// Deletes one image. Failures are logged only.
    fn release_image(&self, image: &ImageRef);

    /// Deletes every image belonging to `activity_id`. Failures are logged only.
    fn release_activity(&self, activity_id: &str);
}

/// Copies picked files under `<root>/<activity-id>/`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the `images/` folder of `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(IMAGES_DIR_NAME))
    }

    /// Folder holding one activity's images.
    #[must_use]
    pub fn activity_dir(&self, activity_id: &str) -> PathBuf {
        self.root.join(activity_id)
    }

    fn path_of(image: &ImageRef) -> PathBuf {
        let handle = image.as_str();
        PathBuf::from(handle.strip_prefix("file://").unwrap_or(handle))
    }
}

impl ImageStore for FsImageStore {
    fn acquire_image(
        &self,
        activity_id: &str,
        kind: ImageKind,
        source: Option<&Path>,
    ) -> Result<ImageAcquisition> {
        let Some(source) = source else {
            return Ok(ImageAcquisition::Cancelled);
        };

        if !source.is_file() {
            anyhow::bail!("Image file not found: {}", source.display());
        }

        let dir = self.activity_dir(activity_id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create image directory: {}", dir.display()))?;

        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_ascii_lowercase();
        let dest = dir.join(format!("{kind}_{}.{extension}", Uuid::new_v4()));

        fs::copy(source, &dest).with_context(|| {
            format!(
                "Failed to copy image {} to {}",
                source.display(),
                dest.display()
            )
        })?;

        debug!(activity = activity_id, %kind, path = %dest.display(), "stored image");
        Ok(ImageAcquisition::Acquired(ImageRef::new(format!(
            "file://{}",
            dest.display()
        ))))
    }

    fn release_image(&self, image: &ImageRef) {
        let path = Self::path_of(image);
        if !path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "failed to release image");
        }
    }

    fn release_activity(&self, activity_id: &str) {
        let dir = self.activity_dir(activity_id);
        if !dir.exists() {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&dir) {
            warn!(path = %dir.display(), error = %e, "failed to release activity images");
        }
    }
}
