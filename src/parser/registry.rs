//! Image identity and naming for one conversion run.

use std::collections::HashMap;

use super::urls::{canonicalize_image_url, infer_extension, resolve_url};
use crate::model::ImageRef;

/// Append-only mapping from canonical image URL to [`ImageRef`].
///
/// A registry belongs to exactly one run; concurrent runs use their own.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    images: Vec<ImageRef>,
    by_canonical: HashMap<String, usize>,
}

impl ImageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image source and return its file name.
    ///
    /// A source whose canonical URL is already known returns the existing
    /// file name without consuming an ordinal.
    pub fn register(&mut self, raw_url: &str) -> String {
        let original_url = resolve_url(raw_url);
        let canonical_url = canonicalize_image_url(&original_url);

        if let Some(&index) = self.by_canonical.get(&canonical_url) {
            return self.images[index].filename.clone();
        }

        let ordinal = self.images.len() + 1;
        let extension = infer_extension(&canonical_url);
        let image = ImageRef::new(ordinal, canonical_url.clone(), original_url, &extension);
        log::debug!("Registered {} as {}", canonical_url, image.filename);

        let filename = image.filename.clone();
        self.by_canonical.insert(canonical_url, self.images.len());
        self.images.push(image);
        filename
    }

    /// Look up an image by canonical URL.
    pub fn get(&self, canonical_url: &str) -> Option<&ImageRef> {
        self.by_canonical
            .get(canonical_url)
            .map(|&index| &self.images[index])
    }

    /// Check whether a canonical URL is registered.
    pub fn contains(&self, canonical_url: &str) -> bool {
        self.by_canonical.contains_key(canonical_url)
    }

    /// Registered images in ordinal order.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if no image has been registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Consume the registry, returning images in ordinal order.
    pub fn into_images(self) -> Vec<ImageRef> {
        self.images
    }
}
