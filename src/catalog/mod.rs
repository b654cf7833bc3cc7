// SPDX-License-Identifier: MPL-2.0
//! The template catalog: bundled style images browsable in fixed-size pages.
//!
//! Templates are decoded once at startup from the styles directory and are
//! immutable afterwards. File names are sorted before decoding so the
//! catalog order is deterministic across platforms. A single configured
//! page size drives both the strip layout and the max-page computation.

use crate::error::{Error, Result};
use crate::media::image::{decode_and_resize, NormalizedImage};
use iced::widget::image;
use std::path::Path;

/// One preset style: the canonical-size image plus its strip thumbnail.
#[derive(Debug, Clone)]
pub struct Template {
    image: NormalizedImage,
    thumbnail: image::Handle,
}

impl Template {
    fn new(image: NormalizedImage) -> Self {
        let thumbnail = image.thumbnail_handle();
        Self { image, thumbnail }
    }

    /// The template at canonical size, ready to become the style slot.
    pub fn image(&self) -> &NormalizedImage {
        &self.image
    }

    /// Strip-sized display handle, derived once at load.
    pub fn thumbnail(&self) -> image::Handle {
        self.thumbnail.clone()
    }
}

/// Ordered, paginated collection of style templates.
#[derive(Debug)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    page_size: usize,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }
}

impl TemplateCatalog {
    /// Loads every decodable image in `dir`, sorted by file name.
    ///
    /// Files that fail to decode are skipped with a log line rather than
    /// aborting the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the directory itself cannot be read.
    pub fn load(dir: &Path, page_size: usize) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            Error::Decode(format!("cannot read templates directory {}: {e}", dir.display()))
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            match decode_and_resize(&path) {
                Ok(image) => templates.push(Template::new(image)),
                Err(e) => eprintln!("Skipping template {}: {e}", path.display()),
            }
        }

        Ok(Self::from_images_inner(templates, page_size))
    }

    /// Builds a catalog from already-decoded images. Used by tests and by
    /// callers that source templates elsewhere.
    pub fn from_images(images: Vec<NormalizedImage>, page_size: usize) -> Self {
        Self::from_images_inner(images.into_iter().map(Template::new).collect(), page_size)
    }

    fn from_images_inner(templates: Vec<Template>, page_size: usize) -> Self {
        Self {
            templates,
            page_size: page_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Read-only access by catalog index.
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// Number of pages; at least 1 even for an empty catalog.
    pub fn max_page(&self) -> usize {
        self.templates.len().div_ceil(self.page_size).max(1)
    }

    /// Maps a 1-indexed page and a slot within it to a catalog index.
    pub fn template_index(&self, page: usize, slot: usize) -> usize {
        (page.saturating_sub(1)) * self.page_size + slot
    }

    /// The templates visible on a page, one entry per slot. Slots past the
    /// end of the catalog are `None` and render as disabled placeholders.
    pub fn page_slots(&self, page: usize) -> Vec<Option<&Template>> {
        (0..self.page_size)
            .map(|slot| self.get(self.template_index(page, slot)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::image::IMAGE_SIZE;
    use image_rs::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn solid_image(level: f32) -> NormalizedImage {
        NormalizedImage::from_pixels(vec![level; (IMAGE_SIZE * IMAGE_SIZE * 3) as usize])
            .expect("canonical buffer")
    }

    fn catalog_of(count: usize, page_size: usize) -> TemplateCatalog {
        let images = (0..count).map(|_| solid_image(0.5)).collect();
        TemplateCatalog::from_images(images, page_size)
    }

    #[test]
    fn seventeen_templates_at_page_size_eight_gives_three_pages() {
        let catalog = catalog_of(17, 8);
        assert_eq!(catalog.max_page(), 3);
    }

    #[test]
    fn last_page_has_one_template_and_seven_empty_slots() {
        let catalog = catalog_of(17, 8);
        let slots = catalog.page_slots(3);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots.iter().filter(|s| s.is_some()).count(), 1);
        assert!(slots[0].is_some());
        assert!(slots[1..].iter().all(|s| s.is_none()));
    }

    #[test]
    fn empty_catalog_still_has_one_page() {
        let catalog = catalog_of(0, 8);
        assert_eq!(catalog.max_page(), 1);
        assert!(catalog.page_slots(1).iter().all(|s| s.is_none()));
    }

    #[test]
    fn exact_multiple_does_not_add_a_trailing_page() {
        let catalog = catalog_of(16, 8);
        assert_eq!(catalog.max_page(), 2);
    }

    #[test]
    fn template_index_maps_page_and_slot() {
        let catalog = catalog_of(17, 8);
        assert_eq!(catalog.template_index(1, 0), 0);
        assert_eq!(catalog.template_index(2, 0), 8);
        assert_eq!(catalog.template_index(3, 4), 20);
    }

    #[test]
    fn load_sorts_file_names_for_deterministic_order() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        // Written out of order on purpose; red must still come first.
        RgbImage::from_pixel(8, 8, Rgb([0, 0, 255]))
            .save(temp_dir.path().join("b_blue.png"))
            .expect("write blue");
        RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]))
            .save(temp_dir.path().join("a_red.png"))
            .expect("write red");

        let catalog = TemplateCatalog::load(temp_dir.path(), 8).expect("load should succeed");
        assert_eq!(catalog.len(), 2);

        let first = catalog.get(0).expect("first template").image();
        assert!(first.pixels()[0] > 0.9, "a_red.png should be first");
        let second = catalog.get(1).expect("second template").image();
        assert!(second.pixels()[2] > 0.9, "b_blue.png should be second");
    }

    #[test]
    fn load_skips_undecodable_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        RgbImage::from_pixel(8, 8, Rgb([10, 10, 10]))
            .save(temp_dir.path().join("ok.png"))
            .expect("write png");
        std::fs::write(temp_dir.path().join("broken.png"), b"not an image")
            .expect("write broken file");

        let catalog = TemplateCatalog::load(temp_dir.path(), 8).expect("load should succeed");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn load_missing_directory_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("no_such_dir");
        assert!(TemplateCatalog::load(&missing, 8).is_err());
    }
}
