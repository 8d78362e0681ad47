//! Rendered icon images and icon sets.
//!
//! An [`IconImage`] is one square rendering of a variant. An [`IconSet`]
//! groups a master rendering with the smaller copies resampled from it.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::composer::IconVariant;
use crate::error::{Error, Result};

/// A single square icon rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in straight-alpha RGBA format.
    pub data: RgbaImage,

    /// The variant this image was rendered from.
    pub variant: IconVariant,
}

impl IconImage {
    /// Tags rendered pixel data with the variant that produced it.
    pub fn new(data: RgbaImage, variant: IconVariant) -> Self {
        Self { data, variant }
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.data.width()
    }

    /// Whether the image is saved without an alpha channel.
    pub fn is_opaque(&self) -> bool {
        self.variant.is_opaque()
    }

    /// Returns a Lanczos3-resampled copy at `size` x `size`.
    pub fn resample(&self, size: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid("size", "cannot resample to zero pixels"));
        }
        if size == self.size() {
            return Ok(self.clone());
        }
        let data = imageops::resize(&self.data, size, size, FilterType::Lanczos3);
        Ok(Self::new(data, self.variant))
    }

    /// Writes the image as PNG, dropping alpha for opaque variants.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let result = if self.is_opaque() {
            DynamicImage::ImageRgba8(self.data.clone()).to_rgb8().save(path)
        } else {
            self.data.save(path)
        };
        result.map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Renderings of one variant at several sizes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    /// The renderings, master first.
    pub images: Vec<IconImage>,
}

impl IconSet {
    /// Creates a new empty icon set.
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Resamples `master` to each of `sizes`, keeping the master first.
    ///
    /// Sizes already in the set, including the master's own, are skipped.
    pub fn derive(master: IconImage, sizes: &[u32]) -> Result<Self> {
        let mut set = Self::new();
        set.add_image(master);
        for &size in sizes {
            if set.images.iter().any(|img| img.size() == size) {
                continue;
            }
            let image = set.images[0].resample(size)?;
            set.add_image(image);
        }
        Ok(set)
    }

    /// Adds an image to the icon set.
    pub fn add_image(&mut self, image: IconImage) {
        self.images.push(image);
    }

    /// Returns the number of images in the set.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if the icon set contains no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Finds the image whose size is closest to `target_size`.
    pub fn find_by_size(&self, target_size: u32) -> Option<&IconImage> {
        self.images
            .iter()
            .min_by_key(|img| img.size().abs_diff(target_size))
    }
}
