//! Slide image loading.
//!
//! A missing image is not an error: [`load_image`] returns `Ok(None)` and
//! the slide falls back to a placeholder. Images the `image` crate can
//! decode are cropped and scaled to fill the slide frame, then re-encoded as
//! PNG. Anything else is served as stored.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;
use image::imageops::FilterType;

use crate::{AssetError, FileCache};

/// Pixel size every decodable slide image is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageFrame {
    /// The 600x400 frame the slides are laid out for.
    pub const SLIDE: Self = Self {
        width: 600,
        height: 400,
    };
}

/// A slide image ready to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Where the image was read from.
    pub path: PathBuf,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

/// Guesses the MIME type of a file from its extension.
#[must_use]
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Crops and scales an encoded image to fill `frame` (Lanczos3) and
/// returns it as PNG.
///
/// # Errors
///
/// Returns [`AssetError::Image`] if `bytes` cannot be decoded as `format`
/// or the result cannot be encoded.
pub fn fit_to_frame(
    bytes: &[u8],
    format: ImageFormat,
    frame: ImageFrame,
) -> Result<Vec<u8>, AssetError> {
    let fitted = image::load_from_memory_with_format(bytes, format)?.resize_to_fill(
        frame.width,
        frame.height,
        FilterType::Lanczos3,
    );

    let mut out = Cursor::new(Vec::new());
    fitted.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Reads an image from disk, fitting it to `frame` when one is given and the
/// format can be decoded.
///
/// # Errors
///
/// * [`AssetError::Io`] if the file exists but cannot be read
/// * [`AssetError::Image`] if a decodable format fails to decode
pub fn load_image(path: &Path, frame: Option<ImageFrame>) -> Result<Option<ImageAsset>, AssetError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Image not found: {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            log::error!("Error loading image {}: {e}", path.display());
            return Err(e.into());
        }
    };

    let decodable = ImageFormat::from_path(path)
        .ok()
        .filter(ImageFormat::reading_enabled);

    let asset = match (frame, decodable) {
        (Some(frame), Some(format)) => {
            let bytes = fit_to_frame(&bytes, format, frame).inspect_err(|e| {
                log::error!("Error resizing image {}: {e}", path.display());
            })?;
            log::debug!(
                "Fitted {} to {}x{}",
                path.display(),
                frame.width,
                frame.height
            );
            ImageAsset {
                path: path.to_path_buf(),
                content_type: ImageFormat::Png.to_mime_type().to_string(),
                bytes,
            }
        }
        _ => ImageAsset {
            path: path.to_path_buf(),
            content_type: content_type_for(path),
            bytes,
        },
    };

    Ok(Some(asset))
}

/// Cached access to the images in one asset directory.
pub struct ImageStore {
    root: PathBuf,
    frame: Option<ImageFrame>,
    cache: FileCache<Option<ImageAsset>>,
}

impl ImageStore {
    /// Creates a store serving images from `root`, fitted to `frame` if set.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, frame: Option<ImageFrame>) -> Self {
        Self {
            root: root.into(),
            frame,
            cache: FileCache::new(),
        }
    }

    /// Directory the store reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the image called `name`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// * [`AssetError::InvalidName`] if `name` is not a plain file name
    /// * [`AssetError::Io`] if the file cannot be read
    /// * [`AssetError::Image`] if the file cannot be decoded
    pub fn get(&self, name: &str) -> Result<Arc<Option<ImageAsset>>, AssetError> {
        if !is_plain_file_name(name) {
            return Err(AssetError::InvalidName {
                name: name.to_string(),
            });
        }

        let frame = self.frame;
        self.cache
            .get_or_load(&self.root.join(name), |path| load_image(path, frame))
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("5.png")), "image/png");
        assert_eq!(content_type_for(Path::new("map.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("map.bmp")), "image/bmp");
        assert_eq!(content_type_for(Path::new("logo")), "application/octet-stream");
    }

    #[test]
    fn missing_image_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("9.png");
        assert!(load_image(&path, Some(ImageFrame::SLIDE)).unwrap().is_none());
    }

    #[test]
    fn images_are_fitted_to_the_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.png");
        write_png(&path, 1200, 300);

        let image = load_image(&path, Some(ImageFrame::SLIDE)).unwrap().unwrap();
        assert_eq!(image.content_type, "image/png");

        let decoded = image::load_from_memory(&image.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (600, 400));
    }

    #[test]
    fn frame_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2.png");
        write_png(&path, 50, 50);

        let frame = ImageFrame {
            width: 30,
            height: 20,
        };
        let image = load_image(&path, Some(frame)).unwrap().unwrap();
        let decoded = image::load_from_memory(&image.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }

    #[test]
    fn corrupt_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("3.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        assert!(matches!(
            load_image(&path, Some(ImageFrame::SLIDE)),
            Err(AssetError::Image(_))
        ));
    }

    #[test]
    fn store_serves_raw_files_without_a_frame() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let store = ImageStore::new(dir.path(), None);
        let image = store.get("1.png").unwrap();
        let image = image.as_ref().as_ref().unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);

        assert!(store.get("2.png").unwrap().is_none());
    }

    #[test]
    fn undecodable_formats_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();

        let store = ImageStore::new(dir.path(), Some(ImageFrame::SLIDE));
        let image = store.get("logo.svg").unwrap();
        let image = image.as_ref().as_ref().unwrap();
        assert_eq!(image.content_type, "image/svg+xml");
        assert_eq!(image.bytes, b"<svg/>");
    }

    #[test]
    fn store_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), None);
        for name in ["../secret.png", "a/b.png", "..", "", ".hidden"] {
            assert!(
                matches!(store.get(name), Err(AssetError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
    }
}
