//! JPEG output for trimmed captures.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 100;

/// Writes `img` to `path` as a JPEG with the given quality (1-100).
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn save_jpeg(img: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    crate::log(&format!("Saved to {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_save_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps").join("capture.jpg");
        let img = RgbaImage::from_pixel(32, 24, Rgba([200, 120, 40, 255]));

        save_jpeg(&img, &path, DEFAULT_QUALITY).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (32, 24));
        let p = loaded.get_pixel(16, 12);
        assert!(p[0].abs_diff(200) < 8 && p[1].abs_diff(120) < 8 && p[2].abs_diff(40) < 8);
    }

    #[test]
    fn test_save_jpeg_bad_path() {
        let dir = tempdir().unwrap();
        // A directory cannot be overwritten by a file
        let img = RgbaImage::new(4, 4);
        assert!(save_jpeg(&img, dir.path(), DEFAULT_QUALITY).is_err());
    }
}
