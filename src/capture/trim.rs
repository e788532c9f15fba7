//! Black-border detection for captured map images.

use image::{imageops, Rgba, RgbaImage};

/// Color of the border around the map.
pub const BORDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Default per-channel difference below which two colors count as similar.
pub const DEFAULT_THRESHOLD: u8 = 92;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TrimRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// True when every RGB channel differs by less than `threshold`. Alpha is ignored.
pub fn is_similar_color(left: Rgba<u8>, right: Rgba<u8>, threshold: u8) -> bool {
    (0..3).all(|c| left[c].abs_diff(right[c]) < threshold)
}

/// Measures the region inside the black border.
///
/// If the center pixel already looks like border, the whole image is
/// returned. Otherwise each edge is scanned inward along the midlines and the
/// first pixel that is not border-colored becomes that side's (inclusive)
/// boundary.
pub fn measure_trim_rect(img: &RgbaImage, threshold: u8) -> TrimRect {
    let (width, height) = img.dimensions();
    let full = TrimRect {
        x: 0,
        y: 0,
        width,
        height,
    };
    if width == 0 || height == 0 {
        return full;
    }

    let center_x = width / 2;
    let center_y = height / 2;
    let is_border =
        |x: u32, y: u32| is_similar_color(BORDER_COLOR, *img.get_pixel(x, y), threshold);

    if is_border(center_x, center_y) {
        return full;
    }

    // The center is not border, so every scan stops at the center at the latest.
    let left = (0..center_x)
        .find(|&x| !is_border(x, center_y))
        .unwrap_or(center_x);
    let right = (center_x..width)
        .rev()
        .find(|&x| !is_border(x, center_y))
        .unwrap_or(center_x);
    let top = (0..center_y)
        .find(|&y| !is_border(center_x, y))
        .unwrap_or(center_y);
    let bottom = (center_y..height)
        .rev()
        .find(|&y| !is_border(center_x, y))
        .unwrap_or(center_y);

    TrimRect {
        x: left,
        y: top,
        width: right - left + 1,
        height: bottom - top + 1,
    }
}

/// Copies `rect` out of `img`, clamped to the image bounds.
pub fn crop(img: &RgbaImage, rect: TrimRect) -> RgbaImage {
    let (w, h) = img.dimensions();
    let x = rect.x.min(w);
    let y = rect.y.min(h);
    let width = rect.width.min(w - x);
    let height = rect.height.min(h - y);
    imageops::crop_imm(img, x, y, width, height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    /// Black image with a filled rectangle of `color`.
    fn bordered(width: u32, height: u32, inner: TrimRect, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if x >= inner.x && x < inner.right() && y >= inner.y && y < inner.bottom() {
                color
            } else {
                BORDER_COLOR
            }
        })
    }

    #[test]
    fn test_similar_color() {
        assert!(is_similar_color(BORDER_COLOR, Rgba([91, 91, 91, 255]), 92));
        assert!(!is_similar_color(BORDER_COLOR, Rgba([92, 0, 0, 255]), 92));
        assert!(!is_similar_color(BORDER_COLOR, Rgba([0, 0, 200, 255]), 92));
        // Alpha does not matter
        assert!(is_similar_color(BORDER_COLOR, Rgba([10, 10, 10, 0]), 92));
    }

    #[test]
    fn test_all_black_returns_full_bounds() {
        let img = RgbaImage::from_pixel(40, 30, BORDER_COLOR);
        assert_eq!(
            measure_trim_rect(&img, DEFAULT_THRESHOLD),
            TrimRect {
                x: 0,
                y: 0,
                width: 40,
                height: 30,
            }
        );
    }

    #[test]
    fn test_dark_center_returns_full_bounds() {
        let inner = TrimRect {
            x: 5,
            y: 5,
            width: 10,
            height: 10,
        };
        let img = bordered(20, 20, inner, Rgba([40, 40, 40, 255]));
        assert_eq!(
            measure_trim_rect(&img, DEFAULT_THRESHOLD),
            TrimRect {
                x: 0,
                y: 0,
                width: 20,
                height: 20,
            }
        );
    }

    #[test]
    fn test_trims_black_border() {
        let inner = TrimRect {
            x: 5,
            y: 2,
            width: 10,
            height: 6,
        };
        let img = bordered(20, 10, inner, WHITE);
        assert_eq!(measure_trim_rect(&img, DEFAULT_THRESHOLD), inner);
    }

    #[test]
    fn test_no_border_keeps_everything() {
        let img = RgbaImage::from_pixel(8, 6, WHITE);
        assert_eq!(
            measure_trim_rect(&img, DEFAULT_THRESHOLD),
            TrimRect {
                x: 0,
                y: 0,
                width: 8,
                height: 6,
            }
        );
    }

    #[test]
    fn test_scans_only_midlines() {
        // Stray bright pixel in a corner is outside both midlines
        let inner = TrimRect {
            x: 4,
            y: 4,
            width: 12,
            height: 12,
        };
        let mut img = bordered(20, 20, inner, WHITE);
        img.put_pixel(0, 0, WHITE);
        assert_eq!(measure_trim_rect(&img, DEFAULT_THRESHOLD), inner);
    }

    #[test]
    fn test_empty_image() {
        let img = RgbaImage::new(0, 0);
        assert_eq!(
            measure_trim_rect(&img, DEFAULT_THRESHOLD),
            TrimRect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            }
        );
    }

    #[test]
    fn test_crop_trimmed_region() {
        let inner = TrimRect {
            x: 5,
            y: 2,
            width: 10,
            height: 6,
        };
        let img = bordered(20, 10, inner, WHITE);
        let rect = measure_trim_rect(&img, DEFAULT_THRESHOLD);
        let trimmed = crop(&img, rect);

        assert_eq!(trimmed.dimensions(), (10, 6));
        assert!(trimmed.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_crop_clamps() {
        let img = RgbaImage::new(10, 10);
        let rect = TrimRect {
            x: 8,
            y: 8,
            width: 5,
            height: 5,
        };
        let cropped = crop(&img, rect);
        assert_eq!(cropped.dimensions(), (2, 2));
    }
}
