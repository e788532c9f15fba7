//! Map capture: grab a dragged screen region, trim its black border, save JPEG.
//!
//! This module provides:
//! - Desktop screenshot (`capture_virtual_screen`)
//! - Drag selection state (`DragSelection`)
//! - Border detection (`measure_trim_rect`)
//! - JPEG output (`save_jpeg`)

pub mod jpeg;
pub mod screenshot;
pub mod selection;
pub mod trim;

use image::RgbaImage;

use crate::config::CaptureConfig;

pub use jpeg::save_jpeg;
pub use screenshot::{capture_virtual_screen, enable_dpi_awareness, ScreenCapture};
pub use selection::{DragSelection, SelectionRect};
pub use trim::{crop, is_similar_color, measure_trim_rect, TrimRect};

/// A selected region together with its detected trim rectangle.
pub struct ProcessedCapture {
    /// The selected region as captured
    pub selected: RgbaImage,
    /// Map area inside `selected`
    pub trim: TrimRect,
    /// `selected` cropped to `trim`; this is what gets saved
    pub trimmed: RgbaImage,
}

/// Cuts `selection` out of the screenshot and trims it.
///
/// Returns `None` for selections smaller than the configured minimum.
pub fn process_selection(
    screen: &RgbaImage,
    selection: SelectionRect,
    config: &CaptureConfig,
) -> Option<ProcessedCapture> {
    if !selection.is_at_least(config.min_selection_size) {
        crate::log(&format!(
            "Selection {}x{} is too small; ignored",
            selection.width, selection.height
        ));
        return None;
    }

    let region = selection.to_pixels(screen.dimensions());
    let selected = crop(screen, region);
    let trim = measure_trim_rect(&selected, config.trim_threshold);
    let trimmed = crop(&selected, trim);

    crate::log(&format!(
        "Selected {}x{} at ({}, {}); trimmed to {}x{} at ({}, {})",
        region.width, region.height, region.x, region.y, trim.width, trim.height, trim.x, trim.y
    ));

    Some(ProcessedCapture {
        selected,
        trim,
        trimmed,
    })
}
