//! Drag selection of a capture region.
//!
//! Pointer down anchors the selection, every move updates the normalized
//! rectangle, release completes it. Cancelling drops it without a result.

use super::trim::TrimRect;

/// Rectangle in image pixel coordinates (may be fractional while dragging).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SelectionRect {
    /// Normalized rectangle spanned by two corner points.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }

    /// True when both sides are at least `min_size` pixels.
    pub fn is_at_least(&self, min_size: u32) -> bool {
        self.width >= min_size as f32 && self.height >= min_size as f32
    }

    /// Whole-pixel rectangle clamped to an image of `bounds` (width, height).
    pub fn to_pixels(&self, bounds: (u32, u32)) -> TrimRect {
        let clamp = |v: f32, max: u32| (v.max(0.0) as u32).min(max);
        let x = clamp(self.x, bounds.0);
        let y = clamp(self.y, bounds.1);
        let right = clamp(self.x + self.width, bounds.0);
        let bottom = clamp(self.y + self.height, bounds.1);
        TrimRect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// State of one drag gesture.
#[derive(Clone, Debug, Default)]
pub struct DragSelection {
    anchor: Option<(f32, f32)>,
    current: Option<SelectionRect>,
}

impl DragSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection at `pos`, discarding any previous one.
    pub fn press(&mut self, pos: (f32, f32)) {
        self.anchor = Some(pos);
        self.current = None;
    }

    /// Updates the selection while the pointer is held. Ignored before `press`.
    pub fn drag_to(&mut self, pos: (f32, f32)) -> Option<SelectionRect> {
        let anchor = self.anchor?;
        let rect = SelectionRect::from_corners(anchor, pos);
        self.current = Some(rect);
        Some(rect)
    }

    /// Rectangle to draw while dragging.
    pub fn current(&self) -> Option<SelectionRect> {
        self.current
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Completes the gesture.
    ///
    /// Returns the last rectangle seen, or an empty one at the anchor when the
    /// pointer never moved. `None` if no drag was started.
    pub fn release(&mut self) -> Option<SelectionRect> {
        let anchor = self.anchor.take()?;
        let rect = self
            .current
            .take()
            .unwrap_or_else(|| SelectionRect::from_corners(anchor, anchor));
        Some(rect)
    }

    /// Abandons the gesture without a result.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_normalizes_rect() {
        let mut drag = DragSelection::new();
        drag.press((100.0, 80.0));
        let rect = drag.drag_to((40.0, 120.0)).unwrap();
        assert_eq!(
            rect,
            SelectionRect {
                x: 40.0,
                y: 80.0,
                width: 60.0,
                height: 40.0,
            }
        );
        assert_eq!(drag.release(), Some(rect));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_last_move_wins() {
        let mut drag = DragSelection::new();
        drag.press((0.0, 0.0));
        drag.drag_to((10.0, 10.0));
        drag.drag_to((30.0, 20.0));
        let rect = drag.release().unwrap();
        assert_eq!((rect.width, rect.height), (30.0, 20.0));
    }

    #[test]
    fn test_move_before_press_ignored() {
        let mut drag = DragSelection::new();
        assert!(drag.drag_to((5.0, 5.0)).is_none());
        assert!(drag.release().is_none());
    }

    #[test]
    fn test_release_without_move_is_empty() {
        let mut drag = DragSelection::new();
        drag.press((7.0, 9.0));
        let rect = drag.release().unwrap();
        let expected = SelectionRect {
            x: 7.0,
            y: 9.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(rect, expected);
        assert!(!rect.is_at_least(10));
    }

    #[test]
    fn test_cancel_drops_selection() {
        let mut drag = DragSelection::new();
        drag.press((0.0, 0.0));
        drag.drag_to((50.0, 50.0));
        drag.cancel();
        assert!(drag.current().is_none());
        assert!(drag.release().is_none());
    }

    #[test]
    fn test_min_size() {
        let rect = SelectionRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 9.5,
        };
        assert!(!rect.is_at_least(10));
        let rect = SelectionRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(rect.is_at_least(10));
    }

    #[test]
    fn test_to_pixels_clamps() {
        let rect = SelectionRect {
            x: -5.0,
            y: 10.5,
            width: 200.0,
            height: 20.0,
        };
        assert_eq!(
            rect.to_pixels((100, 100)),
            TrimRect {
                x: 0,
                y: 10,
                width: 100,
                height: 20,
            }
        );
    }
}
