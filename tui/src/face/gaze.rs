//! Ambient Gaze Tracking
//!
//! The face follows the pointer anywhere in the viewport. Every
//! mouse-move is normalized against the cached viewport rect
//! (center-relative, roughly [-0.5, 0.5] per axis), the angle from the
//! face to the pointer is taken via `atan2`, and a rotation in
//! [0, -35] degrees is interpolated from the absolute angle fraction.
//!
//! The tracker only produces the three presentation variables; how the
//! renderer consumes them (pupil offset, mouth lean) is its own
//! business. The viewport rect is cached at construction and refreshed
//! on every resize event.

use ratatui::layout::Rect;

/// The three gaze outputs for the rendering layer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gaze {
    /// Normalized pointer x, center-relative (~[-0.5, 0.5])
    pub x: f32,
    /// Normalized pointer y, center-relative (~[-0.5, 0.5])
    pub y: f32,
    /// Interpolated rotation in degrees, in [0, -35]
    pub rotation_deg: f32,
}

/// Computes gaze outputs from pointer positions
#[derive(Clone, Copy, Debug)]
pub struct GazeTracker {
    /// Cached viewport bounds
    rect: Rect,
}

impl GazeTracker {
    /// Create a tracker for the given viewport
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Refresh the cached viewport bounds (call on every resize)
    pub fn handle_resize(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// The cached viewport bounds
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.rect
    }

    /// Compute gaze outputs for a pointer position
    #[must_use]
    pub fn pointer_moved(&self, column: u16, row: u16) -> Gaze {
        let width = f32::from(self.rect.width.max(1));
        let height = f32::from(self.rect.height.max(1));

        let x = (f32::from(column.saturating_sub(self.rect.x))) / width - 0.5;
        let y = (f32::from(row.saturating_sub(self.rect.y))) / height - 0.5;

        let delta_x = 0.0 - x;
        let delta_y = 0.0 - y;
        let deg = delta_y.atan2(delta_x).to_degrees().abs();

        Gaze {
            x,
            y,
            rotation_deg: lerp(0.0, -35.0, (deg / 180.0).abs()),
        }
    }
}

/// Linear interpolation
#[must_use]
pub fn lerp(start: f32, end: f32, amt: f32) -> f32 {
    (1.0 - amt) * start + amt * end
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.02;

    fn tracker() -> GazeTracker {
        GazeTracker::new(Rect::new(0, 0, 100, 50))
    }

    #[test]
    fn test_center_is_neutral() {
        let gaze = tracker().pointer_moved(50, 25);
        assert!(gaze.x.abs() < EPS, "x = {}", gaze.x);
        assert!(gaze.y.abs() < EPS, "y = {}", gaze.y);
        assert!(gaze.rotation_deg.abs() < 1.0, "deg = {}", gaze.rotation_deg);
    }

    #[test]
    fn test_top_left_corner() {
        let gaze = tracker().pointer_moved(0, 0);
        assert!((gaze.x - -0.5).abs() < EPS, "x = {}", gaze.x);
        assert!((gaze.y - -0.5).abs() < EPS, "y = {}", gaze.y);
        // Angle to (0.5, 0.5) is 45 degrees; lerp(0, -35, 45/180) = -8.75.
        assert!(
            (gaze.rotation_deg - -8.75).abs() < 0.5,
            "deg = {}",
            gaze.rotation_deg
        );
    }

    #[test]
    fn test_rotation_never_leaves_range() {
        let t = tracker();
        for col in [0, 25, 50, 75, 99] {
            for row in [0, 12, 25, 37, 49] {
                let gaze = t.pointer_moved(col, row);
                assert!(
                    gaze.rotation_deg <= 0.0 && gaze.rotation_deg >= -35.0,
                    "({col},{row}) -> {}",
                    gaze.rotation_deg
                );
            }
        }
    }

    #[test]
    fn test_resize_refreshes_the_cached_rect() {
        let mut t = tracker();
        t.handle_resize(Rect::new(0, 0, 10, 10));
        let gaze = t.pointer_moved(10, 10);
        // On the new, smaller rect the same cell is the far corner.
        assert!((gaze.x - 0.5).abs() < 0.11, "x = {}", gaze.x);
        assert!((gaze.y - 0.5).abs() < 0.11, "y = {}", gaze.y);
    }
}
