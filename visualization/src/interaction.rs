//! Pointer interaction: sample hover and drag-to-rotate
//!
//! The host forwards pointer events; these types only hold the transient
//! state and turn events into a hovered sample or a new [`RenderState`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use glam::DVec2;
use log::trace;

use isoplot_core::{GridIndex, RenderState, AZIMUTH_RANGE, TILT_RANGE};

/// Pointer travel, in pixels, per radian of rotation
pub const DRAG_SENSITIVITY: f64 = 200.0;

/// Invisible circular hit area around a projected sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    pub index: GridIndex,
    pub center: DVec2,
    pub radius: f64,
}

impl HitTarget {
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// At most one hovered sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverTracker {
    hovered: Option<GridIndex>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn hovered(&self) -> Option<GridIndex> {
        self.hovered
    }

    pub fn pointer_enter(&mut self, index: GridIndex) {
        trace!("Hover enter ({}, {})", index.x, index.y);
        self.hovered = Some(index);
    }

    /// Clears the hover only if `index` is the hovered sample
    pub fn pointer_leave(&mut self, index: GridIndex) {
        if self.hovered == Some(index) {
            trace!("Hover leave ({}, {})", index.x, index.y);
            self.hovered = None;
        }
    }

    pub fn clear(&mut self) {
        self.hovered = None;
    }

    /// Resolve a raw pointer position against the hit targets.
    ///
    /// The nearest target containing the pointer becomes hovered; outside
    /// every target the hover is cleared.
    pub fn pointer_moved(&mut self, position: DVec2, targets: &[HitTarget]) -> Option<GridIndex> {
        let hit = targets
            .iter()
            .filter(|target| target.contains(position))
            .min_by(|a, b| {
                a.center
                    .distance_squared(position)
                    .total_cmp(&b.center.distance_squared(position))
            })
            .map(|target| target.index);

        match (self.hovered, hit) {
            (Some(current), Some(next)) if current == next => {}
            (current, Some(next)) => {
                if let Some(current) = current {
                    self.pointer_leave(current);
                }
                self.pointer_enter(next);
            }
            (Some(current), None) => self.pointer_leave(current),
            (None, None) => {}
        }

        self.hovered
    }
}

/// Receives rotation updates produced by dragging
pub trait RotationListener {
    fn tilt_changed(&mut self, tilt: f64);

    fn azimuth_changed(&mut self, azimuth: f64);
}

impl RotationListener for RenderState {
    fn tilt_changed(&mut self, tilt: f64) {
        self.tilt = tilt;
    }

    fn azimuth_changed(&mut self, azimuth: f64) {
        self.azimuth = azimuth;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: DVec2,
    state: RenderState,
}

/// Drag-to-rotate tracking
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragRotation {
    anchor: Option<DragAnchor>,
}

impl DragRotation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Record the starting pointer and rotation
    pub fn pointer_down(&mut self, pointer: DVec2, state: RenderState) {
        self.anchor = Some(DragAnchor { pointer, state });
    }

    /// New rotation for the pointer position, or `None` when not dragging.
    ///
    /// Moving down tilts toward the top view; moving right spins the
    /// surface clockwise. Both angles are clamped to their valid ranges.
    pub fn pointer_move(&self, pointer: DVec2) -> Option<RenderState> {
        let anchor = self.anchor?;
        let delta = pointer - anchor.pointer;
        Some(RenderState {
            tilt: (anchor.state.tilt + delta.y / DRAG_SENSITIVITY).clamp(TILT_RANGE.0, TILT_RANGE.1),
            azimuth: (anchor.state.azimuth - delta.x / DRAG_SENSITIVITY)
                .clamp(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1),
        })
    }

    /// [`pointer_move`](Self::pointer_move), reported through `listener`
    pub fn dispatch_move<L: RotationListener>(&self, pointer: DVec2, listener: &mut L) -> bool {
        match self.pointer_move(pointer) {
            Some(state) => {
                listener.tilt_changed(state.tilt);
                listener.azimuth_changed(state.azimuth);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.anchor = None;
    }

    /// Leaving the render area ends the drag
    pub fn pointer_leave(&mut self) {
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn target(x: usize, y: usize, center: DVec2) -> HitTarget {
        HitTarget {
            index: GridIndex::new(x, y),
            center,
            radius: 2.0,
        }
    }

    #[test]
    fn test_enter_and_leave() {
        let mut hover = HoverTracker::new();
        hover.pointer_enter(GridIndex::new(2, 1));
        assert_eq!(hover.hovered(), Some(GridIndex::new(2, 1)));

        hover.pointer_leave(GridIndex::new(0, 0));
        assert_eq!(hover.hovered(), Some(GridIndex::new(2, 1)));

        hover.pointer_leave(GridIndex::new(2, 1));
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn test_pointer_resolves_nearest_target() {
        let targets = [
            target(2, 1, DVec2::new(10.0, 10.0)),
            target(3, 1, DVec2::new(12.0, 10.0)),
        ];
        let mut hover = HoverTracker::new();

        assert_eq!(hover.pointer_moved(DVec2::new(10.5, 10.0), &targets), Some(GridIndex::new(2, 1)));
        assert_eq!(hover.pointer_moved(DVec2::new(11.5, 10.0), &targets), Some(GridIndex::new(3, 1)));
        assert_eq!(hover.pointer_moved(DVec2::new(50.0, 50.0), &targets), None);
    }

    #[test]
    fn test_drag_maps_pointer_delta_to_angles() {
        let mut drag = DragRotation::new();
        assert_eq!(drag.pointer_move(DVec2::new(5.0, 5.0)), None);

        drag.pointer_down(DVec2::new(100.0, 100.0), RenderState::new(0.5, 0.0));
        let state = drag.pointer_move(DVec2::new(120.0, 140.0)).unwrap();
        assert_relative_eq!(state.tilt, 0.7);
        assert_relative_eq!(state.azimuth, -0.1);

        let state = drag.pointer_move(DVec2::new(-1000.0, 1000.0)).unwrap();
        assert_relative_eq!(state.tilt, FRAC_PI_2);
        assert_relative_eq!(state.azimuth, FRAC_PI_4);

        drag.pointer_up();
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_move(DVec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_dispatch_reports_to_listener() {
        let mut drag = DragRotation::new();
        let mut state = RenderState::new(0.2, 0.2);
        drag.pointer_down(DVec2::ZERO, state);

        assert!(drag.dispatch_move(DVec2::new(0.0, -100.0), &mut state));
        assert_relative_eq!(state.tilt, 0.0);
        assert_relative_eq!(state.azimuth, 0.2);

        drag.pointer_leave();
        assert!(!drag.dispatch_move(DVec2::new(10.0, 10.0), &mut state));
    }
}
