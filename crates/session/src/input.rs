//! Pointer gesture discrimination.
//!
//! A tap only counts as an answer when the pointer neither dragged nor
//! took part in a multi-touch gesture, and the map view did not move
//! between down and up. Touch gets a looser movement threshold than mouse.

use foundation::math::{Vec2, ViewTransform};
use std::collections::BTreeSet;

pub const MOUSE_TAP_SLOP_PX: f64 = 8.0;
pub const TOUCH_TAP_SLOP_PX: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    pub fn tap_slop_px(self) -> f64 {
        match self {
            PointerKind::Touch => TOUCH_TAP_SLOP_PX,
            PointerKind::Mouse | PointerKind::Pen => MOUSE_TAP_SLOP_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub kind: PointerKind,
    pub pointer_id: i64,
    pub is_primary: bool,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            kind: PointerKind::Mouse,
            pointer_id: 1,
            is_primary: true,
        }
    }

    pub fn touch(x: f64, y: f64, pointer_id: i64, is_primary: bool) -> Self {
        Self {
            position: Vec2::new(x, y),
            kind: PointerKind::Touch,
            pointer_id,
            is_primary,
        }
    }
}

/// What a pointer-up turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapCheck {
    /// Non-primary touch lifting; not an answer attempt at all.
    SecondaryTouch,
    /// Multi-touch pinch/rotate, or the map transform moved.
    Gesture,
    Drag { moved_px: f64 },
    Tap { position: Vec2 },
}

/// Tracks one down/up cycle plus concurrent touch pointers.
#[derive(Debug, Default)]
pub struct GestureTracker {
    touch_pointers: BTreeSet<i64>,
    gesture_detected: bool,
    down_point: Option<Vec2>,
    down_transform: Option<ViewTransform>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, transform: ViewTransform) {
        if event.kind == PointerKind::Touch {
            if event.is_primary {
                self.reset_touch();
            }
            self.touch_pointers.insert(event.pointer_id);
            if self.touch_pointers.len() > 1 {
                self.gesture_detected = true;
            }
            if !event.is_primary {
                return;
            }
        }
        self.down_point = Some(event.position);
        self.down_transform = Some(transform);
    }

    pub fn pointer_cancel(&mut self, event: &PointerEvent) {
        if event.kind == PointerKind::Touch {
            if event.is_primary {
                self.reset_touch();
            } else {
                self.touch_pointers.remove(&event.pointer_id);
                if self.touch_pointers.is_empty() {
                    self.gesture_detected = false;
                }
            }
        }
        self.down_point = None;
        self.down_transform = None;
    }

    /// Classify a pointer-up against the recorded down state.
    pub fn pointer_up(&mut self, event: &PointerEvent, transform: ViewTransform) -> TapCheck {
        if event.kind == PointerKind::Touch && !event.is_primary {
            self.touch_pointers.remove(&event.pointer_id);
            if self.touch_pointers.is_empty() {
                self.gesture_detected = false;
            }
            return TapCheck::SecondaryTouch;
        }

        let up_point = event.position;
        let down_point = self.down_point.take().unwrap_or(up_point);
        let down_transform = self.down_transform.take();

        let transform_changed =
            down_transform.is_some_and(|prev| transform.materially_differs(prev));

        let mut gesture = self.gesture_detected;
        if event.kind == PointerKind::Touch {
            gesture = gesture || self.touch_pointers.len() > 1;
            self.touch_pointers.remove(&event.pointer_id);
            if self.touch_pointers.is_empty() {
                self.gesture_detected = false;
            }
        }

        if gesture || transform_changed {
            return TapCheck::Gesture;
        }

        let moved_px = up_point.distance(down_point);
        if moved_px > event.kind.tap_slop_px() {
            return TapCheck::Drag { moved_px };
        }

        TapCheck::Tap { position: up_point }
    }

    fn reset_touch(&mut self) {
        self.touch_pointers.clear();
        self.gesture_detected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IDENTITY: ViewTransform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };

    #[test]
    fn still_mouse_click_is_a_tap() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::mouse(100.0, 100.0), IDENTITY);
        let check = tracker.pointer_up(&PointerEvent::mouse(103.0, 104.0), IDENTITY);
        assert_eq!(check, TapCheck::Tap { position: Vec2::new(103.0, 104.0) });
    }

    #[test]
    fn mouse_drag_past_slop_is_rejected() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::mouse(100.0, 100.0), IDENTITY);
        let check = tracker.pointer_up(&PointerEvent::mouse(100.0, 110.0), IDENTITY);
        assert!(matches!(check, TapCheck::Drag { moved_px } if (moved_px - 10.0).abs() < 1e-9));
    }

    #[test]
    fn touch_gets_the_looser_threshold() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::touch(100.0, 100.0, 1, true), IDENTITY);
        let check = tracker.pointer_up(&PointerEvent::touch(100.0, 115.0, 1, true), IDENTITY);
        assert!(matches!(check, TapCheck::Tap { .. }));
    }

    #[test]
    fn pan_or_zoom_between_down_and_up_is_a_gesture() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::mouse(100.0, 100.0), IDENTITY);
        let panned = ViewTransform { x: 30.0, y: 0.0, k: 1.0 };
        assert_eq!(
            tracker.pointer_up(&PointerEvent::mouse(100.0, 100.0), panned),
            TapCheck::Gesture
        );
    }

    #[test]
    fn tiny_transform_drift_still_counts_as_a_tap() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::mouse(50.0, 50.0), IDENTITY);
        let drift = ViewTransform { x: 1.0, y: 1.5, k: 1.001 };
        assert!(matches!(
            tracker.pointer_up(&PointerEvent::mouse(50.0, 50.0), drift),
            TapCheck::Tap { .. }
        ));
    }

    #[test]
    fn second_finger_makes_the_whole_sequence_a_gesture() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::touch(100.0, 100.0, 1, true), IDENTITY);
        tracker.pointer_down(&PointerEvent::touch(200.0, 100.0, 2, false), IDENTITY);
        assert_eq!(
            tracker.pointer_up(&PointerEvent::touch(200.0, 100.0, 2, false), IDENTITY),
            TapCheck::SecondaryTouch
        );
        assert_eq!(
            tracker.pointer_up(&PointerEvent::touch(100.0, 100.0, 1, true), IDENTITY),
            TapCheck::Gesture
        );
    }

    #[test]
    fn cancel_clears_the_down_state() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(&PointerEvent::mouse(100.0, 100.0), IDENTITY);
        tracker.pointer_cancel(&PointerEvent::mouse(100.0, 100.0));
        // With no recorded down point the up position stands in for it.
        let check = tracker.pointer_up(&PointerEvent::mouse(500.0, 500.0), IDENTITY);
        assert!(matches!(check, TapCheck::Tap { .. }));
    }
}
