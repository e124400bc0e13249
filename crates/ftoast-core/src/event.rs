#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The host surface translates its native mouse, touch and pen input into
//! [`PointerEvent`]s before handing them to the toaster. Every event carries
//! a timestamp on the host's monotonic clock (see [`crate::clock`]), which
//! the gesture tracker uses for velocity estimation.
//!
//! # Design Notes
//!
//! - Coordinates are logical pixels, not device pixels.
//! - A touch sequence is identified by its [`PointerId`]; the first touch of a
//!   multi-touch sequence is the primary one.
//! - `Up` events from touch hosts usually report no useful position; the
//!   gesture tracker relies on the last `Move` instead.

use std::time::Duration;

use bitflags::bitflags;

use crate::geometry::Point;

/// Identifier of a pointer (mouse, or one finger of a touch sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The single mouse pointer.
    pub const MOUSE: Self = Self(0);
}

/// Device class that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed (mouse down, touch start).
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released (mouse up, touch end).
    Up,
    /// The host aborted the pointer sequence (touch cancel, focus loss).
    Cancel,
}

bitflags! {
    /// Buttons held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// No buttons.
        const NONE      = 0b0000;
        /// Primary button (left mouse, touch contact, pen tip).
        const PRIMARY   = 0b0001;
        /// Secondary button (right mouse, pen barrel).
        const SECONDARY = 0b0010;
        /// Auxiliary button (middle mouse).
        const AUXILIARY = 0b0100;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event delivered by the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,
    /// Which pointer produced the event.
    pub pointer: PointerId,
    /// Device class.
    pub source: PointerSource,
    /// Position on the surface.
    pub position: Point,
    /// Buttons held while the event fired.
    pub buttons: PointerButtons,
    /// Host monotonic timestamp.
    pub timestamp: Duration,
}

impl PointerEvent {
    /// Create a mouse event for the primary button.
    ///
    /// `Down` and `Move` report the primary button as held; `Up` and `Cancel`
    /// report no buttons.
    #[must_use]
    pub fn new(kind: PointerEventKind, x: f32, y: f32, timestamp: Duration) -> Self {
        let buttons = match kind {
            PointerEventKind::Down | PointerEventKind::Move => PointerButtons::PRIMARY,
            PointerEventKind::Up | PointerEventKind::Cancel => PointerButtons::NONE,
        };
        Self {
            kind,
            pointer: PointerId::MOUSE,
            source: PointerSource::Mouse,
            position: Point::new(x, y),
            buttons,
            timestamp,
        }
    }

    /// Mouse press at `(x, y)`.
    #[must_use]
    pub fn down(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerEventKind::Down, x, y, timestamp)
    }

    /// Mouse move to `(x, y)`.
    #[must_use]
    pub fn moved(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerEventKind::Move, x, y, timestamp)
    }

    /// Mouse release at `(x, y)`.
    #[must_use]
    pub fn up(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerEventKind::Up, x, y, timestamp)
    }

    /// Host-initiated cancellation.
    #[must_use]
    pub fn cancel(timestamp: Duration) -> Self {
        Self::new(PointerEventKind::Cancel, 0.0, 0.0, timestamp)
    }

    /// Build an event from a touch list, tracking only the first touch.
    ///
    /// `touches` is the list of contacts still on the surface and `changed`
    /// is the contact the host reported this event for. Presses and moves
    /// report the first remaining contact and return `None` for an empty
    /// list, since there is no coordinate to report. Releases report
    /// `changed`, because the lifted contact is no longer in the list; their
    /// position is the first remaining contact, or the origin.
    #[must_use]
    pub fn from_touches(
        kind: PointerEventKind,
        touches: &[TouchPoint],
        changed: PointerId,
        timestamp: Duration,
    ) -> Option<Self> {
        let position = touches.first().map(|touch| touch.position);
        let (pointer, position, buttons) = match kind {
            PointerEventKind::Down | PointerEventKind::Move => {
                let first = touches.first()?;
                (first.id, first.position, PointerButtons::PRIMARY)
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                (changed, position.unwrap_or_default(), PointerButtons::NONE)
            }
        };
        Some(Self {
            kind,
            pointer,
            source: PointerSource::Touch,
            position,
            buttons,
            timestamp,
        })
    }

    /// Use a specific pointer id.
    #[must_use]
    pub const fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }

    /// Use a specific device class.
    #[must_use]
    pub const fn with_source(mut self, source: PointerSource) -> Self {
        self.source = source;
        self
    }

    /// Override the held buttons.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.position.x
    }

    /// Whether this event ends a pointer sequence.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }

    /// Whether a press may start a gesture.
    ///
    /// Touch and pen contacts always qualify; mouse presses need the primary
    /// button.
    #[must_use]
    pub fn can_start_gesture(&self) -> bool {
        self.kind == PointerEventKind::Down
            && (self.source != PointerSource::Mouse
                || self.buttons.contains(PointerButtons::PRIMARY))
    }
}

/// One contact point of a multi-touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Touch identifier, stable for the lifetime of the contact.
    pub id: PointerId,
    /// Contact position.
    pub position: Point,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: PointerId(id),
            position: Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Duration = Duration::from_millis(5);

    #[test]
    fn mouse_constructors_set_buttons() {
        assert_eq!(PointerEvent::down(1.0, 2.0, T0).buttons, PointerButtons::PRIMARY);
        assert_eq!(PointerEvent::moved(1.0, 2.0, T0).buttons, PointerButtons::PRIMARY);
        assert_eq!(PointerEvent::up(1.0, 2.0, T0).buttons, PointerButtons::NONE);
        assert_eq!(PointerEvent::down(1.0, 2.0, T0).pointer, PointerId::MOUSE);
    }

    #[test]
    fn secondary_mouse_press_cannot_start_gesture() {
        let right = PointerEvent::down(0.0, 0.0, T0).with_buttons(PointerButtons::SECONDARY);
        assert!(!right.can_start_gesture());
        assert!(PointerEvent::down(0.0, 0.0, T0).can_start_gesture());
        assert!(!PointerEvent::moved(0.0, 0.0, T0).can_start_gesture());
    }

    #[test]
    fn touch_press_starts_gesture_regardless_of_buttons() {
        let touch = PointerEvent::down(0.0, 0.0, T0)
            .with_source(PointerSource::Touch)
            .with_buttons(PointerButtons::NONE);
        assert!(touch.can_start_gesture());
    }

    #[test]
    fn from_touches_uses_first_contact() {
        let touches = [TouchPoint::new(7, 10.0, 20.0), TouchPoint::new(8, 90.0, 20.0)];
        let ev = PointerEvent::from_touches(PointerEventKind::Move, &touches, PointerId(7), T0)
            .expect("move with touches");
        assert_eq!(ev.pointer, PointerId(7));
        assert_eq!(ev.position, Point::new(10.0, 20.0));
        assert_eq!(ev.source, PointerSource::Touch);
    }

    #[test]
    fn from_touches_empty_move_is_dropped() {
        assert!(PointerEvent::from_touches(PointerEventKind::Move, &[], PointerId(1), T0).is_none());
    }

    #[test]
    fn from_touches_empty_end_uses_changed_contact() {
        let ev = PointerEvent::from_touches(PointerEventKind::Up, &[], PointerId(3), T0)
            .expect("touch end");
        assert_eq!(ev.pointer, PointerId(3));
        assert!(ev.is_release());
    }

    #[test]
    fn from_touches_release_reports_lifted_contact_not_remaining_one() {
        let remaining = [TouchPoint::new(8, 90.0, 20.0)];
        let ev = PointerEvent::from_touches(PointerEventKind::Up, &remaining, PointerId(7), T0)
            .expect("touch end");
        assert_eq!(ev.pointer, PointerId(7));
        assert_eq!(ev.buttons, PointerButtons::NONE);

        let cancel =
            PointerEvent::from_touches(PointerEventKind::Cancel, &remaining, PointerId(7), T0)
                .expect("touch cancel");
        assert_eq!(cancel.pointer, PointerId(7));
    }

    #[test]
    fn pointer_buttons_default() {
        assert_eq!(PointerButtons::default(), PointerButtons::NONE);
    }
}
