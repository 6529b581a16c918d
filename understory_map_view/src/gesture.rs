// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classification: raw input events to pan/zoom/pinch gestures.
//!
//! ## Usage
//!
//! 1) Wrap each host input in an [`InputEvent`].
//! 2) Call [`classify`] with the current [`Interaction`] to get at most one
//!    [`Gesture`].
//! 3) Apply the gesture (the [`crate::ViewportController`] does this) and
//!    update the [`Interaction`] with its transition helpers.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_map_view::gesture::{classify, Gesture, InputEvent, Interaction, PointerButton};
//!
//! let mut interaction = Interaction::default();
//! let down = InputEvent::PointerDown {
//!     position: Point::new(10.0, 20.0),
//!     button: PointerButton::Primary,
//!     over_interactive: false,
//! };
//! assert_eq!(
//!     classify(&down, &interaction),
//!     Some(Gesture::PanStart { anchor: Point::new(10.0, 20.0) })
//! );
//!
//! interaction.start_pan(Point::new(10.0, 20.0));
//! let delta = interaction.pan_delta(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//! ```

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::zoom::{contact_distance, contact_midpoint};

/// Touch contact positions in screen coordinates.
pub type Contacts = SmallVec<[Point; 2]>;

/// Which pointer button went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Left mouse button, pen tip or primary touch.
    #[default]
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
    /// Any other button, by host index.
    Other(u16),
}

/// Current gesture state.
///
/// Panning and pinching are mutually exclusive; starting one replaces the
/// other.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interaction {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A pointer or single touch is dragging the map.
    Panning {
        /// Last screen position seen during the pan.
        anchor: Point,
    },
    /// Two touches are zooming the map.
    Pinching {
        /// Inter-finger distance at the last pinch update.
        last_distance: f64,
        /// Content point that was under the contacts' midpoint when the pinch began.
        origin: Point,
    },
}

impl Interaction {
    /// Returns `true` while panning.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Returns `true` while pinching.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    /// Returns `true` when no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Begins a pan anchored at `position`, replacing any pinch.
    pub fn start_pan(&mut self, position: Point) {
        *self = Self::Panning { anchor: position };
    }

    /// Returns the movement since the last pan position and advances the anchor.
    ///
    /// Returns `None` when not panning.
    pub fn pan_delta(&mut self, position: Point) -> Option<Vec2> {
        match self {
            Self::Panning { anchor } => {
                let delta = position - *anchor;
                *anchor = position;
                Some(delta)
            }
            _ => None,
        }
    }

    /// Begins a pinch, replacing any pan.
    pub fn start_pinch(&mut self, distance: f64, origin: Point) {
        *self = Self::Pinching {
            last_distance: distance,
            origin,
        };
    }

    /// Change in inter-finger distance since the last committed pinch update.
    #[must_use]
    pub fn pinch_change(&self, distance: f64) -> Option<f64> {
        match self {
            Self::Pinching { last_distance, .. } => Some(distance - *last_distance),
            _ => None,
        }
    }

    /// Records `distance` as the reference for the next pinch update.
    pub fn commit_pinch_distance(&mut self, distance: f64) {
        if let Self::Pinching { last_distance, .. } = self {
            *last_distance = distance;
        }
    }

    /// Ends any gesture, returning the state that was active.
    pub fn end(&mut self) -> Self {
        core::mem::take(self)
    }
}

/// A raw input event as delivered by the host.
///
/// Pointer and touch releases must be routed globally by the host so that a
/// release outside the viewport still ends the gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer button went down over the viewport.
    PointerDown {
        /// Screen position of the pointer.
        position: Point,
        /// Button that was pressed.
        button: PointerButton,
        /// Whether the host's region lookup found an interactive region.
        over_interactive: bool,
    },
    /// The pointer moved.
    PointerMove {
        /// Screen position of the pointer.
        position: Point,
    },
    /// A pointer button was released anywhere.
    PointerUp,
    /// A wheel or touchpad scroll over the viewport.
    Wheel {
        /// Raw horizontal and vertical deltas.
        delta: Vec2,
        /// Cursor position in screen coordinates.
        position: Point,
        /// Whether the precise-zoom modifier (e.g. Ctrl) is held.
        precise_zoom: bool,
        /// Viewport rectangle at the time of the event.
        viewport: Rect,
    },
    /// One or more touches began.
    TouchStart {
        /// All active contacts.
        contacts: Contacts,
        /// Viewport rectangle at the time of the event.
        viewport: Rect,
    },
    /// Active touches moved.
    TouchMove {
        /// All active contacts.
        contacts: Contacts,
        /// Viewport rectangle at the time of the event.
        viewport: Rect,
    },
    /// Touches ended or were cancelled.
    TouchEnd,
    /// The viewport changed size or position.
    ViewportResize {
        /// New viewport rectangle.
        viewport: Rect,
    },
    /// The host lost track of the gesture (focus loss, detach) and asks the
    /// controller to end it.
    Cancel,
}

/// A classified gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// A pointer-down landed on an interactive region; no pan starts.
    InteractiveHit,
    /// Start a pan anchored at a screen position.
    PanStart {
        /// Screen position of the pointer or touch.
        anchor: Point,
    },
    /// Continue the active pan.
    PanMove {
        /// Current screen position.
        position: Point,
    },
    /// End the active pan.
    PanEnd,
    /// Pan by raw wheel deltas.
    WheelPan {
        /// Raw wheel deltas.
        delta: Vec2,
    },
    /// Zoom around a screen point by a wheel delta.
    ZoomAtPoint {
        /// Raw vertical wheel delta; negative zooms in.
        delta_y: f64,
        /// Screen point kept fixed.
        position: Point,
    },
    /// Start a two-finger pinch.
    PinchStart {
        /// Distance between the contacts.
        distance: f64,
        /// Midpoint of the contacts in screen coordinates.
        midpoint: Point,
    },
    /// Continue the active pinch.
    PinchMove {
        /// Distance between the contacts.
        distance: f64,
        /// Midpoint of the contacts in screen coordinates.
        midpoint: Point,
    },
    /// All touches lifted: ends both pan and pinch.
    TouchRelease,
}

/// Selects the gesture for `event` given the current `interaction`.
///
/// Returns `None` for events that cause no gesture (secondary buttons,
/// moves while idle, unsupported contact counts, viewport changes and
/// cancellation, which the controller handles directly).
#[must_use]
pub fn classify(event: &InputEvent, interaction: &Interaction) -> Option<Gesture> {
    match event {
        InputEvent::PointerDown {
            position,
            button,
            over_interactive,
        } => {
            if *button != PointerButton::Primary {
                None
            } else if *over_interactive {
                Some(Gesture::InteractiveHit)
            } else {
                Some(Gesture::PanStart { anchor: *position })
            }
        }
        InputEvent::PointerMove { position } => interaction
            .is_panning()
            .then_some(Gesture::PanMove {
                position: *position,
            }),
        InputEvent::PointerUp => interaction.is_panning().then_some(Gesture::PanEnd),
        InputEvent::Wheel {
            delta,
            position,
            precise_zoom,
            ..
        } => Some(if *precise_zoom {
            Gesture::ZoomAtPoint {
                delta_y: delta.y,
                position: *position,
            }
        } else {
            Gesture::WheelPan { delta: *delta }
        }),
        InputEvent::TouchStart { contacts, .. } => match contacts.as_slice() {
            [single] => Some(Gesture::PanStart { anchor: *single }),
            [a, b] => Some(Gesture::PinchStart {
                distance: contact_distance(*a, *b),
                midpoint: contact_midpoint(*a, *b),
            }),
            _ => None,
        },
        InputEvent::TouchMove { contacts, .. } => match (interaction, contacts.as_slice()) {
            (Interaction::Pinching { .. }, [a, b]) => Some(Gesture::PinchMove {
                distance: contact_distance(*a, *b),
                midpoint: contact_midpoint(*a, *b),
            }),
            (Interaction::Panning { .. }, [single]) => Some(Gesture::PanMove { position: *single }),
            _ => None,
        },
        InputEvent::TouchEnd => Some(Gesture::TouchRelease),
        InputEvent::ViewportResize { .. } | InputEvent::Cancel => None,
    }
}
