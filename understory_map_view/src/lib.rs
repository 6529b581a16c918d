// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Map View: pan/zoom control for a bounded content plane.
//!
//! This crate drives the view of a fixed-size plane (a floor map, a sheet, a
//! board) shown inside a resizable viewport. It focuses on:
//! - Classifying raw pointer, wheel and touch input into pan, zoom and pinch
//!   gestures.
//! - Exponential zoom that keeps the content under the cursor (or the pinch
//!   midpoint) fixed.
//! - Clamping the translation so the content always covers the viewport, or
//!   is centered on an axis where it is smaller.
//!
//! It does **not** render anything or hit-test content. Callers are expected
//! to:
//! - Route pointer releases and touch ends globally, so a release outside the
//!   viewport still ends a pan.
//! - Report whether a pointer-down landed on an interactive region, directly
//!   or through a [`RegionClassifier`].
//! - Apply the published [`ViewTransform`] (its `Display` form is an SVG
//!   `transform` attribute).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_map_view::ViewportController;
//!
//! let viewport = Rect::new(0.0, 0.0, 463.0, 700.0);
//! let mut map = ViewportController::new(Size::new(463.0, 1355.0), viewport);
//!
//! // Ctrl + wheel zooms around the cursor.
//! let zoomed = map
//!     .on_wheel(Vec2::new(0.0, -100.0), Point::new(230.0, 350.0), true, viewport)
//!     .unwrap();
//! assert!((zoomed.scale - 0.5_f64.exp()).abs() < 1e-12);
//!
//! // Plain wheel pans; the result stays inside the map's edges.
//! let panned = map
//!     .on_wheel(Vec2::new(0.0, 40.0), Point::new(230.0, 350.0), false, viewport)
//!     .unwrap();
//! assert!(panned.translate.y <= 0.0);
//! println!("{panned}");
//! ```
//!
//! ## Logging
//!
//! Rejected updates (degenerate viewport, non-finite zoom arithmetic) are
//! reported with `tracing` at `warn`, gesture transitions at `debug` and
//! every published transform at `trace`. Install a subscriber to see them.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`ViewConfig`],
//!   [`ViewTransform`] and [`gesture::Interaction`].

pub mod clamp;
mod config;
mod controller;
mod error;
pub mod gesture;
mod region;
mod transform;
pub mod zoom;

pub use config::{
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_PINCH_ZOOM_RATE, DEFAULT_WHEEL_PAN_SENSITIVITY,
    DEFAULT_WHEEL_ZOOM_RATE, ViewConfig,
};
pub use controller::{ViewState, ViewportController, ViewportDebugInfo};
pub use error::{Result, ViewError};
pub use gesture::{InputEvent, Interaction, PointerButton};
pub use region::{InteractiveLabels, RegionClassifier};
pub use transform::ViewTransform;
