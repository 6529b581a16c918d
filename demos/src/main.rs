// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map gestures.
//!
//! Replay a scripted session (drag, Ctrl+wheel zoom, pinch, a lost pointer
//! release) against a `ViewportController` for a tall floor map and log each
//! published SVG transform.
//!
//! Run:
//! - `cargo run -p understory_demos --bin map_gestures`
//! - `RUST_LOG=understory_map_view=trace cargo run -p understory_demos --bin map_gestures`

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::smallvec;
use tracing_subscriber::EnvFilter;
use understory_map_view::{InputEvent, InteractiveLabels, PointerButton, ViewportController};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,understory_map_view=debug")),
        )
        .init();

    let floor = Size::new(463.0, 1355.0);
    let viewport = Rect::new(0.0, 0.0, 463.0, 700.0);
    let mut map = ViewportController::new(floor, viewport);
    tracing::info!(transform = %map.current_transform(), "settled");

    // Press on a room: the host's label path marks it interactive.
    let rooms = InteractiveLabels::new(["DESKS", "ROOMS"]);
    map.on_pointer_down_over(
        Point::new(120.0, 80.0),
        PointerButton::Primary,
        &["floor", "ROOMS", "room-3"][..],
        &rooms,
    );
    map.on_pointer_up();
    if map.take_interactive_hit() {
        tracing::info!(target = "room-3", "room clicked");
    }

    let session = [
        // Drag the map up, releasing well outside the viewport.
        InputEvent::PointerDown {
            position: Point::new(230.0, 600.0),
            button: PointerButton::Primary,
            over_interactive: false,
        },
        InputEvent::PointerMove {
            position: Point::new(230.0, 350.0),
        },
        InputEvent::PointerMove {
            position: Point::new(230.0, -900.0),
        },
        InputEvent::PointerUp,
        // Ctrl + wheel: one notch in around the cursor.
        InputEvent::Wheel {
            delta: Vec2::new(0.0, -100.0),
            position: Point::new(300.0, 200.0),
            precise_zoom: true,
            viewport,
        },
        // Plain wheel pans.
        InputEvent::Wheel {
            delta: Vec2::new(15.0, 40.0),
            position: Point::new(300.0, 200.0),
            precise_zoom: false,
            viewport,
        },
        // Two fingers spread from 50px to 80px apart.
        InputEvent::TouchStart {
            contacts: smallvec![Point::new(200.0, 300.0), Point::new(230.0, 340.0)],
            viewport,
        },
        InputEvent::TouchMove {
            contacts: smallvec![Point::new(200.0, 300.0), Point::new(200.0, 380.0)],
            viewport,
        },
        InputEvent::TouchEnd,
        // The window shrinks mid-drag and the release is lost.
        InputEvent::PointerDown {
            position: Point::new(100.0, 100.0),
            button: PointerButton::Primary,
            over_interactive: false,
        },
        InputEvent::ViewportResize {
            viewport: Rect::new(0.0, 0.0, 400.0, 500.0),
        },
        InputEvent::Cancel,
    ];

    for event in session {
        let label = event_name(&event);
        match map.handle(event) {
            Some(transform) => tracing::info!(event = label, %transform, "published"),
            None => tracing::info!(event = label, interaction = ?map.interaction(), "no change"),
        }
    }

    let info = map.debug_info();
    tracing::info!(
        scale = info.state.transform.scale,
        visible = ?info.visible_content,
        "final view"
    );
}

fn event_name(event: &InputEvent) -> &'static str {
    match event {
        InputEvent::PointerDown { .. } => "pointer-down",
        InputEvent::PointerMove { .. } => "pointer-move",
        InputEvent::PointerUp => "pointer-up",
        InputEvent::Wheel {
            precise_zoom: true, ..
        } => "wheel-zoom",
        InputEvent::Wheel { .. } => "wheel-pan",
        InputEvent::TouchStart { .. } => "touch-start",
        InputEvent::TouchMove { .. } => "touch-move",
        InputEvent::TouchEnd => "touch-end",
        InputEvent::ViewportResize { .. } => "resize",
        InputEvent::Cancel => "cancel",
    }
}
