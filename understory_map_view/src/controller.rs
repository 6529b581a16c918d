// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::clamp::clamp_translation;
use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::gesture::{Gesture, InputEvent, Interaction, PointerButton, classify};
use crate::region::RegionClassifier;
use crate::transform::ViewTransform;
use crate::zoom::{next_scale, wheel_pan_offset, zoom_about_point};

/// Mutable view state owned by a [`ViewportController`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewState {
    /// Current translation and scale.
    pub transform: ViewTransform,
    /// Gesture in progress, if any.
    pub interaction: Interaction,
    /// Set when the last primary pointer-down landed on an interactive region.
    pub interactive_hit: bool,
}

/// Pan/zoom controller for a fixed-size content plane inside a viewport.
///
/// The controller classifies raw input into gestures, applies them to its
/// [`ViewState`], and clamps the translation after every change so the
/// content always covers the viewport (or is centered on an axis where it is
/// smaller). Event methods return the published [`ViewTransform`] when the
/// event changed what should be rendered, and `None` otherwise.
///
/// The viewport is whatever rectangle the host last supplied: wheel and
/// touch events carry it, and hosts call
/// [`ViewportController::on_viewport_resize`] when it changes between them.
///
/// ```
/// use kurbo::{Point, Rect, Size, Vec2};
/// use understory_map_view::ViewportController;
///
/// let viewport = Rect::new(0.0, 0.0, 463.0, 700.0);
/// let mut map = ViewportController::new(Size::new(463.0, 1355.0), viewport);
/// assert_eq!(map.current_transform().to_string(), "translate(0 0) scale(1)");
///
/// // Drag the map upwards by 100 pixels.
/// map.on_pointer_down(Point::new(200.0, 400.0), false);
/// map.on_pointer_move(Point::new(200.0, 300.0));
/// let published = map.on_pointer_up().unwrap();
/// assert_eq!(published.translate, Vec2::new(0.0, -100.0));
/// ```
#[derive(Clone, Debug)]
pub struct ViewportController {
    content: Size,
    viewport: Rect,
    config: ViewConfig,
    state: ViewState,
}

impl ViewportController {
    /// Creates a controller with the default [`ViewConfig`] and settles it
    /// against `viewport`.
    ///
    /// Degenerate geometry is tolerated: the settle step is skipped with a
    /// warning and the next valid clamp corrects the view.
    #[must_use]
    pub fn new(content: Size, viewport: Rect) -> Self {
        let mut controller = Self {
            content,
            viewport,
            config: ViewConfig::default(),
            state: ViewState::default(),
        };
        controller.settle();
        controller
    }

    /// Creates a controller with a custom configuration.
    ///
    /// Fails if the configuration is invalid or the content size is not
    /// strictly positive.
    pub fn with_config(content: Size, viewport: Rect, config: ViewConfig) -> Result<Self> {
        config.validate()?;
        check_content(content)?;
        let mut controller = Self {
            content,
            viewport,
            config,
            state: ViewState::default(),
        };
        controller.settle();
        Ok(controller)
    }

    /// Resets to scale `1` at the origin for new content and settles again.
    ///
    /// Any gesture in progress is dropped.
    pub fn reinitialize(&mut self, content: Size) -> Result<ViewState> {
        check_content(content)?;
        self.content = content;
        self.state = ViewState::default();
        self.settle();
        Ok(self.state)
    }

    /// Content size in content units.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Last viewport rectangle supplied by the host.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Snapshot of the view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Current transform.
    #[must_use]
    pub fn current_transform(&self) -> ViewTransform {
        self.state.transform
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.transform.scale
    }

    /// Gesture in progress.
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.state.interaction
    }

    /// Returns `true` while a pan is in progress (e.g. to show a grab cursor).
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.state.interaction.is_panning()
    }

    /// Returns `true` if the last primary pointer-down hit an interactive region.
    #[must_use]
    pub fn interactive_hit(&self) -> bool {
        self.state.interactive_hit
    }

    /// Returns and clears the interactive-hit flag.
    ///
    /// Hosts call this on release to decide whether the press was a click on
    /// an interactive region rather than the start of a drag.
    pub fn take_interactive_hit(&mut self) -> bool {
        core::mem::take(&mut self.state.interactive_hit)
    }

    /// Content point under a screen point, in the anchor model used by zoom.
    ///
    /// See [`ViewTransform`] for how this differs from the rendered
    /// transform string at scales other than `1`. Hosts hit-test with their
    /// own region lookup ([`crate::RegionClassifier`]).
    #[must_use]
    pub fn screen_to_content(&self, screen: Point) -> Point {
        self.state
            .transform
            .screen_to_content(screen, self.viewport.origin())
    }

    /// Inverse of [`ViewportController::screen_to_content`].
    #[must_use]
    pub fn content_to_screen(&self, content: Point) -> Point {
        self.state
            .transform
            .content_to_screen(content, self.viewport.origin())
    }

    /// Primary-button pointer-down.
    ///
    /// Starts a pan unless `over_interactive` is set, in which case only the
    /// interactive-hit flag is recorded.
    pub fn on_pointer_down(
        &mut self,
        position: Point,
        over_interactive: bool,
    ) -> Option<ViewTransform> {
        self.on_button_down(position, PointerButton::Primary, over_interactive)
    }

    /// Pointer-down for any button. Only [`PointerButton::Primary`] has an effect.
    pub fn on_button_down(
        &mut self,
        position: Point,
        button: PointerButton,
        over_interactive: bool,
    ) -> Option<ViewTransform> {
        self.handle(InputEvent::PointerDown {
            position,
            button,
            over_interactive,
        })
    }

    /// Pointer-down that asks `classifier` whether `target` is interactive.
    pub fn on_pointer_down_over<T, C>(
        &mut self,
        position: Point,
        button: PointerButton,
        target: &T,
        classifier: &C,
    ) -> Option<ViewTransform>
    where
        T: ?Sized,
        C: RegionClassifier<T> + ?Sized,
    {
        let over_interactive = classifier.is_interactive(target);
        self.on_button_down(position, button, over_interactive)
    }

    /// Pointer movement; pans while a pan is active.
    pub fn on_pointer_move(&mut self, position: Point) -> Option<ViewTransform> {
        self.handle(InputEvent::PointerMove { position })
    }

    /// Pointer release, routed globally by the host.
    ///
    /// Ends an active pan and publishes a final clamp, wherever the pointer is.
    pub fn on_pointer_up(&mut self) -> Option<ViewTransform> {
        self.handle(InputEvent::PointerUp)
    }

    /// Wheel or touchpad scroll.
    ///
    /// With `precise_zoom` the view zooms around `position` by `delta.y`;
    /// otherwise it pans by `delta` times the configured sensitivity.
    pub fn on_wheel(
        &mut self,
        delta: Vec2,
        position: Point,
        precise_zoom: bool,
        viewport: Rect,
    ) -> Option<ViewTransform> {
        self.handle(InputEvent::Wheel {
            delta,
            position,
            precise_zoom,
            viewport,
        })
    }

    /// Touches began. One contact starts a pan, two start a pinch; other
    /// counts are ignored.
    pub fn on_touch_start(&mut self, contacts: &[Point], viewport: Rect) -> Option<ViewTransform> {
        self.handle(InputEvent::TouchStart {
            contacts: contacts.iter().copied().collect(),
            viewport,
        })
    }

    /// Touches moved.
    pub fn on_touch_move(&mut self, contacts: &[Point], viewport: Rect) -> Option<ViewTransform> {
        self.handle(InputEvent::TouchMove {
            contacts: contacts.iter().copied().collect(),
            viewport,
        })
    }

    /// All touches ended. Always ends pan and pinch and publishes a clamp.
    pub fn on_touch_end(&mut self) -> Option<ViewTransform> {
        self.handle(InputEvent::TouchEnd)
    }

    /// The viewport changed; re-clamps without changing the scale.
    ///
    /// A gesture in progress continues against the new viewport.
    pub fn on_viewport_resize(&mut self, viewport: Rect) -> Option<ViewTransform> {
        self.handle(InputEvent::ViewportResize { viewport })
    }

    /// Ends any pan or pinch and publishes a clamp.
    ///
    /// For hosts that lose the terminating event (focus loss, detaching the
    /// viewport, cancelled pointer capture).
    pub fn cancel_gesture(&mut self) -> Option<ViewTransform> {
        self.handle(InputEvent::Cancel)
    }

    /// Applies one input event.
    pub fn handle(&mut self, event: InputEvent) -> Option<ViewTransform> {
        match &event {
            InputEvent::Wheel { viewport, .. }
            | InputEvent::TouchStart { viewport, .. }
            | InputEvent::TouchMove { viewport, .. } => self.viewport = *viewport,
            InputEvent::ViewportResize { viewport } => {
                self.viewport = *viewport;
                return self.commit(self.state.transform);
            }
            InputEvent::Cancel => {
                let previous = self.state.interaction.end();
                if !previous.is_idle() {
                    tracing::debug!(?previous, "gesture cancelled");
                }
                return self.commit(self.state.transform);
            }
            _ => {}
        }

        let gesture = classify(&event, &self.state.interaction)?;
        self.apply(gesture)
    }

    fn apply(&mut self, gesture: Gesture) -> Option<ViewTransform> {
        let transform = self.state.transform;
        match gesture {
            Gesture::InteractiveHit => {
                self.state.interactive_hit = true;
                None
            }
            Gesture::PanStart { anchor } => {
                if !anchor.is_finite() {
                    return reject(&ViewError::NonFiniteInput {
                        what: "pan anchor",
                    });
                }
                self.state.interactive_hit = false;
                self.state.interaction.start_pan(anchor);
                tracing::debug!(?anchor, "pan started");
                None
            }
            Gesture::PanMove { position } => {
                if !position.is_finite() {
                    return reject(&ViewError::NonFiniteInput {
                        what: "pan position",
                    });
                }
                let delta = self.state.interaction.pan_delta(position)?;
                self.commit(ViewTransform::new(transform.translate + delta, transform.scale))
            }
            Gesture::PanEnd => {
                self.state.interaction.end();
                tracing::debug!("pan ended");
                self.commit(transform)
            }
            Gesture::WheelPan { delta } => {
                if !delta.is_finite() {
                    return reject(&ViewError::NonFiniteInput { what: "wheel delta" });
                }
                let offset =
                    wheel_pan_offset(delta, self.config.wheel_pan_sensitivity, transform.scale);
                self.commit(ViewTransform::new(transform.translate + offset, transform.scale))
            }
            Gesture::ZoomAtPoint { delta_y, position } => {
                let zoomed = next_scale(
                    transform.scale,
                    self.config.wheel_zoom_rate,
                    -delta_y,
                    self.config.min_scale,
                    self.config.max_scale,
                )
                .and_then(|scale| {
                    zoom_about_point(transform, position, self.viewport.origin(), scale)
                });
                match zoomed {
                    Ok(candidate) => self.commit(candidate),
                    Err(err) => reject(&err),
                }
            }
            Gesture::PinchStart { distance, midpoint } => {
                if !distance.is_finite() || !midpoint.is_finite() {
                    return reject(&ViewError::NonFiniteInput {
                        what: "touch contact",
                    });
                }
                let origin = transform.screen_to_content(midpoint, self.viewport.origin());
                self.state.interaction.start_pinch(distance, origin);
                tracing::debug!(distance, ?origin, "pinch started");
                None
            }
            Gesture::PinchMove { distance, midpoint } => {
                let change = self.state.interaction.pinch_change(distance)?;
                let zoomed = next_scale(
                    transform.scale,
                    self.config.pinch_zoom_rate,
                    change,
                    self.config.min_scale,
                    self.config.max_scale,
                )
                .and_then(|scale| {
                    zoom_about_point(transform, midpoint, self.viewport.origin(), scale)
                });
                match zoomed {
                    Ok(candidate) => {
                        self.state.interaction.commit_pinch_distance(distance);
                        self.commit(candidate)
                    }
                    Err(err) => reject(&err),
                }
            }
            Gesture::TouchRelease => {
                let previous = self.state.interaction.end();
                if !previous.is_idle() {
                    tracing::debug!(?previous, "touch gesture ended");
                }
                self.commit(transform)
            }
        }
    }

    /// Clamps `candidate` against the current geometry and publishes it.
    ///
    /// On degenerate geometry the candidate is dropped and the previous
    /// transform kept.
    fn commit(&mut self, candidate: ViewTransform) -> Option<ViewTransform> {
        match clamp_translation(
            candidate.translate,
            candidate.scale,
            self.content,
            self.viewport.size(),
            self.config.border_margin,
        ) {
            Ok(translate) => {
                let published = ViewTransform::new(translate, candidate.scale);
                self.state.transform = published;
                tracing::trace!(transform = %published, "transform published");
                Some(published)
            }
            Err(err) => reject(&err),
        }
    }

    fn settle(&mut self) {
        let ViewTransform { translate, scale } = self.state.transform;
        match clamp_translation(
            translate,
            scale,
            self.content,
            self.viewport.size(),
            self.config.border_margin,
        ) {
            Ok(settled) => self.state.transform.translate = settled,
            Err(err) => tracing::warn!(%err, "initial settle skipped"),
        }
    }

    /// Snapshot of the controller for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            content: self.content,
            viewport: self.viewport,
            state: self.state,
            visible_content: self.visible_content_rect(),
            config: self.config,
        }
    }

    /// Viewport corners mapped through [`ViewportController::screen_to_content`].
    ///
    /// Diagnostic only: at scales other than `1` this can lie partly or
    /// wholly outside the content even though the clamp holds.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        let origin = self.viewport.origin();
        Rect::from_points(
            self.state.transform.screen_to_content(origin, origin),
            self.state
                .transform
                .screen_to_content(origin + self.viewport.size().to_vec2(), origin),
        )
    }
}

fn check_content(content: Size) -> Result<()> {
    if content.width.is_finite()
        && content.height.is_finite()
        && content.width > 0.0
        && content.height > 0.0
    {
        Ok(())
    } else {
        Err(ViewError::DegenerateContent {
            width: content.width,
            height: content.height,
        })
    }
}

fn reject(err: &ViewError) -> Option<ViewTransform> {
    tracing::warn!(%err, "view update rejected");
    None
}

/// Debug snapshot of a [`ViewportController`].
///
/// `visible_content` uses the anchor-model conversion; it is not the region a
/// renderer of the transform string shows once the scale leaves `1`.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Content size.
    pub content: Size,
    /// Last viewport rectangle.
    pub viewport: Rect,
    /// View state.
    pub state: ViewState,
    /// Viewport corners in anchor-model content coordinates.
    pub visible_content: Rect,
    /// Active configuration.
    pub config: ViewConfig,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::ViewportController;
    use crate::config::ViewConfig;
    use crate::gesture::{Interaction, PointerButton};

    const CONTENT: Size = Size::new(463.0, 1355.0);
    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 463.0, 700.0);

    #[test]
    fn settle_centers_and_bounds() {
        let map = ViewportController::new(CONTENT, VIEWPORT);
        let t = map.current_transform();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translate, Vec2::new(0.0, 0.0));
        assert!(map.interaction().is_idle());
    }

    #[test]
    fn settle_centers_small_content() {
        let viewport = Rect::new(0.0, 0.0, 300.0, 150.0);
        let map = ViewportController::new(Size::new(100.0, 50.0), viewport);
        assert_eq!(map.current_transform().translate, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn degenerate_viewport_is_tolerated() {
        let mut map = ViewportController::new(CONTENT, Rect::ZERO);
        assert_eq!(map.current_transform().translate, Vec2::ZERO);

        map.on_pointer_down(Point::new(10.0, 10.0), false);
        assert_eq!(map.on_pointer_move(Point::new(10.0, -40.0)), None);
        assert_eq!(map.current_transform().translate, Vec2::ZERO);

        // A real viewport arrives and the next update clamps normally.
        let published = map.on_viewport_resize(VIEWPORT).unwrap();
        assert_eq!(published.translate, Vec2::ZERO);
        assert!(map.is_panning());
    }

    #[test]
    fn interactive_press_does_not_pan() {
        let mut map = ViewportController::new(CONTENT, VIEWPORT);
        assert_eq!(map.on_pointer_down(Point::new(5.0, 5.0), true), None);
        assert!(map.interactive_hit());
        assert!(!map.is_panning());
        assert_eq!(map.on_pointer_move(Point::new(5.0, -300.0)), None);
        assert!(map.take_interactive_hit());
        assert!(!map.interactive_hit());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut map = ViewportController::new(CONTENT, VIEWPORT);
        map.on_button_down(Point::new(5.0, 5.0), PointerButton::Secondary, false);
        assert!(map.interaction().is_idle());
    }

    #[test]
    fn wheel_pan_is_scaled_and_clamped() {
        let mut map = ViewportController::new(CONTENT, VIEWPORT);
        let t = map
            .on_wheel(Vec2::new(0.0, 50.0), Point::ZERO, false, VIEWPORT)
            .unwrap();
        // 50 * 2.0 / 1.0 = 100 upwards.
        assert_eq!(t.translate, Vec2::new(0.0, -100.0));

        let t = map
            .on_wheel(Vec2::new(0.0, 10_000.0), Point::ZERO, false, VIEWPORT)
            .unwrap();
        assert_eq!(t.translate, Vec2::new(0.0, -655.0));
    }

    #[test]
    fn nan_wheel_delta_is_rejected() {
        let mut map = ViewportController::new(CONTENT, VIEWPORT);
        let before = map.current_transform();
        assert_eq!(
            map.on_wheel(Vec2::new(f64::NAN, 1.0), Point::ZERO, false, VIEWPORT),
            None
        );
        assert_eq!(
            map.on_wheel(Vec2::new(0.0, f64::NAN), Point::ZERO, true, VIEWPORT),
            None
        );
        assert_eq!(map.current_transform(), before);
    }

    #[test]
    fn cancel_unsticks_a_lost_pinch() {
        let mut map = ViewportController::new(CONTENT, VIEWPORT);
        map.on_touch_start(&[Point::new(0.0, 0.0), Point::new(30.0, 40.0)], VIEWPORT);
        assert!(matches!(map.interaction(), Interaction::Pinching { .. }));

        assert!(map.cancel_gesture().is_some());
        assert!(map.interaction().is_idle());
    }

    #[test]
    fn with_config_validates() {
        let bad = ViewConfig::default().with_border_margin(-3.0);
        assert!(ViewportController::with_config(CONTENT, VIEWPORT, bad).is_err());
        assert!(
            ViewportController::with_config(Size::new(0.0, 10.0), VIEWPORT, ViewConfig::default())
                .is_err()
        );
    }

    #[test]
    fn border_margin_lets_the_edge_come_in() {
        let config = ViewConfig::default().with_border_margin(25.0);
        let mut map = ViewportController::with_config(CONTENT, VIEWPORT, config).unwrap();
        map.on_pointer_down(Point::new(100.0, 100.0), false);
        let t = map.on_pointer_move(Point::new(100.0, 200.0)).unwrap();
        assert_eq!(t.translate.y, 25.0);
    }

    #[test]
    fn visible_rect_covers_viewport_in_content_units() {
        let map = ViewportController::new(CONTENT, VIEWPORT);
        let visible = map.visible_content_rect();
        assert_eq!(visible, Rect::new(0.0, 0.0, 463.0, 700.0));
        let info = map.debug_info();
        assert_eq!(info.visible_content, visible);
        assert_eq!(info.content, CONTENT);
    }
}
