// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-anchored zoom and pan updates.
//!
//! Zooming is exponential in the gesture signal: the new scale is
//! `old * exp(rate * signal)`, clamped to the configured range. The
//! translation is then recomputed so that the content point under the anchor
//! stays under the anchor. None of these functions clamp the translation;
//! see [`crate::clamp`].

use kurbo::{Point, Vec2};

use crate::error::{Result, ViewError};
use crate::transform::ViewTransform;

/// Computes the next scale for an exponential zoom step.
///
/// The limits must be finite, positive and ordered. A signal that overflows
/// in either direction (the factor becomes infinite or underflows to zero)
/// or is NaN is rejected before clamping, so it cannot saturate to a limit.
pub fn next_scale(
    old_scale: f64,
    rate: f64,
    signal: f64,
    min_scale: f64,
    max_scale: f64,
) -> Result<f64> {
    if !(min_scale.is_finite() && max_scale.is_finite())
        || min_scale <= 0.0
        || min_scale > max_scale
    {
        return Err(ViewError::InvalidScaleLimits {
            min: min_scale,
            max: max_scale,
        });
    }
    let factor = (rate * signal).exp();
    let candidate = old_scale * factor;
    if !(factor.is_finite() && candidate.is_finite()) || factor <= 0.0 || candidate <= 0.0 {
        return Err(ViewError::NonFiniteScale { scale: candidate });
    }
    Ok(candidate.clamp(min_scale, max_scale))
}

/// Rescales `current` to `new_scale` keeping the content under `anchor` fixed.
///
/// `anchor` and `viewport_origin` are in screen coordinates. The returned
/// translation is unclamped.
pub fn zoom_about_point(
    current: ViewTransform,
    anchor: Point,
    viewport_origin: Point,
    new_scale: f64,
) -> Result<ViewTransform> {
    if !new_scale.is_finite() || new_scale <= 0.0 {
        return Err(ViewError::NonFiniteScale { scale: new_scale });
    }
    if !anchor.is_finite() || !viewport_origin.is_finite() {
        return Err(ViewError::NonFiniteInput { what: "zoom anchor" });
    }

    let content = current.screen_to_content(anchor, viewport_origin);
    let translate = (anchor - viewport_origin) / new_scale - content.to_vec2();
    Ok(ViewTransform::new(translate, new_scale))
}

/// Translation change for a wheel pan.
///
/// Raw wheel deltas are multiplied by `sensitivity` and converted into
/// content units; the result is subtracted from the translation.
#[must_use]
pub fn wheel_pan_offset(delta: Vec2, sensitivity: f64, scale: f64) -> Vec2 {
    -(delta * sensitivity) / scale
}

/// Distance between two touch contacts.
#[must_use]
pub fn contact_distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}

/// Midpoint between two touch contacts.
#[must_use]
pub fn contact_midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::*;

    #[test]
    fn wheel_notch_zoom_factor() {
        // deltaY = -100 at a rate of 0.005 scales by exp(0.5).
        let scale = next_scale(1.0, 0.005, 100.0, 0.8, 10.0).unwrap();
        assert!((scale - 0.5_f64.exp()).abs() < 1e-12);
        assert!((scale - 1.648_721_270_700_128).abs() < 1e-12);
    }

    #[test]
    fn pinch_travel_zoom_factor() {
        // 50px to 80px of finger separation at 0.004.
        let change = contact_distance(Point::new(0.0, 0.0), Point::new(0.0, 80.0))
            - contact_distance(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert!((change - 30.0).abs() < 1e-12);
        let scale = next_scale(1.0, 0.004, change, 0.8, 10.0).unwrap();
        assert!((scale - 0.12_f64.exp()).abs() < 1e-12);
        assert!((scale - 1.1275).abs() < 1e-4);
    }

    #[test]
    fn scale_saturates_at_limits() {
        assert_eq!(next_scale(9.0, 0.005, 1_000.0, 0.8, 10.0).unwrap(), 10.0);
        assert_eq!(next_scale(1.0, 0.005, -1_000.0, 0.8, 10.0).unwrap(), 0.8);
    }

    #[test]
    fn overflowing_signal_is_rejected() {
        assert!(next_scale(1.0, 0.005, 1e300, 0.8, 10.0).is_err());
        assert!(next_scale(1.0, 0.005, f64::NAN, 0.8, 10.0).is_err());
    }

    #[test]
    fn underflowing_signal_is_rejected() {
        // exp(-0.005 * MAX) underflows to zero; that must not clamp up to the minimum.
        assert!(matches!(
            next_scale(1.648, 0.005, -f64::MAX, 0.8, 10.0),
            Err(ViewError::NonFiniteScale { .. })
        ));
        assert!(next_scale(0.0, 0.005, 1.0, 0.8, 10.0).is_err());
    }

    #[test]
    fn reversed_or_nan_limits_are_rejected() {
        assert_eq!(
            next_scale(1.0, 0.005, 1.0, 10.0, 0.8),
            Err(ViewError::InvalidScaleLimits {
                min: 10.0,
                max: 0.8
            })
        );
        assert!(matches!(
            next_scale(1.0, 0.005, 1.0, f64::NAN, 10.0),
            Err(ViewError::InvalidScaleLimits { .. })
        ));
        assert!(next_scale(1.0, 0.005, 1.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn anchor_stays_over_the_same_content_point() {
        let origin = Point::new(20.0, 35.0);
        let anchor = Point::new(240.0, 410.0);
        for (scale, translate) in [
            (1.0, Vec2::new(0.0, 0.0)),
            (2.3, Vec2::new(-120.0, -400.0)),
            (0.8, Vec2::new(15.0, -3.0)),
        ] {
            let before = ViewTransform::new(translate, scale);
            let content_before = before.screen_to_content(anchor, origin);
            for new_scale in [0.8, 1.648_721_270_700_128, 7.5, 10.0] {
                let after = zoom_about_point(before, anchor, origin, new_scale).unwrap();
                let content_after = after.screen_to_content(anchor, origin);
                assert!((content_after.x - content_before.x).abs() < 1e-6);
                assert!((content_after.y - content_before.y).abs() < 1e-6);
                assert_eq!(after.scale, new_scale);
            }
        }
    }

    #[test]
    fn zoom_rejects_bad_inputs() {
        let t = ViewTransform::IDENTITY;
        assert!(zoom_about_point(t, Point::new(1.0, 1.0), Point::ZERO, 0.0).is_err());
        assert!(zoom_about_point(t, Point::new(f64::NAN, 1.0), Point::ZERO, 2.0).is_err());
    }

    #[test]
    fn wheel_pan_is_divided_by_scale() {
        let offset = wheel_pan_offset(Vec2::new(10.0, -5.0), 2.0, 4.0);
        assert_eq!(offset, Vec2::new(-5.0, 2.5));
    }

    #[test]
    fn midpoint_of_contacts() {
        let mid = contact_midpoint(Point::new(10.0, 20.0), Point::new(30.0, 60.0));
        assert_eq!(mid, Point::new(20.0, 40.0));
    }
}
