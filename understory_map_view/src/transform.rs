// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The published pan/zoom transform and conversions between screen and
//! content coordinates.

use core::fmt;

use kurbo::{Point, Vec2};

/// Translation and uniform scale of the content plane.
///
/// The translation is expressed in content units: the content point under a
/// screen point `p` is `(p - viewport_origin) / scale - translate`. This is
/// the model the anchored zoom is computed in.
///
/// The boundary clamp and the `Display` string treat the same translation as
/// an offset in screen pixels, so once the scale is not
/// `1` the conversions below drift from what a renderer of the string shows.
/// They keep zoom anchors consistent; they are not a hit-test mapping.
///
/// `Display` renders the transform the way SVG `transform` attributes expect:
///
/// ```
/// use kurbo::Vec2;
/// use understory_map_view::ViewTransform;
///
/// let t = ViewTransform::new(Vec2::new(-12.5, 0.0), 2.0);
/// assert_eq!(t.to_string(), "translate(-12.5 0) scale(2)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransform {
    /// Offset applied before the scale.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// Scale `1`, no translation.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from its parts.
    #[must_use]
    pub const fn new(translate: Vec2, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// Returns the content-space point under `screen` in the anchor model.
    ///
    /// `viewport_origin` is the top-left corner of the viewport in screen
    /// coordinates.
    #[must_use]
    pub fn screen_to_content(&self, screen: Point, viewport_origin: Point) -> Point {
        ((screen - viewport_origin) / self.scale - self.translate).to_point()
    }

    /// Returns the screen point displaying `content`.
    ///
    /// This is the inverse of [`ViewTransform::screen_to_content`].
    #[must_use]
    pub fn content_to_screen(&self, content: Point, viewport_origin: Point) -> Point {
        viewport_origin + (content.to_vec2() + self.translate) * self.scale
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding positive zero folds `-0.0` into `0.0` so it prints as `0`.
        write!(
            f,
            "translate({} {}) scale({})",
            self.translate.x + 0.0,
            self.translate.y + 0.0,
            self.scale + 0.0
        )
    }
}
