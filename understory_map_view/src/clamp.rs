// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge clamping for the map translation.
//!
//! Each axis is handled independently. When the scaled content is larger
//! than the viewport on an axis, the translation is bounded so that the
//! content's far edge never recedes past the viewport's far edge and its near
//! edge never moves further in than the border margin. When the scaled content
//! fits, it is centered on that axis regardless of the incoming translation.
//!
//! Clamping is idempotent: a clamped translation is returned unchanged.
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_map_view::clamp::clamp_translation;
//!
//! let content = Size::new(463.0, 1355.0);
//! let viewport = Size::new(463.0, 700.0);
//!
//! let t = clamp_translation(Vec2::new(40.0, -900.0), 1.0, content, viewport, 0.0).unwrap();
//! // Width fits exactly, so X is centered; Y is bounded to [-655, 0].
//! assert_eq!(t, Vec2::new(0.0, -655.0));
//! ```

use kurbo::{Size, Vec2};

use crate::error::{Result, ViewError};

/// Clamps a single axis.
///
/// `content_len` is in content units, `view_len` in screen units, and
/// `border_margin` must be non-negative.
#[must_use]
pub fn clamp_axis(
    translate: f64,
    content_len: f64,
    view_len: f64,
    scale: f64,
    border_margin: f64,
) -> f64 {
    let overflow = content_len * scale - view_len;
    if overflow > 0.0 {
        translate.max(-overflow).min(border_margin)
    } else {
        -overflow / 2.0
    }
}

/// Corrects `translate` so the content covers the viewport on both axes
/// (or is centered on an axis where it is smaller than the viewport).
///
/// Degenerate geometry is rejected rather than producing non-finite output:
/// callers are expected to keep their previous translation on error.
pub fn clamp_translation(
    translate: Vec2,
    scale: f64,
    content: Size,
    viewport: Size,
    border_margin: f64,
) -> Result<Vec2> {
    if !is_positive_extent(viewport) {
        return Err(ViewError::DegenerateViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if !is_positive_extent(content) {
        return Err(ViewError::DegenerateContent {
            width: content.width,
            height: content.height,
        });
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ViewError::NonFiniteScale { scale });
    }
    if !border_margin.is_finite() || border_margin < 0.0 {
        return Err(ViewError::NegativeBorderMargin {
            margin: border_margin,
        });
    }
    if translate.x.is_nan() || translate.y.is_nan() {
        return Err(ViewError::NonFiniteInput {
            what: "translation",
        });
    }

    Ok(Vec2::new(
        clamp_axis(
            translate.x,
            content.width,
            viewport.width,
            scale,
            border_margin,
        ),
        clamp_axis(
            translate.y,
            content.height,
            viewport.height,
            scale,
            border_margin,
        ),
    ))
}

fn is_positive_extent(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
