// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the pure view computations.
//!
//! The controller never propagates these to event callers. It logs them and
//! keeps its previous state; they are returned from the free functions in
//! [`crate::clamp`] and [`crate::zoom`] and from fallible construction.

use thiserror::Error;

/// Reasons a view computation was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ViewError {
    /// The viewport has a zero, negative or non-finite extent.
    #[error("degenerate viewport: {width} x {height}")]
    DegenerateViewport {
        /// Viewport width in screen units.
        width: f64,
        /// Viewport height in screen units.
        height: f64,
    },

    /// The content plane has a zero, negative or non-finite extent.
    #[error("degenerate content size: {width} x {height}")]
    DegenerateContent {
        /// Content width in content units.
        width: f64,
        /// Content height in content units.
        height: f64,
    },

    /// A scale was zero, negative, NaN or infinite.
    #[error("non-finite or non-positive scale: {scale}")]
    NonFiniteScale {
        /// The rejected scale value.
        scale: f64,
    },

    /// The configured scale range is empty or not strictly positive.
    #[error("invalid scale limits: min {min}, max {max}")]
    InvalidScaleLimits {
        /// Configured minimum scale.
        min: f64,
        /// Configured maximum scale.
        max: f64,
    },

    /// The border margin was negative or non-finite.
    #[error("border margin must be a non-negative finite value, got {margin}")]
    NegativeBorderMargin {
        /// The rejected margin.
        margin: f64,
    },

    /// An input coordinate or delta was NaN or infinite.
    #[error("non-finite {what} in input")]
    NonFiniteInput {
        /// Which input carried the bad value.
        what: &'static str,
    },

    /// A tuning constant (zoom rate, pan sensitivity) was not finite.
    #[error("tuning value `{name}` must be finite, got {value}")]
    NonFiniteTuning {
        /// Name of the configuration field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result alias for view computations.
pub type Result<T> = core::result::Result<T, ViewError>;
