// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for the controller: zoom range, gesture rates and the edge margin.

use crate::error::{Result, ViewError};

/// Smallest scale reachable by zoom gestures.
pub const DEFAULT_MIN_SCALE: f64 = 0.8;

/// Largest scale reachable by zoom gestures.
pub const DEFAULT_MAX_SCALE: f64 = 10.0;

/// Exponential rate applied to the wheel's vertical delta when zooming.
///
/// One wheel notch (a delta of about 100) scales by `exp(0.5)`.
pub const DEFAULT_WHEEL_ZOOM_RATE: f64 = 0.005;

/// Exponential rate applied to the change in inter-finger distance.
pub const DEFAULT_PINCH_ZOOM_RATE: f64 = 0.004;

/// Multiplier applied to raw wheel deltas when the wheel pans.
pub const DEFAULT_WHEEL_PAN_SENSITIVITY: f64 = 2.0;

/// Configuration for a [`crate::ViewportController`].
///
/// The defaults match the constants in this module. Use the `with_*`
/// builders to adjust individual values and [`ViewConfig::validate`] to check
/// a configuration loaded from elsewhere.
///
/// ```
/// use understory_map_view::ViewConfig;
///
/// let config = ViewConfig::default()
///     .with_scale_limits(4.0, 0.5)
///     .with_border_margin(16.0);
/// assert_eq!(config.min_scale, 0.5);
/// assert_eq!(config.max_scale, 4.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Lower bound on the scale.
    pub min_scale: f64,
    /// Upper bound on the scale.
    pub max_scale: f64,
    /// Rate `k` in `exp(-k * delta_y)` for modifier-wheel zoom.
    pub wheel_zoom_rate: f64,
    /// Rate `k` in `exp(k * distance_change)` for pinch zoom.
    pub pinch_zoom_rate: f64,
    /// Factor applied to raw wheel deltas before they pan the view.
    pub wheel_pan_sensitivity: f64,
    /// Slack allowed between the content's near edge and the viewport's near
    /// edge when the content overflows the viewport.
    pub border_margin: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            wheel_zoom_rate: DEFAULT_WHEEL_ZOOM_RATE,
            pinch_zoom_rate: DEFAULT_PINCH_ZOOM_RATE,
            wheel_pan_sensitivity: DEFAULT_WHEEL_PAN_SENSITIVITY,
            border_margin: 0.0,
        }
    }
}

impl ViewConfig {
    /// Sets the scale range.
    ///
    /// The pair is normalized so that `min_scale <= max_scale`.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the wheel and pinch zoom rates.
    #[must_use]
    pub fn with_zoom_rates(mut self, wheel: f64, pinch: f64) -> Self {
        self.wheel_zoom_rate = wheel;
        self.pinch_zoom_rate = pinch;
        self
    }

    /// Sets the wheel pan sensitivity.
    #[must_use]
    pub fn with_wheel_pan_sensitivity(mut self, sensitivity: f64) -> Self {
        self.wheel_pan_sensitivity = sensitivity;
        self
    }

    /// Sets the border margin.
    #[must_use]
    pub fn with_border_margin(mut self, margin: f64) -> Self {
        self.border_margin = margin;
        self
    }

    /// Checks that the configuration can drive a controller.
    pub fn validate(&self) -> Result<()> {
        let Self {
            min_scale,
            max_scale,
            wheel_zoom_rate,
            pinch_zoom_rate,
            wheel_pan_sensitivity,
            border_margin,
        } = *self;

        if !(min_scale.is_finite() && max_scale.is_finite())
            || min_scale <= 0.0
            || min_scale > max_scale
        {
            return Err(ViewError::InvalidScaleLimits {
                min: min_scale,
                max: max_scale,
            });
        }
        for (name, value) in [
            ("wheel_zoom_rate", wheel_zoom_rate),
            ("pinch_zoom_rate", pinch_zoom_rate),
            ("wheel_pan_sensitivity", wheel_pan_sensitivity),
        ] {
            if !value.is_finite() {
                return Err(ViewError::NonFiniteTuning { name, value });
            }
        }
        if !border_margin.is_finite() || border_margin < 0.0 {
            return Err(ViewError::NegativeBorderMargin {
                margin: border_margin,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ViewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_scale, 0.8);
        assert_eq!(config.max_scale, 10.0);
        assert_eq!(config.border_margin, 0.0);
    }

    #[test]
    fn scale_limits_are_normalized() {
        let config = ViewConfig::default().with_scale_limits(3.0, 1.0);
        assert_eq!((config.min_scale, config.max_scale), (1.0, 3.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_min = ViewConfig::default().with_scale_limits(0.0, 2.0);
        assert_eq!(
            zero_min.validate(),
            Err(ViewError::InvalidScaleLimits { min: 0.0, max: 2.0 })
        );

        let margin = ViewConfig::default().with_border_margin(-1.0);
        assert_eq!(
            margin.validate(),
            Err(ViewError::NegativeBorderMargin { margin: -1.0 })
        );

        let rate = ViewConfig::default().with_zoom_rates(f64::INFINITY, 0.004);
        assert!(matches!(
            rate.validate(),
            Err(ViewError::NonFiniteTuning {
                name: "wheel_zoom_rate",
                ..
            })
        ));
    }

    #[test]
    fn reversed_limits_set_directly_are_rejected() {
        let config = ViewConfig {
            min_scale: 5.0,
            max_scale: 1.0,
            ..ViewConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ViewError::InvalidScaleLimits { min: 5.0, max: 1.0 })
        );
    }
}
