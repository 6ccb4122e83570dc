//! Simulation configuration
//!
//! All tuning constants live in [`SimulationConfig`], which is serde-deserializable so a
//! driver can override any subset from a file. Geometry is expressed relative to the grid
//! (corner offsets and fractions of width/height) so one configuration works for any
//! resolution.
//!
//! The two runtime-mutable values, heat power and diffusion rate, are kept separately in
//! [`ControlParams`] and are normally set from a `[0, 100]` slider position.

use crate::error::SimError;
use crate::render::ColorRamp;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Upper end of the normalized slider range accepted by the control setters
pub const SLIDER_MAX: f32 = 100.0;

/// Slider position used when the driver has not supplied one yet
pub const DEFAULT_SLIDER: f32 = 50.0;

/// Largest diffusion rate a single Jacobi pass stays stable at
pub const MAX_DIFFUSION_RATE: f32 = 0.25;

/// Fixed constants governing one simulation instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Rest-state temperature that boundaries relax toward
    pub ambient_temp: f32,
    /// Upper cap applied during heat injection; also the top of the color ramp
    pub max_temp: f32,
    /// Timestep used for the backward trace
    pub dt: f32,
    /// Per-step velocity multiplier (< 1)
    pub damping: f32,
    /// Jacobi rate applied to both velocity components every step
    pub velocity_diffusion: f32,
    /// Bound on each velocity component after the stability stage
    pub max_speed: f32,
    /// Fraction of the way edge temperatures move toward ambient per step
    pub boundary_blend: f32,
    /// Peak-to-peak amplitude of the random temperature jitter at startup
    pub initial_jitter: f32,
    pub heat_source: HeatSourceConfig,
    pub buoyancy: BuoyancyConfig,
    pub circulation: CirculationConfig,
    pub palette: ColorRamp,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ambient_temp: 0.18,
            max_temp: 1.0,
            dt: 0.9,
            damping: 0.995,
            velocity_diffusion: 0.0008,
            max_speed: 2.6,
            boundary_blend: 0.08,
            initial_jitter: 0.01,
            heat_source: HeatSourceConfig::default(),
            buoyancy: BuoyancyConfig::default(),
            circulation: CirculationConfig::default(),
            palette: ColorRamp::default(),
        }
    }
}

impl SimulationConfig {
    /// Check that every constant is usable by the solver stages
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when a value is non-finite, when
    /// `ambient_temp >= max_temp` (the color ramp would divide by zero), or when
    /// `max_speed` or the heat source geometry is negative.
    pub fn validate(&self) -> Result<(), SimError> {
        let scalars = [
            ("ambient_temp", self.ambient_temp),
            ("max_temp", self.max_temp),
            ("dt", self.dt),
            ("damping", self.damping),
            ("velocity_diffusion", self.velocity_diffusion),
            ("max_speed", self.max_speed),
            ("boundary_blend", self.boundary_blend),
            ("initial_jitter", self.initial_jitter),
            ("heat_source.radius_fraction", self.heat_source.radius_fraction),
            ("heat_source.vertical_stretch", self.heat_source.vertical_stretch),
            ("buoyancy.rise_strength", self.buoyancy.rise_strength),
            ("buoyancy.sink_strength", self.buoyancy.sink_strength),
            ("circulation.swirl_strength", self.circulation.swirl_strength),
            ("circulation.return_flow", self.circulation.return_flow),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }

        let vectors = [
            ("heat_source.corner_offset", self.heat_source.corner_offset),
            ("heat_source.impulse", self.heat_source.impulse),
            ("circulation.pivot", self.circulation.pivot),
        ];
        if let Some((name, _)) = vectors
            .iter()
            .find(|(_, v)| !(v.x.is_finite() && v.y.is_finite()))
        {
            return Err(SimError::InvalidConfig(format!(
                "{name} must have finite components"
            )));
        }

        if self.ambient_temp >= self.max_temp {
            return Err(SimError::InvalidConfig(format!(
                "ambient_temp ({}) must be below max_temp ({})",
                self.ambient_temp, self.max_temp
            )));
        }
        if self.max_speed < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        if self.heat_source.radius_fraction < 0.0 || self.heat_source.vertical_stretch <= 0.0 {
            return Err(SimError::InvalidConfig(
                "heat source radius must be non-negative and vertical_stretch positive"
                    .to_string(),
            ));
        }
        if let ScanWindow::CornerAnchored { extent } = self.heat_source.scan_window {
            let usable = |v: f32| v.is_finite() && v >= 0.0;
            if !(usable(extent.x) && usable(extent.y)) {
                return Err(SimError::InvalidConfig(
                    "heat_source.scan_window extent must be finite and non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Elliptical heat source anchored near the bottom-right corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatSourceConfig {
    /// Distance of the source center from the bottom-right corner, in cells
    pub corner_offset: Vector2<f32>,
    /// Source radius as a fraction of grid width
    pub radius_fraction: f32,
    /// Multiplier on vertical distance; values above 1 make the region wider than tall
    pub vertical_stretch: f32,
    /// Velocity kick per unit of injected heat (negative y is up)
    pub impulse: Vector2<f32>,
    /// Cells tested against the ellipse each step
    pub scan_window: ScanWindow,
}

/// Which cells the heat source considers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanWindow {
    /// From `len - floor(extent * radius)` up to, but excluding, `len - 2` on each axis
    ///
    /// Parts of the ellipse outside this window stay unheated.
    CornerAnchored { extent: Vector2<f32> },
    /// The ellipse's bounding box clipped to interior cells
    BoundingBox,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self::CornerAnchored {
            extent: Vector2::new(1.6, 1.4),
        }
    }
}

impl Default for HeatSourceConfig {
    fn default() -> Self {
        Self {
            corner_offset: Vector2::new(16.0, 20.0),
            radius_fraction: 0.16,
            vertical_stretch: 1.15,
            impulse: Vector2::new(-1.6, -6.0),
            scan_window: ScanWindow::default(),
        }
    }
}

/// Temperature-driven vertical force
///
/// Rise and sink strengths are equal by default but kept independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyancyConfig {
    /// Applied where the cell is warmer than ambient
    pub rise_strength: f32,
    /// Applied where the cell is at or below ambient
    pub sink_strength: f32,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            rise_strength: 0.06,
            sink_strength: 0.06,
        }
    }
}

/// Large-scale recirculation cell around a fixed pivot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CirculationConfig {
    /// Pivot position as fractions of (width, height)
    pub pivot: Vector2<f32>,
    pub swirl_strength: f32,
    /// Swirl multiplier is `swirl_base + excess_heat * swirl_heat_gain`
    pub swirl_base: f32,
    pub swirl_heat_gain: f32,
    pub return_flow: f32,
    /// Return-flow multiplier is `return_base + excess_heat * return_heat_gain`
    pub return_base: f32,
    pub return_heat_gain: f32,
}

impl Default for CirculationConfig {
    fn default() -> Self {
        Self {
            pivot: Vector2::new(0.55, 0.55),
            swirl_strength: 0.0009,
            swirl_base: 0.4,
            swirl_heat_gain: 2.0,
            return_flow: 0.0035,
            return_base: 0.4,
            return_heat_gain: 3.0,
        }
    }
}

/// Runtime-mutable control values, in physical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlParams {
    /// Heat injected at the source center per step
    pub heat_power: f32,
    /// Jacobi rate for temperature diffusion
    pub diffusion_rate: f32,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self::from_sliders(DEFAULT_SLIDER, DEFAULT_SLIDER)
    }
}

impl ControlParams {
    /// Build control values from two `[0, 100]` slider positions
    pub fn from_sliders(heat: f32, diffusion: f32) -> Self {
        Self {
            heat_power: heat_power_from_slider(heat),
            diffusion_rate: diffusion_rate_from_slider(diffusion),
        }
    }

    /// Clamp raw values into the range the solver stays bounded in
    ///
    /// Heat power is limited to `[0, heat_cap]` and the diffusion rate to
    /// `[0, MAX_DIFFUSION_RATE]`. NaN falls back to the slider minimum.
    #[must_use]
    pub fn sanitized(self, heat_cap: f32) -> Self {
        let clamp_or = |value: f32, hi: f32, fallback: f32| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(0.0, hi)
            }
        };
        let heat_floor = heat_power_from_slider(0.0);
        Self {
            heat_power: clamp_or(self.heat_power, heat_cap.max(0.0), heat_floor),
            diffusion_rate: clamp_or(
                self.diffusion_rate,
                MAX_DIFFUSION_RATE,
                diffusion_rate_from_slider(0.0),
            ),
        }
    }
}

/// Map a `[0, 100]` slider position to heat power in `[0.015, 0.055]`
///
/// Out-of-range input is clamped; NaN maps to the low end.
pub fn heat_power_from_slider(value: f32) -> f32 {
    0.015 + normalize_slider(value) * 0.04
}

/// Map a `[0, 100]` slider position to a diffusion rate in `[0.005, 0.04]`
///
/// Out-of-range input is clamped; NaN maps to the low end.
pub fn diffusion_rate_from_slider(value: f32) -> f32 {
    0.005 + normalize_slider(value) * 0.035
}

fn normalize_slider(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, SLIDER_MAX) / SLIDER_MAX
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_values() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.ambient_temp, 0.18);
        assert_eq!(cfg.max_temp, 1.0);
        assert_eq!(cfg.dt, 0.9);
        assert_eq!(cfg.damping, 0.995);
        assert_eq!(cfg.max_speed, 2.6);
        assert_eq!(cfg.boundary_blend, 0.08);
        assert_eq!(
            cfg.buoyancy.rise_strength, cfg.buoyancy.sink_strength,
            "buoyancy is symmetric by default"
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_slider_endpoints() {
        assert_abs_diff_eq!(heat_power_from_slider(0.0), 0.015);
        assert_abs_diff_eq!(heat_power_from_slider(100.0), 0.055, epsilon = 1e-6);
        assert_abs_diff_eq!(diffusion_rate_from_slider(0.0), 0.005);
        assert_abs_diff_eq!(diffusion_rate_from_slider(100.0), 0.04, epsilon = 1e-6);
    }

    #[test]
    fn test_slider_out_of_range_is_clamped() {
        assert_eq!(heat_power_from_slider(-20.0), heat_power_from_slider(0.0));
        assert_eq!(heat_power_from_slider(250.0), heat_power_from_slider(100.0));
        assert_eq!(diffusion_rate_from_slider(f32::INFINITY), diffusion_rate_from_slider(100.0));
        assert_eq!(diffusion_rate_from_slider(f32::NAN), diffusion_rate_from_slider(0.0));
    }

    #[test]
    fn test_default_controls_match_mid_slider() {
        let controls = ControlParams::default();
        assert_abs_diff_eq!(controls.heat_power, 0.035, epsilon = 1e-6);
        assert_abs_diff_eq!(controls.diffusion_rate, 0.0225, epsilon = 1e-6);
    }

    #[test]
    fn test_sanitized_controls_are_bounded() {
        let raw = ControlParams {
            heat_power: f32::NAN,
            diffusion_rate: f32::INFINITY,
        };
        let clean = raw.sanitized(0.82);
        assert_eq!(clean.heat_power, heat_power_from_slider(0.0));
        assert_eq!(clean.diffusion_rate, MAX_DIFFUSION_RATE);

        let raw = ControlParams {
            heat_power: 5.0,
            diffusion_rate: -1.0,
        };
        let clean = raw.sanitized(0.82);
        assert_eq!(clean.heat_power, 0.82);
        assert_eq!(clean.diffusion_rate, 0.0);

        // In-range values pass through untouched
        let mid = ControlParams::default();
        assert_eq!(mid.sanitized(0.82), mid);
    }

    #[test]
    fn test_validate_rejects_negative_scan_extent() {
        let mut cfg = SimulationConfig::default();
        cfg.heat_source.scan_window = ScanWindow::CornerAnchored {
            extent: Vector2::new(-1.0, 1.4),
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));

        cfg.heat_source.scan_window = ScanWindow::BoundingBox;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_temperature_range() {
        let cfg = SimulationConfig {
            ambient_temp: 1.0,
            max_temp: 1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut cfg = SimulationConfig::default();
        cfg.circulation.pivot.x = f32::NAN;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));

        let cfg = SimulationConfig {
            dt: f32::INFINITY,
            ..SimulationConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_negative_speed_bound() {
        let cfg = SimulationConfig {
            max_speed: -1.0,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
