//! Forcing stage: damping, heat injection, buoyancy and circulation
//!
//! Applied in that order at the start of every step, before any transport, so advection
//! reacts to forces added in the same step.
//!
//! Coordinates follow screen convention: `y` grows downward, so "up" is negative `y`.

use super::fields::FieldStore;
use crate::config::{BuoyancyConfig, CirculationConfig, HeatSourceConfig, ScanWindow};
use nalgebra::Vector2;
use std::ops::Range;

/// Heat source geometry resolved against a concrete grid
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSource {
    /// Source center in cell coordinates
    pub center: Vector2<f32>,
    pub radius: f32,
    pub vertical_stretch: f32,
    /// Velocity kick per unit of injected heat
    pub impulse: Vector2<f32>,
    x_range: Range<usize>,
    y_range: Range<usize>,
}

impl HeatSource {
    /// Place the source on a `width × height` grid
    ///
    /// Only cells inside the configured [`ScanWindow`] are ever heated.
    pub fn resolve(config: &HeatSourceConfig, width: usize, height: usize) -> Self {
        let center = Vector2::new(
            width as f32 - config.corner_offset.x,
            height as f32 - config.corner_offset.y,
        );
        let radius = config.radius_fraction * width as f32;
        let (x_range, y_range) = match config.scan_window {
            ScanWindow::CornerAnchored { extent } => (
                corner_span(extent.x * radius, width),
                corner_span(extent.y * radius, height),
            ),
            ScanWindow::BoundingBox => (
                interior_span(center.x, radius, width),
                interior_span(center.y, radius / config.vertical_stretch, height),
            ),
        };

        Self {
            center,
            radius,
            vertical_stretch: config.vertical_stretch,
            impulse: config.impulse,
            x_range,
            y_range,
        }
    }

    /// Region-relative weight at `(x, y)`: 1 at the center, 0 at and beyond the rim
    #[inline]
    pub fn falloff(&self, x: usize, y: usize) -> Option<f32> {
        let dx = x as f32 - self.center.x;
        let dy = (y as f32 - self.center.y) * self.vertical_stretch;
        let distance_sq = dx * dx + dy * dy;
        let radius_sq = self.radius * self.radius;
        if distance_sq < radius_sq {
            Some(1.0 - distance_sq / radius_sq)
        } else {
            None
        }
    }

    /// Cells that may fall inside the source
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.y_range
            .clone()
            .flat_map(move |y| self.x_range.clone().map(move |x| (x, y)))
    }
}

/// `[len - floor(reach), len - 2)`, never starting on the edge
fn corner_span(reach: f32, len: usize) -> Range<usize> {
    let lo = (len as f32 - reach.floor()).max(1.0) as usize;
    lo..len.saturating_sub(2)
}

fn interior_span(center: f32, half_extent: f32, len: usize) -> Range<usize> {
    let last_interior = (len.saturating_sub(2) as f32).max(1.0);
    let lo = (center - half_extent).floor().clamp(1.0, last_interior) as usize;
    let end = (center + half_extent).ceil().clamp(1.0, last_interior) as usize + 1;
    lo..end
}

/// Circulation pivot resolved against a concrete grid
#[derive(Debug, Clone, PartialEq)]
pub struct CirculationField {
    pub pivot: Vector2<f32>,
    height: f32,
    config: CirculationConfig,
}

impl CirculationField {
    pub fn resolve(config: &CirculationConfig, width: usize, height: usize) -> Self {
        Self {
            pivot: Vector2::new(
                config.pivot.x * width as f32,
                config.pivot.y * height as f32,
            ),
            height: height as f32,
            config: *config,
        }
    }
}

/// Multiply every velocity component by `damping`
pub fn apply_damping(fields: &mut FieldStore, damping: f32) {
    for v in fields.velocity_x.as_mut_slice() {
        *v *= damping;
    }
    for v in fields.velocity_y.as_mut_slice() {
        *v *= damping;
    }
}

/// Inject heat and an outward velocity kick inside the source region
///
/// Temperature is capped at `max_temp`; the velocity impulse is not.
pub fn inject_heat(fields: &mut FieldStore, source: &HeatSource, heat_power: f32, max_temp: f32) {
    for (x, y) in source.cells() {
        let Some(falloff) = source.falloff(x, y) else {
            continue;
        };
        let idx = fields.temperature.index(x, y);
        let heat = heat_power * falloff;
        let temp = &mut fields.temperature.data[idx];
        *temp = (*temp + heat).min(max_temp);
        fields.velocity_x.data[idx] += source.impulse.x * heat;
        fields.velocity_y.data[idx] += source.impulse.y * heat;
    }
}

/// Warm cells rise and cool cells sink
///
/// `delta = T - ambient`; `vy -= delta * strength`, with the rise strength for positive
/// deltas and the sink strength otherwise.
pub fn apply_buoyancy(fields: &mut FieldStore, ambient: f32, buoyancy: &BuoyancyConfig) {
    let width = fields.width();
    let height = fields.height();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let delta = fields.temperature.data[idx] - ambient;
            let strength = if delta > 0.0 {
                buoyancy.rise_strength
            } else {
                buoyancy.sink_strength
            };
            fields.velocity_y.data[idx] -= delta * strength;
        }
    }
}

/// Add the swirl around the pivot and the horizontal return flow
///
/// Both terms scale with local excess heat, so hot fluid circulates harder. The return
/// flow pushes the upper half one way and the lower half the other.
pub fn apply_circulation(fields: &mut FieldStore, ambient: f32, circulation: &CirculationField) {
    let cfg = &circulation.config;
    let width = fields.width();
    let height = fields.height();
    for y in 1..height.saturating_sub(1) {
        let vertical_ratio = y as f32 / circulation.height;
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let offset = Vector2::new(x as f32, y as f32) - circulation.pivot;
            // Offset keeps the pivot cell finite
            let distance = offset.norm() + 1.0;
            let heat = (fields.temperature.data[idx] - ambient).max(0.0);

            let swirl = cfg.swirl_strength * (cfg.swirl_base + heat * cfg.swirl_heat_gain);
            fields.velocity_x.data[idx] += (-offset.y / distance) * swirl;
            fields.velocity_y.data[idx] += (offset.x / distance) * swirl;

            fields.velocity_x.data[idx] += (0.5 - vertical_ratio)
                * cfg.return_flow
                * (cfg.return_base + heat * cfg.return_heat_gain);
        }
    }
}
