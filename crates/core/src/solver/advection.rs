//! Semi-Lagrangian advection
//!
//! Each interior cell traces backward along the velocity field by one timestep and takes the
//! bilinearly interpolated value of the pre-advection snapshot at that point. Looking
//! backward instead of scattering forward keeps the scheme stable for any velocity; large
//! displacements only cost sharpness.

use super::fields::{FieldData, FieldStore};
use super::sampler::sample_bilinear;

/// Backward-traced coordinates are kept this far inside the sampleable range
pub const TRACE_MARGIN: f32 = 0.001;

/// Advect `field` by `(vx, vy)` over `dt`, sampling from `source`
///
/// `source` must hold the pre-advection state; `field` is written for interior cells only.
pub fn advect(
    field: &mut FieldData,
    source: &FieldData,
    vx: &FieldData,
    vy: &FieldData,
    dt: f32,
) {
    let width = field.width;
    let height = field.height;
    let max_x = width as f32 - 1.0 - TRACE_MARGIN;
    let max_y = height as f32 - 1.0 - TRACE_MARGIN;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let back_x = (x as f32 - vx.data[idx] * dt).clamp(TRACE_MARGIN, max_x);
            let back_y = (y as f32 - vy.data[idx] * dt).clamp(TRACE_MARGIN, max_y);
            field.data[idx] = sample_bilinear(source, back_x, back_y);
        }
    }
}

/// Self-advect both velocity components
///
/// Both components trace against the same pre-advection velocity snapshot, so the y pass
/// never sees x values written earlier in the same step.
pub fn advect_velocity(fields: &mut FieldStore, dt: f32) {
    fields.snapshot_velocity();
    advect(
        &mut fields.velocity_x,
        &fields.velocity_x_scratch,
        &fields.velocity_x_scratch,
        &fields.velocity_y_scratch,
        dt,
    );
    advect(
        &mut fields.velocity_y,
        &fields.velocity_y_scratch,
        &fields.velocity_x_scratch,
        &fields.velocity_y_scratch,
        dt,
    );
}

/// Advect temperature through the current velocity field
pub fn advect_temperature(fields: &mut FieldStore, dt: f32) {
    fields.snapshot_temperature();
    advect(
        &mut fields.temperature,
        &fields.temperature_scratch,
        &fields.velocity_x,
        &fields.velocity_y,
        dt,
    );
}
