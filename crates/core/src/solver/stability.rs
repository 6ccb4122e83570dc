//! Velocity clamp
//!
//! Each component is clamped independently into `[-max_speed, max_speed]`. Advection
//! stays stable without this, but unbounded velocities smear the temperature field beyond
//! recognition and widen the backward-trace window.

use super::fields::FieldStore;

/// Clamp both velocity components of every cell to `max_speed`
pub fn clamp_velocities(fields: &mut FieldStore, max_speed: f32) {
    for v in fields
        .velocity_x
        .as_mut_slice()
        .iter_mut()
        .chain(fields.velocity_y.as_mut_slice().iter_mut())
    {
        *v = v.clamp(-max_speed, max_speed);
    }
}
