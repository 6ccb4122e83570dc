//! Edge conditions
//!
//! - Temperature: soft Dirichlet. Edge cells move a fixed fraction toward ambient each
//!   step, so edges decay exponentially instead of snapping.
//! - Velocity: no penetration. The component normal to each edge is set to exactly zero
//!   (vertical on top/bottom rows, horizontal on left/right columns).

use super::fields::FieldStore;
use super::sampler::lerp;

/// Relax edge temperatures toward `ambient` by `blend` and zero normal velocities
///
/// Corner cells belong to both a row and a column edge, so they are blended twice and
/// have both velocity components zeroed.
pub fn relax_boundaries(fields: &mut FieldStore, ambient: f32, blend: f32) {
    let width = fields.width();
    let height = fields.height();
    if width == 0 || height == 0 {
        return;
    }
    let temp = fields.temperature.as_mut_slice();
    let vx = fields.velocity_x.as_mut_slice();
    let vy = fields.velocity_y.as_mut_slice();

    let bottom = (height - 1) * width;
    for x in 0..width {
        temp[x] = lerp(temp[x], ambient, blend);
        temp[bottom + x] = lerp(temp[bottom + x], ambient, blend);
        vy[x] = 0.0;
        vy[bottom + x] = 0.0;
    }

    for y in 0..height {
        let left = y * width;
        let right = left + width - 1;
        temp[left] = lerp(temp[left], ambient, blend);
        temp[right] = lerp(temp[right], ambient, blend);
        vx[left] = 0.0;
        vx[right] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normal_velocity_zeroed() {
        let mut fields = FieldStore::new(5, 4, 0.2);
        fields.velocity_x.fill(1.5);
        fields.velocity_y.fill(-2.5);
        relax_boundaries(&mut fields, 0.2, 0.08);

        for x in 0..5 {
            assert_eq!(fields.velocity_y.get(x, 0), 0.0);
            assert_eq!(fields.velocity_y.get(x, 3), 0.0);
        }
        for y in 0..4 {
            assert_eq!(fields.velocity_x.get(0, y), 0.0);
            assert_eq!(fields.velocity_x.get(4, y), 0.0);
        }
        // Tangential components on edges survive
        assert_eq!(fields.velocity_x.get(2, 0), 1.5);
        assert_eq!(fields.velocity_y.get(0, 2), -2.5);
        // Interior untouched
        assert_eq!(fields.velocity_x.get(2, 2), 1.5);
        assert_eq!(fields.velocity_y.get(2, 2), -2.5);
    }

    #[test]
    fn test_temperature_blends_toward_ambient() {
        let mut fields = FieldStore::new(5, 5, 1.0);
        relax_boundaries(&mut fields, 0.0, 0.1);

        assert_abs_diff_eq!(fields.temperature.get(2, 0), 0.9, epsilon = 1e-6);
        assert_abs_diff_eq!(fields.temperature.get(4, 2), 0.9, epsilon = 1e-6);
        // Corners are on two edges
        assert_abs_diff_eq!(fields.temperature.get(0, 0), 0.81, epsilon = 1e-6);
        assert_eq!(fields.temperature.get(2, 2), 1.0);
    }

    #[test]
    fn test_cold_edges_warm_toward_ambient() {
        let mut fields = FieldStore::new(4, 4, 0.0);
        relax_boundaries(&mut fields, 0.2, 0.5);
        let edge = fields.temperature.get(1, 3);
        assert!(edge > 0.0 && edge < 0.2, "never snaps to ambient");
    }
}
