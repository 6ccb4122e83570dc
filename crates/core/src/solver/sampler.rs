//! Bilinear sampling of a field at fractional coordinates

use super::fields::FieldData;

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bilinearly interpolate `field` at `(fx, fy)`
///
/// The caller clamps coordinates into `[0, width-1] × [0, height-1]`. The far corner is
/// clamped to the last row/column, so sampling exactly on the last cell is valid. The
/// result always lies in the convex hull of the four surrounding samples.
#[inline]
pub fn sample_bilinear(field: &FieldData, fx: f32, fy: f32) -> f32 {
    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(field.width - 1);
    let y1 = (y0 + 1).min(field.height - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let top = lerp(field.get(x0, y0), field.get(x1, y0), tx);
    let bottom = lerp(field.get(x0, y1), field.get(x1, y1), tx);
    lerp(top, bottom, ty)
}
