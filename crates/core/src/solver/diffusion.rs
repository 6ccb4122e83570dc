//! Explicit diffusion
//!
//! One Jacobi relaxation of the discrete heat equation per call:
//! ```text
//! T'[x,y] = T[x,y] + rate · (T[x-1,y] + T[x+1,y] + T[x,y-1] + T[x,y+1] - 4·T[x,y])
//! ```
//! Neighbor values are read from the scratch snapshot so the update is order-independent.
//! Only interior cells are written; edges belong to the boundary stage.

use super::fields::FieldData;

/// Apply one diffusion pass to `field`, using `scratch` as the read source
///
/// A non-positive (or NaN) rate is a no-op and leaves `field` and `scratch` untouched.
pub fn diffuse(field: &mut FieldData, scratch: &mut FieldData, rate: f32) {
    if rate.is_nan() || rate <= 0.0 {
        return;
    }

    scratch.copy_from(field);

    let width = field.width;
    let height = field.height;
    let src = scratch.as_slice();
    let dst = field.as_mut_slice();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let old = src[idx];
            let sum = src[idx - 1] + src[idx + 1] + src[idx - width] + src[idx + width];
            dst[idx] = old + rate * (sum - 4.0 * old);
        }
    }
}
