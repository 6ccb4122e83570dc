use std::slice;

use crate::error::{ConvectionSimErrorCode, DefaultConvectionSimError};
use crate::helpers::{instance_from_ptr, result_code};
use crate::instance::ConvectionSimInstance;

/// Advance the simulation by one fixed step.
///
/// Call once per frame while running; skipping calls pauses the simulation.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `convection_sim_new`.
/// - Passing null returns `NullPointer`; any other invalid pointer is undefined behavior.
#[no_mangle]
pub unsafe extern "C" fn convection_sim_advance(
    ptr: *mut ConvectionSimInstance,
) -> ConvectionSimErrorCode {
    result_code(unsafe { instance_from_ptr(ptr) }.map(|instance| instance.sim.advance()))
}

/// Fill `buffer` with the false-color image of the current temperature field.
///
/// The buffer holds `width * height` RGBA pixels in row-major order, 4 bytes each,
/// alpha always 255. Rendering never changes simulation state.
///
/// Returns
/// - `ConvectionSimErrorCode::Ok` (0): buffer filled
/// - `ConvectionSimErrorCode::NullPointer`: `ptr` or `buffer` is null
/// - `ConvectionSimErrorCode::SizeMismatch`: `len` is not `width * height * 4`; buffer untouched
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `convection_sim_new`.
/// - `buffer` must be valid for writes of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn convection_sim_render(
    ptr: *mut ConvectionSimInstance,
    buffer: *mut u8,
    len: usize,
) -> ConvectionSimErrorCode {
    result_code(unsafe { render_into(ptr, buffer, len) })
}

unsafe fn render_into(
    ptr: *mut ConvectionSimInstance,
    buffer: *mut u8,
    len: usize,
) -> Result<(), DefaultConvectionSimError> {
    let instance = unsafe { instance_from_ptr(ptr) }?;
    if buffer.is_null() {
        return Err(DefaultConvectionSimError::null_pointer("buffer"));
    }
    // SAFETY: caller guarantees `buffer` is writable for `len` bytes.
    let pixels = unsafe { slice::from_raw_parts_mut(buffer, len) };
    instance.sim.render(pixels)?;
    Ok(())
}
