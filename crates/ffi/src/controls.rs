use crate::error::ConvectionSimErrorCode;
use crate::helpers::{instance_from_ptr, result_code};
use crate::instance::ConvectionSimInstance;

/// Set heat power from a UI slider value in `[0, 100]`.
///
/// Out-of-range values are clamped; the new power applies from the next
/// `convection_sim_advance`.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `convection_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn convection_sim_set_heat_power(
    ptr: *mut ConvectionSimInstance,
    slider: f32,
) -> ConvectionSimErrorCode {
    result_code(
        unsafe { instance_from_ptr(ptr) }.map(|instance| instance.sim.set_heat_power(slider)),
    )
}

/// Set the temperature diffusion rate from a UI slider value in `[0, 100]`.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `convection_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn convection_sim_set_diffusion_rate(
    ptr: *mut ConvectionSimInstance,
    slider: f32,
) -> ConvectionSimErrorCode {
    result_code(
        unsafe { instance_from_ptr(ptr) }.map(|instance| instance.sim.set_diffusion_rate(slider)),
    )
}
