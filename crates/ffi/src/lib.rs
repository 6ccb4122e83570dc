//! C ABI for the convection simulation.
//!
//! A host creates one `ConvectionSimInstance` per view, then every frame calls
//! `convection_sim_advance` (unless paused) and `convection_sim_render` into its own
//! RGBA buffer. Every fallible function returns a `ConvectionSimErrorCode`; the message
//! for the most recent failure on the calling thread is available from
//! `convection_sim_get_last_error`.

mod controls;
mod error;
mod helpers;
mod instance;
mod simulation;

pub use controls::{convection_sim_set_diffusion_rate, convection_sim_set_heat_power};
pub use error::{
    convection_sim_get_last_error, convection_sim_get_last_error_code, ConvectionSimErrorCode,
};
pub use instance::{
    convection_sim_destroy, convection_sim_get_dimensions, convection_sim_new,
    ConvectionSimInstance,
};
pub use simulation::{convection_sim_advance, convection_sim_render};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn create(width: u32, height: u32) -> *mut ConvectionSimInstance {
        let mut instance: *mut ConvectionSimInstance = ptr::null_mut();
        let code = unsafe { convection_sim_new(width, height, 0.18, 42, &mut instance) };
        assert_eq!(code, ConvectionSimErrorCode::Ok);
        assert!(!instance.is_null());
        instance
    }

    #[test]
    fn test_lifecycle_advance_and_render() {
        let sim = create(40, 50);

        let (mut w, mut h) = (0_u32, 0_u32);
        let code = unsafe { convection_sim_get_dimensions(sim, &mut w, &mut h) };
        assert_eq!(code, ConvectionSimErrorCode::Ok);
        assert_eq!((w, h), (40, 50));

        let mut frame = vec![0_u8; 40 * 50 * 4];
        for _ in 0..5 {
            assert_eq!(unsafe { convection_sim_advance(sim) }, ConvectionSimErrorCode::Ok);
            let code = unsafe { convection_sim_render(sim, frame.as_mut_ptr(), frame.len()) };
            assert_eq!(code, ConvectionSimErrorCode::Ok);
        }
        assert!(frame.chunks_exact(4).all(|px| px[3] == 255));
        assert!(convection_sim_get_last_error().is_null());

        unsafe { convection_sim_destroy(sim) };
    }

    #[test]
    fn test_render_size_mismatch_leaves_buffer_untouched() {
        let sim = create(8, 8);
        let mut frame = vec![7_u8; 8 * 8 * 4 - 1];

        let code = unsafe { convection_sim_render(sim, frame.as_mut_ptr(), frame.len()) };
        assert_eq!(code, ConvectionSimErrorCode::SizeMismatch);
        assert_eq!(convection_sim_get_last_error_code(), ConvectionSimErrorCode::SizeMismatch);
        assert!(frame.iter().all(|&b| b == 7));

        let message = unsafe { CStr::from_ptr(convection_sim_get_last_error()) };
        assert!(message.to_string_lossy().contains("size mismatch"));

        unsafe { convection_sim_destroy(sim) };
    }

    #[test]
    fn test_invalid_dimensions_return_null_instance() {
        let mut instance: *mut ConvectionSimInstance = ptr::null_mut();
        let code = unsafe { convection_sim_new(2, 10, 0.18, 1, &mut instance) };
        assert_eq!(code, ConvectionSimErrorCode::InvalidParameter);
        assert!(instance.is_null());
    }

    #[test]
    fn test_null_instance_is_reported() {
        let code = unsafe { convection_sim_advance(ptr::null_mut()) };
        assert_eq!(code, ConvectionSimErrorCode::NullPointer);

        let code = unsafe { convection_sim_set_heat_power(ptr::null_mut(), 50.0) };
        assert_eq!(code, ConvectionSimErrorCode::NullPointer);

        // Destroying null is a no-op
        unsafe { convection_sim_destroy(ptr::null_mut()) };
    }

    #[test]
    fn test_setters_succeed_and_clear_error() {
        let sim = create(10, 10);
        let _ = unsafe { convection_sim_render(sim, ptr::null_mut(), 0) };
        assert_eq!(convection_sim_get_last_error_code(), ConvectionSimErrorCode::NullPointer);

        let code = unsafe { convection_sim_set_heat_power(sim, 150.0) };
        assert_eq!(code, ConvectionSimErrorCode::Ok);
        let code = unsafe { convection_sim_set_diffusion_rate(sim, f32::NAN) };
        assert_eq!(code, ConvectionSimErrorCode::Ok);
        assert_eq!(convection_sim_get_last_error_code(), ConvectionSimErrorCode::Ok);

        unsafe { convection_sim_destroy(sim) };
    }
}
