use convection_sim_core::ConvectionSimulation;
use std::ptr;

use crate::error::{ConvectionSimErrorCode, DefaultConvectionSimError};
use crate::helpers::{instance_from_ptr, track_error, track_result};

/// Opaque handle to a running convection simulation.
///
/// # Thread Safety
/// The instance is not synchronized. All calls for one handle must come from a single
/// thread (usually the host's frame loop); separate handles may live on separate threads.
pub struct ConvectionSimInstance {
    pub(crate) sim: ConvectionSimulation,
}

impl ConvectionSimInstance {
    /// Creates a new instance on a `width` x `height` grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is below 3, the grid is too large
    /// to address, or `ambient_temp` is not below the maximum temperature.
    pub(crate) fn new(
        width: u32,
        height: u32,
        ambient_temp: f32,
        seed: u64,
    ) -> Result<Self, DefaultConvectionSimError> {
        let width = usize::try_from(width)
            .map_err(|_| DefaultConvectionSimError::invalid_parameter(format!("width {width}")))?;
        let height = usize::try_from(height).map_err(|_| {
            DefaultConvectionSimError::invalid_parameter(format!("height {height}"))
        })?;

        let sim = ConvectionSimulation::new(width, height, ambient_temp, seed)?;
        Ok(Self { sim })
    }
}

/// Create a simulation on a `width` x `height` grid at `ambient_temp`, seeded with `seed`.
///
/// Returns
/// - `ConvectionSimErrorCode::Ok` (0): success, `out_instance` contains valid pointer
/// - `ConvectionSimErrorCode::NullPointer`: `out_instance` parameter is null
/// - `ConvectionSimErrorCode::InvalidParameter`: dimensions below 3x3 or unusable ambient
///   temperature
///
/// Error Details
/// - Call `convection_sim_get_last_error()` to retrieve human-readable error description
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `convection_sim_destroy` exactly once to avoid memory leaks.
///
/// Example (C)
/// ```c
/// ConvectionSimInstance* sim = NULL;
/// if (convection_sim_new(160, 200, 0.18f, 42, &sim) != Ok) {
///     fprintf(stderr, "init failed: %s\n", convection_sim_get_last_error());
///     return;
/// }
/// // ... advance and render every frame ...
/// convection_sim_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn convection_sim_new(
    width: u32,
    height: u32,
    ambient_temp: f32,
    seed: u64,
    out_instance: *mut *mut ConvectionSimInstance,
) -> ConvectionSimErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultConvectionSimError::null_pointer("out_instance"));
    }

    match track_result(ConvectionSimInstance::new(width, height, ambient_temp, seed)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(Box::new(instance));
            }
            ConvectionSimErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Null on error so hosts never see a dangling handle
                *out_instance = ptr::null_mut();
            }

            code
        }
    }
}

/// Destroys an instance previously created by `convection_sim_new`.
///
/// Behavior:
/// - If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `convection_sim_new`.
/// - The pointer MUST NOT have been freed already, moved, or otherwise invalidated.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn convection_sim_destroy(ptr: *mut ConvectionSimInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: non-null pointers come from `Box::into_raw` in `convection_sim_new`
    // and are freed exactly once per the caller contract.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

/// Write the grid dimensions in cells to `out_width` and `out_height`.
///
/// # Safety
/// - `ptr` must be null or a live pointer from `convection_sim_new`.
/// - `out_width` and `out_height` must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn convection_sim_get_dimensions(
    ptr: *mut ConvectionSimInstance,
    out_width: *mut u32,
    out_height: *mut u32,
) -> ConvectionSimErrorCode {
    if out_width.is_null() {
        return track_error(&DefaultConvectionSimError::null_pointer("out_width"));
    }
    if out_height.is_null() {
        return track_error(&DefaultConvectionSimError::null_pointer("out_height"));
    }

    match track_result(unsafe { instance_from_ptr(ptr) }.map(|instance| {
        (
            u32::try_from(instance.sim.width()).unwrap_or(u32::MAX),
            u32::try_from(instance.sim.height()).unwrap_or(u32::MAX),
        )
    })) {
        Ok((width, height)) => {
            unsafe {
                *out_width = width;
                *out_height = height;
            }
            ConvectionSimErrorCode::Ok
        }
        Err(code) => code,
    }
}
