use crate::error::{
    with_last_error_mut, ConvectionSimError, ConvectionSimErrorCode, DefaultConvectionSimError,
};
use crate::instance::ConvectionSimInstance;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl ConvectionSimError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl ConvectionSimError) -> ConvectionSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations so stale messages are never reported.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = ConvectionSimErrorCode::Ok;
    });
}

/// Track a result: clear the last error on success, record it on failure.
pub(crate) fn track_result<T, E: ConvectionSimError>(
    result: Result<T, E>,
) -> Result<T, ConvectionSimErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(err) => Err(track_error(&err)),
    }
}

/// Collapse a unit result into the code returned across the boundary.
pub(crate) fn result_code(result: Result<(), DefaultConvectionSimError>) -> ConvectionSimErrorCode {
    match track_result(result) {
        Ok(()) => ConvectionSimErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the instance behind `ptr` mutably.
///
/// # Safety
/// `ptr` must be null or a live pointer from `convection_sim_new` with no other
/// outstanding borrow.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *mut ConvectionSimInstance,
) -> Result<&'a mut ConvectionSimInstance, DefaultConvectionSimError> {
    // SAFETY: non-null pointers are live instances per the caller contract.
    unsafe { ptr.as_mut() }.ok_or_else(|| DefaultConvectionSimError::null_pointer("instance"))
}
