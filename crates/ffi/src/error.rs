use convection_sim_core::SimError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait ConvectionSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ConvectionSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `ConvectionSimError` for FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultConvectionSimError {
    code: ConvectionSimErrorCode,
    msg: String,
}

impl DefaultConvectionSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"instance"`, `"buffer"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ConvectionSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: ConvectionSimErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<SimError> for DefaultConvectionSimError {
    fn from(error: SimError) -> Self {
        let code = match error {
            SimError::SizeMismatch { .. } => ConvectionSimErrorCode::SizeMismatch,
            SimError::InvalidDimensions { .. } | SimError::InvalidConfig(_) => {
                ConvectionSimErrorCode::InvalidParameter
            }
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl ConvectionSimError for DefaultConvectionSimError {
    fn code(&self) -> ConvectionSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by convection simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvectionSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter: grid dimensions or ambient temperature cannot be used.
    InvalidParameter = 2,

    /// Render buffer length is not `width * height * 4`.
    SizeMismatch = 3,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored so the pointer handed out stays valid until the next error.
    static LAST_ERROR: RefCell<(Option<CString>, ConvectionSimErrorCode)> =
        const { RefCell::new((None, ConvectionSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ConvectionSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ConvectionSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// uint8_t* pixels = malloc(len);
/// if (convection_sim_render(sim, pixels, len) != Ok) {
///     const char* error = convection_sim_get_last_error();
///     if (error) {
///         printf("Render failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn convection_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn convection_sim_get_last_error_code() -> ConvectionSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_maps_to_code() {
        let err: DefaultConvectionSimError = SimError::SizeMismatch {
            expected: 16,
            actual: 4,
        }
        .into();
        assert_eq!(err.code(), ConvectionSimErrorCode::SizeMismatch);
        assert!(err.msg().contains("expected 16"));
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultConvectionSimError::null_pointer("buffer");
        assert_eq!(err.code(), ConvectionSimErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'buffer' cannot be null");
    }
}
