//! Presentation of the temperature field
//!
//! Converts temperatures into an RGBA byte buffer a host can blit directly.

mod color;

pub use color::{render_rgba, ColorRamp, Rgb, BYTES_PER_PIXEL};
