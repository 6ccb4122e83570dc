//! Convection Simulation Core Library
//!
//! A real-time 2D heat and flow simulation on a fixed grid. A localized heat source warms
//! the fluid, buoyancy and a large-scale circulation cell move it around, and the
//! temperature field is rendered as a false-color image every frame.
//!
//! ## Driving a simulation
//!
//! ```rust
//! use convection_sim_core::ConvectionSimulation;
//!
//! let mut sim = ConvectionSimulation::new(160, 200, 0.18, 42).unwrap();
//! sim.set_heat_power(70.0);
//! sim.set_diffusion_rate(30.0);
//!
//! let mut frame = vec![0_u8; sim.pixel_buffer_len()];
//! for _ in 0..10 {
//!     sim.advance();
//!     sim.render(&mut frame).unwrap();
//! }
//! ```
//!
//! Everything runs on the caller's thread; the simulation holds no state between calls
//! other than its fields, so a driver pauses simply by not calling `advance`.

pub mod config;
pub mod error;
pub mod render;
pub mod simulation;
pub mod solver;

pub use config::{ControlParams, SimulationConfig};
pub use error::SimError;
pub use render::{ColorRamp, Rgb};
pub use simulation::{ConvectionSimulation, SimulationStats};
