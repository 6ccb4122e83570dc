//! Grid-based convection solver
//!
//! The solver evolves a temperature field and a two-component velocity field on a fixed
//! grid. Each step runs the stages listed in [`STEP_ORDER`]:
//!
//! 1. Forcing: damping, heat source injection, buoyancy, circulation
//! 2. Velocity transport: semi-Lagrangian self-advection, Jacobi diffusion, clamping
//! 3. Temperature transport: semi-Lagrangian advection, Jacobi diffusion
//! 4. Boundary relaxation
//!
//! There is no pressure projection, so the velocity field is not divergence-free. The
//! scheme is stable and looks plausible; it is not a Navier-Stokes integrator.
//!
//! # Example
//!
//! ```rust
//! use convection_sim_core::config::{ControlParams, SimulationConfig};
//! use convection_sim_core::solver::{
//!     advance, CirculationField, FieldStore, HeatSource, StepContext,
//! };
//!
//! let config = SimulationConfig::default();
//! let heat_source = HeatSource::resolve(&config.heat_source, 64, 64);
//! let circulation = CirculationField::resolve(&config.circulation, 64, 64);
//! let mut fields = FieldStore::new(64, 64, config.ambient_temp);
//! let ctx = StepContext {
//!     config: &config,
//!     controls: ControlParams::default(),
//!     heat_source: &heat_source,
//!     circulation: &circulation,
//! };
//! advance(&mut fields, &ctx);
//! ```

mod advection;
mod boundary;
mod diffusion;
mod fields;
mod forcing;
mod sampler;
mod stability;
mod step;

pub use advection::{advect, advect_temperature, advect_velocity, TRACE_MARGIN};
pub use boundary::relax_boundaries;
pub use diffusion::diffuse;
pub use fields::{FieldData, FieldStore};
pub use forcing::{
    apply_buoyancy, apply_circulation, apply_damping, inject_heat, CirculationField, HeatSource,
};
pub use sampler::{lerp, sample_bilinear};
pub use stability::clamp_velocities;
pub use step::{advance, apply_stage, Stage, StepContext, STEP_ORDER};
