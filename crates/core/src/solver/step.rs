//! Step orchestration
//!
//! One call to [`advance`] runs every stage in [`STEP_ORDER`]. The order matters:
//! - forcing comes before transport, so the step reacts to fresh forces
//! - diffusion follows advection, damping interpolation ringing
//! - boundary relaxation runs last, restoring edge constraints any earlier stage broke

use super::advection::{advect_temperature, advect_velocity};
use super::boundary::relax_boundaries;
use super::diffusion::diffuse;
use super::fields::FieldStore;
use super::forcing::{
    apply_buoyancy, apply_circulation, apply_damping, inject_heat, CirculationField, HeatSource,
};
use super::stability::clamp_velocities;
use crate::config::{ControlParams, SimulationConfig};

/// One stage of the per-step pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Damping,
    HeatInjection,
    Buoyancy,
    Circulation,
    /// x then y, both traced against the pre-advection velocity
    VelocityAdvection,
    /// x then y, at the fixed velocity diffusion rate
    VelocityDiffusion,
    VelocityClamp,
    TemperatureAdvection,
    /// At the runtime-controlled diffusion rate
    TemperatureDiffusion,
    BoundaryRelaxation,
}

/// Fixed execution order of [`Stage`]s within one step
pub const STEP_ORDER: [Stage; 10] = [
    Stage::Damping,
    Stage::HeatInjection,
    Stage::Buoyancy,
    Stage::Circulation,
    Stage::VelocityAdvection,
    Stage::VelocityDiffusion,
    Stage::VelocityClamp,
    Stage::TemperatureAdvection,
    Stage::TemperatureDiffusion,
    Stage::BoundaryRelaxation,
];

/// Everything a step reads besides the fields themselves
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub config: &'a SimulationConfig,
    pub controls: ControlParams,
    pub heat_source: &'a HeatSource,
    pub circulation: &'a CirculationField,
}

/// Run a single stage against `fields`
pub fn apply_stage(stage: Stage, fields: &mut FieldStore, ctx: &StepContext<'_>) {
    let cfg = ctx.config;
    match stage {
        Stage::Damping => apply_damping(fields, cfg.damping),
        Stage::HeatInjection => {
            inject_heat(fields, ctx.heat_source, ctx.controls.heat_power, cfg.max_temp);
        }
        Stage::Buoyancy => apply_buoyancy(fields, cfg.ambient_temp, &cfg.buoyancy),
        Stage::Circulation => apply_circulation(fields, cfg.ambient_temp, ctx.circulation),
        Stage::VelocityAdvection => advect_velocity(fields, cfg.dt),
        Stage::VelocityDiffusion => {
            diffuse(
                &mut fields.velocity_x,
                &mut fields.velocity_x_scratch,
                cfg.velocity_diffusion,
            );
            diffuse(
                &mut fields.velocity_y,
                &mut fields.velocity_y_scratch,
                cfg.velocity_diffusion,
            );
        }
        Stage::VelocityClamp => clamp_velocities(fields, cfg.max_speed),
        Stage::TemperatureAdvection => advect_temperature(fields, cfg.dt),
        Stage::TemperatureDiffusion => diffuse(
            &mut fields.temperature,
            &mut fields.temperature_scratch,
            ctx.controls.diffusion_rate,
        ),
        Stage::BoundaryRelaxation => {
            relax_boundaries(fields, cfg.ambient_temp, cfg.boundary_blend);
        }
    }
}

/// Advance `fields` by one step
pub fn advance(fields: &mut FieldStore, ctx: &StepContext<'_>) {
    for stage in STEP_ORDER {
        apply_stage(stage, fields, ctx);
    }
}
