//! Simulation state object
//!
//! [`ConvectionSimulation`] owns every field, the fixed configuration and the two control
//! values. A driver creates one, calls [`advance`](ConvectionSimulation::advance) once per
//! display refresh, then [`render`](ConvectionSimulation::render) into its pixel buffer.
//! Control setters may be called at any time between steps; new values take effect at the
//! start of the next step.

use crate::config::{
    diffusion_rate_from_slider, heat_power_from_slider, ControlParams, SimulationConfig,
};
use crate::error::SimError;
use crate::render::{render_rgba, BYTES_PER_PIXEL};
use crate::solver::{self, CirculationField, FieldData, FieldStore, HeatSource, StepContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

/// Smallest grid edge that still has an interior cell
pub const MIN_GRID_DIMENSION: usize = 3;

/// Summary of the current field state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationStats {
    /// Steps executed since creation
    pub step_count: u64,
    pub mean_temperature: f32,
    pub peak_temperature: f32,
    /// Largest absolute velocity component anywhere on the grid
    pub peak_speed: f32,
}

/// Heat-driven convection on a fixed grid
#[derive(Debug, Clone)]
pub struct ConvectionSimulation {
    fields: FieldStore,
    config: SimulationConfig,
    controls: ControlParams,
    heat_source: HeatSource,
    circulation: CirculationField,
    step_count: u64,
}

impl ConvectionSimulation {
    /// Create a simulation with default constants and the given ambient temperature
    ///
    /// # Errors
    ///
    /// See [`with_config`](Self::with_config).
    pub fn new(
        width: usize,
        height: usize,
        ambient_temp: f32,
        seed: u64,
    ) -> Result<Self, SimError> {
        let config = SimulationConfig {
            ambient_temp,
            ..SimulationConfig::default()
        };
        Self::with_config(width, height, config, seed)
    }

    /// Create a simulation from an explicit configuration
    ///
    /// Temperatures start at ambient plus jitter drawn from a generator seeded with `seed`,
    /// so identical arguments give bit-identical runs.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidDimensions`] if either dimension is below
    ///   [`MIN_GRID_DIMENSION`] or the pixel buffer size would overflow `usize`
    /// - [`SimError::InvalidConfig`] if `config` fails [`SimulationConfig::validate`]
    pub fn with_config(
        width: usize,
        height: usize,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<Self, SimError> {
        let fits = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .is_some();
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION || !fits {
            return Err(SimError::InvalidDimensions { width, height });
        }
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let fields = FieldStore::seeded(
            width,
            height,
            config.ambient_temp,
            config.initial_jitter,
            &mut rng,
        );
        let heat_source = HeatSource::resolve(&config.heat_source, width, height);
        let circulation = CirculationField::resolve(&config.circulation, width, height);

        info!(
            "Convection simulation initialized: {}x{} grid, ambient={:.3}, seed={}",
            width, height, config.ambient_temp, seed
        );
        debug!(
            "Heat source at ({:.1}, {:.1}) radius {:.1}; circulation pivot ({:.1}, {:.1})",
            heat_source.center.x,
            heat_source.center.y,
            heat_source.radius,
            circulation.pivot.x,
            circulation.pivot.y
        );

        Ok(Self {
            fields,
            config,
            controls: ControlParams::default(),
            heat_source,
            circulation,
            step_count: 0,
        })
    }

    /// Advance the simulation by one step
    pub fn advance(&mut self) {
        let ctx = StepContext {
            config: &self.config,
            controls: self.controls,
            heat_source: &self.heat_source,
            circulation: &self.circulation,
        };
        solver::advance(&mut self.fields, &ctx);
        self.step_count += 1;
        trace!(step = self.step_count, "advanced simulation");
    }

    /// Write the colorized temperature field into `buffer` as row-major RGBA
    ///
    /// # Errors
    ///
    /// Returns [`SimError::SizeMismatch`] unless `buffer.len()` equals
    /// [`pixel_buffer_len`](Self::pixel_buffer_len).
    pub fn render(&self, buffer: &mut [u8]) -> Result<(), SimError> {
        render_rgba(
            &self.config.palette,
            self.fields.temperature.as_slice(),
            self.config.ambient_temp,
            self.config.max_temp,
            buffer,
        )
    }

    /// Set heat power from a `[0, 100]` slider position (clamped)
    pub fn set_heat_power(&mut self, slider: f32) {
        self.controls.heat_power = heat_power_from_slider(slider);
        debug!(
            "Heat power set to {:.4} (slider {})",
            self.controls.heat_power, slider
        );
    }

    /// Set temperature diffusion rate from a `[0, 100]` slider position (clamped)
    pub fn set_diffusion_rate(&mut self, slider: f32) {
        self.controls.diffusion_rate = diffusion_rate_from_slider(slider);
        debug!(
            "Diffusion rate set to {:.4} (slider {})",
            self.controls.diffusion_rate, slider
        );
    }

    /// Replace both control values with physical values, bypassing the slider mapping
    ///
    /// Values are clamped with [`ControlParams::sanitized`]; heat power never exceeds the
    /// span between ambient and maximum temperature.
    pub fn set_controls(&mut self, controls: ControlParams) {
        let heat_cap = self.config.max_temp - self.config.ambient_temp;
        self.controls = controls.sanitized(heat_cap);
        debug!("Controls set to {:?}", self.controls);
    }

    pub fn controls(&self) -> ControlParams {
        self.controls
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.fields.width()
    }

    pub fn height(&self) -> usize {
        self.fields.height()
    }

    /// Required length of the buffer passed to [`render`](Self::render)
    pub fn pixel_buffer_len(&self) -> usize {
        self.fields.cell_count() * BYTES_PER_PIXEL
    }

    pub fn temperature(&self) -> &FieldData {
        &self.fields.temperature
    }

    pub fn velocity_x(&self) -> &FieldData {
        &self.fields.velocity_x
    }

    pub fn velocity_y(&self) -> &FieldData {
        &self.fields.velocity_y
    }

    /// Full field store, including scratch buffers
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Mutable access for seeding custom initial conditions
    pub fn fields_mut(&mut self) -> &mut FieldStore {
        &mut self.fields
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Compute summary statistics over the whole grid
    pub fn stats(&self) -> SimulationStats {
        let temps = self.fields.temperature.as_slice();
        let sum: f64 = temps.iter().map(|&t| f64::from(t)).sum();
        let peak_temperature = temps.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let peak_speed = self
            .fields
            .velocity_x
            .as_slice()
            .iter()
            .chain(self.fields.velocity_y.as_slice())
            .fold(0.0_f32, |acc, v| acc.max(v.abs()));

        SimulationStats {
            step_count: self.step_count,
            mean_temperature: (sum / temps.len() as f64) as f32,
            peak_temperature,
            peak_speed,
        }
    }
}
