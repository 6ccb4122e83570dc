//! Field storage for the simulation grid
//!
//! Every field is a flat `Vec<f32>` in row-major order addressed by `y * width + x`.
//! Each live field has a same-sized scratch buffer that the diffusion and advection passes
//! read from, so a pass never reads values it has already overwritten.

use rand::Rng;

/// Scalar field on a fixed-size grid
///
/// Stores 2D field data as a flat `Vec<f32>` in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<f32>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl FieldData {
    /// Create a new field with given dimensions, initialized to zero
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new field with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Flat index of cell `(x, y)`
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// Coordinates must be in range; stage loops are constrained to valid cells,
    /// so only debug builds check.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        debug_assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[self.index(x, y)]
    }

    /// Set value at grid position
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        debug_assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Overwrite this field wholesale with the contents of `source`
    ///
    /// Both fields must have the same dimensions.
    pub fn copy_from(&mut self, source: &FieldData) {
        self.data.copy_from_slice(&source.data);
    }
}

/// All simulation fields plus their scratch buffers
///
/// Allocated once at startup and never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStore {
    pub temperature: FieldData,
    pub temperature_scratch: FieldData,
    pub velocity_x: FieldData,
    pub velocity_x_scratch: FieldData,
    pub velocity_y: FieldData,
    pub velocity_y_scratch: FieldData,
    width: usize,
    height: usize,
}

impl FieldStore {
    /// Allocate a store with uniform temperature and fluid at rest
    #[must_use]
    pub fn new(width: usize, height: usize, temperature: f32) -> Self {
        Self {
            temperature: FieldData::with_value(width, height, temperature),
            temperature_scratch: FieldData::new(width, height),
            velocity_x: FieldData::new(width, height),
            velocity_x_scratch: FieldData::new(width, height),
            velocity_y: FieldData::new(width, height),
            velocity_y_scratch: FieldData::new(width, height),
            width,
            height,
        }
    }

    /// Allocate a store at `ambient` plus per-cell jitter drawn from `rng`
    ///
    /// Each cell gets `ambient + (u - 0.5) * jitter` with `u` uniform in `[0, 1)`, which
    /// breaks the left/right symmetry the forcing stages would otherwise preserve.
    pub fn seeded<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        ambient: f32,
        jitter: f32,
        rng: &mut R,
    ) -> Self {
        let mut store = Self::new(width, height, ambient);
        for temp in store.temperature.as_mut_slice() {
            *temp = ambient + (rng.random::<f32>() - 0.5) * jitter;
        }
        store
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in every field
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Copy both velocity components into their scratch buffers
    pub fn snapshot_velocity(&mut self) {
        self.velocity_x_scratch.copy_from(&self.velocity_x);
        self.velocity_y_scratch.copy_from(&self.velocity_y);
    }

    /// Copy temperature into its scratch buffer
    pub fn snapshot_temperature(&mut self) {
        self.temperature_scratch.copy_from(&self.temperature);
    }
}
