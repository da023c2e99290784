//! The per-run map context: seed, tunables, RNG, and lazily allocated
//! layers and fields.
use crate::error::{Error, Result};
use crate::grid::{Domain, MaskGrid, ScalarField};
use crate::pipeline::{FieldId, LayerId};
use crate::rng::{sanitize_seed, GenRng};

/// Clamped float parameters shared by stages.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct Tunables {
    /// Strength of the radial island falloff.
    pub falloff_strength: f32,
    /// Amplitude of the value noise added to the height field.
    pub noise_amplitude: f32,
    /// Height at or above which a cell is land.
    pub land_threshold: f32,
    /// Edge of one value-noise lattice cell, in grid cells.
    pub noise_cell_size: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            falloff_strength: 1.0,
            noise_amplitude: 0.35,
            land_threshold: 0.4,
            noise_cell_size: 8.0,
        }
    }
}

impl Tunables {
    pub fn with_falloff_strength(mut self, value: f32) -> Self {
        self.falloff_strength = value;
        self
    }

    pub fn with_noise_amplitude(mut self, value: f32) -> Self {
        self.noise_amplitude = value;
        self
    }

    pub fn with_land_threshold(mut self, value: f32) -> Self {
        self.land_threshold = value;
        self
    }

    pub fn with_noise_cell_size(mut self, value: f32) -> Self {
        self.noise_cell_size = value;
        self
    }

    /// Returns a copy with every parameter forced into its legal range.
    pub fn clamped(&self) -> Self {
        Self {
            falloff_strength: self.falloff_strength.clamp(0.0, 8.0),
            noise_amplitude: self.noise_amplitude.clamp(0.0, 4.0),
            land_threshold: self.land_threshold.clamp(-4.0, 4.0),
            noise_cell_size: self.noise_cell_size.clamp(1.0, 64.0),
        }
    }
}

/// Inputs of one generation run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct RunInputs {
    /// Run seed; `0` is sanitized to `1` by `begin_run`.
    pub seed: u64,
    pub tunables: Tunables,
}

impl RunInputs {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tunables: Tunables::default(),
        }
    }

    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }
}

/// Registry-backed run context: owns the RNG and every named layer/field.
///
/// Fields are public so stages can split borrows (for example the RNG and a
/// taken-out layer at the same time); the accessor methods are the intended
/// read path.
pub struct MapContext {
    pub domain: Domain,
    /// Sanitized seed of the current run.
    pub seed: u64,
    pub tunables: Tunables,
    pub rng: GenRng,
    pub layers: [Option<MaskGrid>; LayerId::COUNT],
    pub fields: [Option<ScalarField>; FieldId::COUNT],
}

impl MapContext {
    /// Creates a context with no layers or fields allocated.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            seed: 1,
            tunables: Tunables::default(),
            rng: GenRng::new(1),
            layers: [const { None }; LayerId::COUNT],
            fields: [const { None }; FieldId::COUNT],
        }
    }

    /// Starts a run: sanitizes the seed, stores clamped tunables, reseeds
    /// the RNG, and optionally clears every already-created layer and field.
    pub fn begin_run(&mut self, inputs: &RunInputs, clear_layers: bool) {
        self.seed = sanitize_seed(inputs.seed);
        self.tunables = inputs.tunables.clamped();
        self.rng = GenRng::new(self.seed);
        if clear_layers {
            for layer in self.layers.iter_mut().flatten() {
                layer.clear();
            }
            for field in self.fields.iter_mut().flatten() {
                field.fill(0.0);
            }
        }
    }

    /// Lazily allocates a layer. A newly created layer is always zeroed;
    /// `clear_existing` only controls whether a pre-existing layer is
    /// cleared by this call.
    pub fn ensure_layer(&mut self, id: LayerId, clear_existing: bool) -> &mut MaskGrid {
        let slot = &mut self.layers[id.index()];
        match slot {
            Some(layer) => {
                if clear_existing {
                    layer.clear();
                }
            }
            None => *slot = Some(MaskGrid::new(self.domain)),
        }
        slot.as_mut().expect("slot populated above")
    }

    /// Lazily allocates a field; same clearing contract as `ensure_layer`.
    pub fn ensure_field(&mut self, id: FieldId, clear_existing: bool) -> &mut ScalarField {
        let slot = &mut self.fields[id.index()];
        match slot {
            Some(field) => {
                if clear_existing {
                    field.fill(0.0);
                }
            }
            None => *slot = Some(ScalarField::new(self.domain)),
        }
        slot.as_mut().expect("slot populated above")
    }

    pub fn layer(&self, id: LayerId) -> Result<&MaskGrid> {
        self.layers[id.index()]
            .as_ref()
            .ok_or(Error::NotCreated(id.name()))
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Result<&mut MaskGrid> {
        self.layers[id.index()]
            .as_mut()
            .ok_or(Error::NotCreated(id.name()))
    }

    pub fn field(&self, id: FieldId) -> Result<&ScalarField> {
        self.fields[id.index()]
            .as_ref()
            .ok_or(Error::NotCreated(id.name()))
    }

    pub fn field_mut(&mut self, id: FieldId) -> Result<&mut ScalarField> {
        self.fields[id.index()]
            .as_mut()
            .ok_or(Error::NotCreated(id.name()))
    }

    /// Moves a layer out of the context so it can be mutated alongside other
    /// context state; pair with [`MapContext::put_layer`].
    pub fn take_layer(&mut self, id: LayerId) -> Result<MaskGrid> {
        self.layers[id.index()]
            .take()
            .ok_or(Error::NotCreated(id.name()))
    }

    pub fn put_layer(&mut self, id: LayerId, layer: MaskGrid) {
        self.layers[id.index()] = Some(layer);
    }

    /// Moves a field out of the context; pair with [`MapContext::put_field`].
    pub fn take_field(&mut self, id: FieldId) -> Result<ScalarField> {
        self.fields[id.index()]
            .take()
            .ok_or(Error::NotCreated(id.name()))
    }

    pub fn put_field(&mut self, id: FieldId, field: ScalarField) {
        self.fields[id.index()] = Some(field);
    }
}
