//! Multi-layer map pipeline: a run context holding named layers and fields,
//! a stage contract, and a deterministic sequential runner.
//!
//! Layers and fields are addressed by closed enumerations backed by
//! fixed-size arrays, never hash maps, so allocation and iteration order are
//! deterministic. Adding a layer means adding a variant.
pub mod context;
pub mod dungeon;
pub mod runner;
pub mod terrain;

pub use context::{MapContext, RunInputs, Tunables};
pub use dungeon::{DungeonLayout, DungeonStage};
pub use runner::{run_stages, MapStage};
pub use terrain::BaseTerrainStage;

/// Stable identifiers for the mask layers of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerId {
    /// Walkable dungeon floor.
    Floor,
    /// Terrain above the water line.
    Land,
    /// Border-connected water.
    DeepWater,
}

impl LayerId {
    pub const ALL: [LayerId; 3] = [LayerId::Floor, LayerId::Land, LayerId::DeepWater];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerId::Floor => "floor",
            LayerId::Land => "land",
            LayerId::DeepWater => "deep_water",
        }
    }
}

/// Stable identifiers for the scalar fields of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Terrain height.
    Height,
}

impl FieldId {
    pub const ALL: [FieldId; 1] = [FieldId::Height];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldId::Height => "height",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_declaration_order() {
        for (i, id) in LayerId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        for (i, id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = LayerId::ALL.iter().map(|l| l.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LayerId::COUNT);
    }
}
