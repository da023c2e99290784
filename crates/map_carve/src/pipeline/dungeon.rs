//! Dungeon stage: carves the `Floor` layer with a configured layout
//! strategy.
use tracing::debug;

use crate::error::Result;
use crate::layout::bsp::{bsp_rooms, BspRoomsConfig};
use crate::layout::corridor_first::{corridor_first, CorridorFirstConfig};
use crate::layout::room_grid::{room_grid, RoomGridConfig};
use crate::layout::rooms::{rooms_and_corridors, RoomsConfig, RoomsOutcome};
use crate::pipeline::context::{MapContext, RunInputs};
use crate::pipeline::runner::MapStage;
use crate::pipeline::LayerId;

/// Which layout strategy the stage runs on the `Floor` layer.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub enum DungeonLayout {
    RoomsAndCorridors(RoomsConfig),
    CorridorFirst(CorridorFirstConfig),
    BspRooms(BspRoomsConfig),
    RoomGrid(RoomGridConfig),
}

/// Carves the `Floor` layer with the configured strategy, borrowing the
/// context RNG so the stage composes with whatever ran before it.
#[derive(Clone, Copy, Debug)]
pub struct DungeonStage {
    pub layout: DungeonLayout,
}

impl DungeonStage {
    pub fn new(layout: DungeonLayout) -> Self {
        Self { layout }
    }
}

impl MapStage for DungeonStage {
    fn name(&self) -> &'static str {
        "dungeon"
    }

    fn execute(&self, ctx: &mut MapContext, _inputs: &RunInputs) -> Result<()> {
        ctx.ensure_layer(LayerId::Floor, true);
        let mut floor = ctx.take_layer(LayerId::Floor)?;

        let result: Result<RoomsOutcome> = match &self.layout {
            DungeonLayout::RoomsAndCorridors(config) => {
                rooms_and_corridors(&mut floor, &mut ctx.rng, config)
            }
            DungeonLayout::CorridorFirst(config) => {
                corridor_first(&mut floor, &mut ctx.rng, config)
            }
            DungeonLayout::BspRooms(config) => bsp_rooms(&mut floor, &mut ctx.rng, config),
            DungeonLayout::RoomGrid(config) => room_grid(&mut floor, &mut ctx.rng, config),
        };

        ctx.put_layer(LayerId::Floor, floor);
        let outcome = result?;
        debug!(rooms = outcome.rooms_placed, "dungeon stage finished");
        Ok(())
    }
}
