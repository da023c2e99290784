//! Reference terrain stage: height field from radial falloff plus coarse
//! value noise, thresholded into land, classified into deep water.
//!
//! This stage is the canonical "field -> mask -> classify" idiom other
//! stages should follow.
use glam::Vec2;
use tracing::debug;

use crate::error::Result;
use crate::pipeline::context::{MapContext, RunInputs};
use crate::pipeline::runner::MapStage;
use crate::pipeline::{FieldId, LayerId};
use crate::raster::flood::flood_fill_border_connected_not_solid;
use crate::raster::rasterize::{threshold, ThresholdMode};

/// Derives `Height`, `Land`, and `DeepWater` from the run seed and tunables.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseTerrainStage;

impl MapStage for BaseTerrainStage {
    fn name(&self) -> &'static str {
        "base_terrain"
    }

    fn execute(&self, ctx: &mut MapContext, _inputs: &RunInputs) -> Result<()> {
        let domain = ctx.domain;
        let tunables = ctx.tunables;

        ctx.ensure_field(FieldId::Height, true);
        ctx.ensure_layer(LayerId::Land, true);
        ctx.ensure_layer(LayerId::DeepWater, true);

        // Value-noise lattice, filled row-major with exactly one draw per
        // lattice point so the draw stream is a pure function of the domain
        // and cell size.
        let cell = tunables.noise_cell_size;
        let lattice_w = (domain.width() as f32 / cell).ceil() as usize + 1;
        let lattice_h = (domain.height() as f32 / cell).ceil() as usize + 1;
        let mut lattice = vec![0.0f32; lattice_w * lattice_h];
        for value in lattice.iter_mut() {
            *value = ctx.rng.next_f32();
        }

        let mut height = ctx.take_field(FieldId::Height)?;
        let center = Vec2::new(domain.width() as f32 * 0.5, domain.height() as f32 * 0.5);
        let falloff_radius = 0.5 * domain.width().min(domain.height()) as f32;

        for y in 0..domain.height() as i32 {
            for x in 0..domain.width() as i32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let gx = p.x / cell;
                let gy = p.y / cell;
                let ix = gx.floor() as usize;
                let iy = gy.floor() as usize;
                let fx = gx - ix as f32;
                let fy = gy - iy as f32;
                let n00 = lattice[iy * lattice_w + ix];
                let n10 = lattice[iy * lattice_w + ix + 1];
                let n01 = lattice[(iy + 1) * lattice_w + ix];
                let n11 = lattice[(iy + 1) * lattice_w + ix + 1];
                let noise = n00 * (1.0 - fx) * (1.0 - fy)
                    + n10 * fx * (1.0 - fy)
                    + n01 * (1.0 - fx) * fy
                    + n11 * fx * fy;

                let d = p.distance(center) / falloff_radius;
                let value = (1.0 - d * d) * tunables.falloff_strength
                    + (noise - 0.5) * tunables.noise_amplitude;
                height.set_unchecked(x, y, value);
            }
        }

        let mut land = ctx.take_layer(LayerId::Land)?;
        threshold(
            &height,
            &mut land,
            tunables.land_threshold,
            ThresholdMode::GreaterEqual,
        )?;

        let mut deep_water = ctx.take_layer(LayerId::DeepWater)?;
        flood_fill_border_connected_not_solid(&land, &mut deep_water)?;

        debug!(
            land = land.count_ones(),
            deep_water = deep_water.count_ones(),
            "base terrain classified"
        );

        ctx.put_field(FieldId::Height, height);
        ctx.put_layer(LayerId::Land, land);
        ctx.put_layer(LayerId::DeepWater, deep_water);
        Ok(())
    }
}
