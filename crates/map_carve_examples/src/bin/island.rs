//! Generates an island with the base terrain stage and prints land, deep
//! water, and enclosed lakes.
use anyhow::Result;
use map_carve::prelude::*;

fn main() -> Result<()> {
    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(7);

    let mut ctx = MapContext::new(Domain::new(72, 36)?);
    let inputs = RunInputs::new(seed).with_tunables(
        Tunables::default()
            .with_noise_amplitude(0.6)
            .with_land_threshold(0.35),
    );
    let stages: Vec<Box<dyn MapStage>> = vec![Box::new(BaseTerrainStage)];
    run_stages(&mut ctx, &inputs, &stages, true)?;

    let land = ctx.layer(LayerId::Land)?;
    let deep = ctx.layer(LayerId::DeepWater)?;
    let domain = land.domain();
    for y in 0..domain.height() as i32 {
        let mut row = String::with_capacity(domain.width() as usize);
        for x in 0..domain.width() as i32 {
            row.push(match (land.get(x, y)?, deep.get(x, y)?) {
                (true, _) => '#',
                (false, true) => '~',
                // Not land, not border-connected: an enclosed lake.
                (false, false) => 'o',
            });
        }
        println!("{row}");
    }

    println!();
    println!("seed:           {seed}");
    println!("land hash:      {:#018x}", land.snapshot_hash64(true));
    println!("deep water hash: {:#018x}", deep.snapshot_hash64(true));
    println!(
        "height hash:    {:#018x}",
        ctx.field(FieldId::Height)?.snapshot_hash64(true)
    );
    Ok(())
}
