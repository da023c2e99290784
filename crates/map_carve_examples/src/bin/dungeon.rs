//! Carves a rooms-and-corridors dungeon, prints it as ASCII, and reports
//! the layer hash a consumer would pin as a golden value.
use anyhow::Result;
use map_carve::prelude::*;

fn main() -> Result<()> {
    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(1);

    let mut ctx = MapContext::new(Domain::new(64, 32)?);
    let stages: Vec<Box<dyn MapStage>> = vec![Box::new(DungeonStage::new(
        DungeonLayout::RoomsAndCorridors(RoomsConfig::new(10, 4, 9).with_padding(2)),
    ))];
    run_stages(&mut ctx, &RunInputs::new(seed), &stages, true)?;

    let floor = ctx.layer(LayerId::Floor)?;
    let domain = floor.domain();
    for y in 0..domain.height() as i32 {
        let mut row = String::with_capacity(domain.width() as usize);
        for x in 0..domain.width() as i32 {
            row.push(if floor.get(x, y)? { '.' } else { '#' });
        }
        println!("{row}");
    }

    println!();
    println!("seed:       {seed}");
    println!("floor cells: {}", floor.count_ones());
    println!("floor hash:  {:#018x}", floor.snapshot_hash64(true));
    Ok(())
}
