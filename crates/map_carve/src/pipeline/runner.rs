//! Stage contract and the deterministic sequential runner.
use tracing::info;

use crate::error::Result;
use crate::pipeline::context::{MapContext, RunInputs};

/// A unit of pipeline work that reads and writes named layers and fields.
///
/// Stages are executed strictly in array order; that order is the entire
/// scheduling contract, and no stage may assume any other.
pub trait MapStage {
    fn name(&self) -> &'static str;
    fn execute(&self, ctx: &mut MapContext, inputs: &RunInputs) -> Result<()>;
}

/// Runs a generation pass: `begin_run` on the context, then every stage in
/// array order.
pub fn run_stages(
    ctx: &mut MapContext,
    inputs: &RunInputs,
    stages: &[Box<dyn MapStage>],
    clear_layers: bool,
) -> Result<()> {
    ctx.begin_run(inputs, clear_layers);
    info!(
        seed = ctx.seed,
        domain = %ctx.domain,
        stages = stages.len(),
        "generation run started"
    );

    for (index, stage) in stages.iter().enumerate() {
        info!(index, stage = stage.name(), "executing stage");
        stage.execute(ctx, inputs)?;
    }

    Ok(())
}
