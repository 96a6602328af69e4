use bottleneck::{analyze_models, BuildQuery};
use structopt::StructOpt;

use crate::run_impl_enum;

#[derive(StructOpt)]
pub struct Analyze {
    /// CPU model name
    #[structopt(long)]
    cpu: Option<String>,
    /// GPU model name
    #[structopt(long)]
    gpu: Option<String>,
    /// RAM model name; ignored if not in the catalog
    #[structopt(long)]
    ram: Option<String>,
}

run_impl_enum!(Analyze, self, ctx, ser, {
    let query = BuildQuery {
        cpu: self.cpu.clone(),
        gpu: self.gpu.clone(),
        ram: self.ram.clone(),
    };
    let verdict = analyze_models(ctx.catalog().await?, &query)?;
    erased_serde::serialize(&verdict, ser)?;
});
