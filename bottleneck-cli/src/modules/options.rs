use bottleneck::Axis;
use structopt::StructOpt;

use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Options {
    #[structopt(subcommand)]
    query: Query,
}

run_impl_struct!(Options, query);

#[derive(StructOpt)]
enum Query {
    /// The first names of one axis, or of every axis that loaded
    List { axis: Option<Axis> },
    /// Names of an axis containing the text, ignoring case
    Search { axis: Axis, text: String },
}

run_impl_enum!(Query, self, ctx, ser, {
    let options = ctx.options().await;
    match self {
        Self::List { axis: Some(axis) } => {
            if let Some(e) = options.failure(*axis) {
                anyhow::bail!("{} options are unavailable: {}", axis, e);
            }
            erased_serde::serialize(options.capped(*axis), ser)?;
        }
        Self::List { axis: None } => {
            erased_serde::serialize(&options.capped_all(), ser)?;
        }
        Self::Search { axis, text } => {
            erased_serde::serialize(&options.search(*axis, text), ser)?;
        }
    }
});
