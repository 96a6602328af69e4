use bottleneck::Settings;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::debug;

use crate::{
    modules::{analyze::Analyze, assess::Assess, catalog::Catalog, options::Options},
    run_impl_enum,
};

#[derive(StructOpt)]
#[structopt(name = "bottleneck")]
pub struct Opt {
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// TOML settings file
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog CSV files, with option lists under `options/`
    #[structopt(long, env = "BOTTLENECK_DATA_DIR", parse(from_os_str))]
    pub data_dir: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Command,
}

impl Opt {
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings = match &self.config {
            Some(path) => {
                debug!(path = %path.display(), "reading settings file");
                Settings::load(path)?
            }
            None => Settings::default(),
        };
        let settings = match &self.data_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "data directory overrides settings");
                settings.with_data_dir(dir.clone())
            }
            None => settings,
        };
        debug!(?settings, "settings resolved");
        Ok(settings)
    }
}

#[derive(StructOpt)]
pub enum Command {
    /// Benchmark records of CPUs, GPUs and RAM
    Catalog(Catalog),
    /// Name-only option lists
    Options(Options),
    /// Find the part that limits a build
    Analyze(Analyze),
    /// Build or check a free-form assessment
    Assess(Assess),
}

run_impl_enum!(Command, self, ctx, ser, {
    match self {
        Self::Catalog(c) => c.run(ctx, ser).await?,
        Self::Options(o) => o.run(ctx, ser).await?,
        Self::Analyze(a) => a.run(ctx, ser).await?,
        Self::Assess(a) => a.run(ctx, ser).await?,
    }
});
