use bottleneck::modules::assessment::{Assessment, AssessmentRequest};
use structopt::StructOpt;
use tokio::io::AsyncReadExt;

use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Assess {
    #[structopt(subcommand)]
    step: Step,
}

run_impl_struct!(Assess, step);

#[derive(StructOpt)]
enum Step {
    /// Print the instruction text for a language model
    Prompt {
        /// What the PC is for, e.g. gaming
        #[structopt(long)]
        purpose: Option<String>,
        #[structopt(long)]
        cpu: Option<String>,
        #[structopt(long)]
        gpu: Option<String>,
        #[structopt(long)]
        ram: Option<String>,
        #[structopt(long)]
        storage: Option<String>,
        #[structopt(long)]
        resolution: Option<String>,
    },
    /// Validate a model's reply read from stdin
    Parse,
}

run_impl_enum!(Step, self, _ctx, ser, {
    match self {
        Self::Prompt {
            purpose,
            cpu,
            gpu,
            ram,
            storage,
            resolution,
        } => {
            let request = AssessmentRequest {
                purpose: purpose.clone(),
                cpu: cpu.clone(),
                gpu: gpu.clone(),
                ram: ram.clone(),
                storage: storage.clone(),
                resolution: resolution.clone(),
            };
            erased_serde::serialize(&request.prompt(), ser)?;
        }
        Self::Parse => {
            let mut reply = String::new();
            tokio::io::stdin().read_to_string(&mut reply).await?;
            erased_serde::serialize(&Assessment::parse(&reply)?, ser)?;
        }
    }
});
