use bottleneck::Category;
use structopt::StructOpt;

use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Catalog {
    #[structopt(subcommand)]
    query: Query,
}

run_impl_struct!(Catalog, query);

#[derive(StructOpt)]
enum Query {
    /// Every record of a category, in catalog order
    List { category: Category },
    /// One record by exact model name, ignoring case (null if absent)
    Get { category: Category, model: String },
    /// Records whose model name contains the text, ignoring case
    Search {
        category: Category,
        text: Option<String>,
    },
    /// Row and table counts from loading
    Report,
}

run_impl_enum!(Query, self, ctx, ser, {
    let catalog = ctx.catalog().await?;
    match self {
        Self::List { category } => {
            erased_serde::serialize(catalog.list(*category), ser)?;
        }
        Self::Get { category, model } => {
            erased_serde::serialize(&catalog.get(*category, model), ser)?;
        }
        Self::Search { category, text } => {
            erased_serde::serialize(
                &catalog.search(*category, text.as_deref().unwrap_or("")),
                ser,
            )?;
        }
        Self::Report => {
            erased_serde::serialize(&catalog.report(), ser)?;
        }
    }
});
