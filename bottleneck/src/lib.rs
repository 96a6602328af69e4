//! Decide which part of a PC build (CPU, GPU or RAM) holds the others back.
//!
//! A [`Catalog`] of benchmark scores is loaded once from CSV tables, parts are looked up by
//! model name, and [`analyze`] compares their scores.

pub(crate) mod common;
pub mod config;
pub mod error;
pub mod modules;
pub mod schemas;

pub use config::Settings;
pub use error::{AnalyzeError, LoadError, NotFound, ParseError};
pub use modules::{
    advisor::{analyze_models, BuildQuery},
    catalog::{Catalog, LoadReport, LoadState},
    engine::{analyze, try_analyze},
    options::OptionLists,
    source::{CsvDirectory, CsvFile, TableSource, TextTables},
};
pub use schemas::{
    component::{Category, ComponentRecord},
    options::Axis,
    verdict::{Bottleneck, BottleneckVerdict},
};
