pub mod advisor;
pub mod assessment;
pub mod catalog;
pub mod engine;
pub mod options;
pub mod source;
