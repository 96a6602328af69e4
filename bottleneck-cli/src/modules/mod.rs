pub mod analyze;
pub mod assess;
pub mod catalog;
pub mod options;
