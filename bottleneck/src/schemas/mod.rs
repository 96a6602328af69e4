pub mod component;
pub mod options;
pub mod verdict;
