//! Stylesheet path resolution: reads each declared dependency's manifest,
//! applies skip and override rules, orders the results and flattens them
//! into a list of paths.

pub mod entry;
pub mod resolver;

pub use resolver::{flatten, resolve, resolve_entries};
