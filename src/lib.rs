pub mod analysis;
pub mod config;
pub mod data;
pub mod output;
pub mod report;
pub mod swings;
pub mod trend;

#[cfg(test)]
pub(crate) mod fixtures;
