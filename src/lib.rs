pub mod app;
pub mod catalog;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use catalog::build_registry;
pub use config::{CatalogConfig, FixtureSet};
pub use core::{
    entropy::Entropy,
    example::ExampleDef,
    registry::Registry,
    runner::{CancelToken, RunOptions, Runner},
    transcript::Transcript,
};
pub use domain::model::{Category, RunResult, RunStatus, RunSummary};
pub use domain::ports::{Example, Reporter};
pub use utils::error::{CatalogError, Result};
