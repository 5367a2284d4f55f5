#[cfg(feature = "cli")]
pub mod cli;
pub mod fixtures;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, RunArgs};
pub use fixtures::FixtureSet;
pub use toml_config::{CatalogConfig, OutputFormat, RunnerOverrides};
