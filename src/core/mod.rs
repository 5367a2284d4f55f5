pub mod entropy;
pub mod example;
pub mod registry;
pub mod runner;
pub mod transcript;

pub use crate::domain::model::{Category, RunResult, RunStatus, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Example, Reporter};
pub use crate::utils::error::Result;
