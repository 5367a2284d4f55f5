pub mod report;

pub use report::{JsonReporter, TextReporter};
