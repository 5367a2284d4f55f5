use crate::config::toml_config::{OutputFormat, RunnerOverrides};
use crate::domain::model::Category;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_positive_number, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gof-catalog")]
#[command(about = "Run and regression-test the design pattern catalog")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Write logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List registered examples
    List {
        #[arg(long)]
        category: Option<Category>,
    },

    /// Run one example and print its transcript
    Run {
        id: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run every registered example
    RunAll {
        #[arg(long)]
        category: Option<Category>,

        #[arg(long, help = "Examples to run at once")]
        jobs: Option<usize>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run examples and write their output as a fixture file
    Record {
        #[arg(short, long)]
        output: String,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    #[arg(long, help = "Seed for the injected entropy source")]
    pub seed: Option<u64>,

    #[arg(long, help = "Fixture file with expected output")]
    pub fixtures: Option<String>,

    #[arg(long = "timeout-ms", help = "Per-example time budget in milliseconds")]
    pub timeout_ms: Option<u64>,
}

impl CliConfig {
    pub fn overrides(&self) -> RunnerOverrides {
        match &self.command {
            Command::List { .. } => RunnerOverrides::default(),
            Command::Run { run, .. } => RunnerOverrides {
                seed: run.seed,
                jobs: None,
                timeout_ms: run.timeout_ms,
                fixtures: run.fixtures.clone(),
                format: None,
            },
            Command::RunAll {
                jobs, format, run, ..
            } => RunnerOverrides {
                seed: run.seed,
                jobs: *jobs,
                timeout_ms: run.timeout_ms,
                fixtures: run.fixtures.clone(),
                format: *format,
            },
            Command::Record { seed, .. } => RunnerOverrides {
                seed: *seed,
                ..Default::default()
            },
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }

        match &self.command {
            Command::List { .. } => {}
            Command::Run { id, .. } => validate_non_empty_string("id", id)?,
            Command::RunAll { jobs, .. } => {
                if let Some(jobs) = jobs {
                    validate_positive_number("jobs", *jobs, 1)?;
                }
            }
            Command::Record { output, .. } => validate_path("output", output)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_all() {
        let cli = CliConfig::try_parse_from([
            "gof-catalog",
            "run-all",
            "--category",
            "structural",
            "--jobs",
            "4",
            "--seed",
            "7",
            "--format",
            "json",
        ])
        .unwrap();

        match &cli.command {
            Command::RunAll { category, .. } => assert_eq!(*category, Some(Category::Structural)),
            other => panic!("unexpected command: {other:?}"),
        }
        let overrides = cli.overrides();
        assert_eq!(overrides.seed, Some(7));
        assert_eq!(overrides.jobs, Some(4));
        assert_eq!(overrides.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_run_with_global_flags() {
        let cli = CliConfig::try_parse_from([
            "gof-catalog",
            "run",
            "strategy/structural",
            "--timeout-ms",
            "100",
            "-v",
            "--config",
            "catalog.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("catalog.toml"));
        match &cli.command {
            Command::Run { id, run } => {
                assert_eq!(id, "strategy/structural");
                assert_eq!(run.timeout_ms, Some(100));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let cli = CliConfig::try_parse_from(["gof-catalog", "run-all", "--jobs", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = CliConfig::try_parse_from(["gof-catalog", "record", "--output", "out.toml"]).unwrap();
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(CliConfig::try_parse_from(["gof-catalog", "list", "--category", "gui"]).is_err());
    }
}
