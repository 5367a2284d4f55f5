use clap::Parser;
use gof_catalog::app::{JsonReporter, TextReporter};
use gof_catalog::config::{Command, OutputFormat};
use gof_catalog::domain::ports::ConfigProvider;
use gof_catalog::utils::{logger, validation::Validate};
use gof_catalog::{
    build_registry, CancelToken, CatalogConfig, Category, CliConfig, FixtureSet, Registry,
    Reporter, RunOptions, RunStatus, RunSummary, Runner,
};
use std::io;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gof-catalog");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn execute(cli: CliConfig) -> gof_catalog::Result<i32> {
    // 驗證配置
    cli.validate()?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            CatalogConfig::from_file(path)?
        }
        None => CatalogConfig::default(),
    };
    config.apply_overrides(&cli.overrides());
    config.validate()?;

    let registry = build_registry()?;

    match cli.command {
        Command::List { category } => {
            list(&registry, category);
            Ok(0)
        }
        Command::Run { id, .. } => run_single(&registry, &config, &id).await,
        Command::RunAll { category, .. } => run_all(&registry, &config, category).await,
        Command::Record {
            output, category, ..
        } => record(&registry, &config, &output, category).await,
    }
}

fn list(registry: &Registry, category: Option<Category>) {
    for example in registry.list(category) {
        println!("{:<48} {:<11} {}", example.id(), example.category(), example.title());
    }
}

fn load_fixtures(config: &CatalogConfig) -> gof_catalog::Result<Option<FixtureSet>> {
    let Some(path) = config.fixtures_path() else {
        return Ok(None);
    };
    let fixtures = FixtureSet::from_file(path)?;
    tracing::info!("Loaded {} fixture(s) from {}", fixtures.len(), path);
    Ok(Some(fixtures))
}

async fn run_single(registry: &Registry, config: &CatalogConfig, id: &str) -> gof_catalog::Result<i32> {
    let options = RunOptions::from_provider(config, load_fixtures(config)?);
    let runner = Runner::with_options(registry, options);

    let result = runner.run_one(id, config.seed()).await?;

    let mut reporter = TextReporter::new(io::stdout().lock()).with_output(true);
    reporter.report(std::slice::from_ref(&result))?;
    Ok(result.status.exit_code())
}

fn spawn_interrupt_listener(token: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the running example(s)");
            token.cancel();
        }
    });
}

async fn run_all(
    registry: &Registry,
    config: &CatalogConfig,
    category: Option<Category>,
) -> gof_catalog::Result<i32> {
    let options = RunOptions::from_provider(config, load_fixtures(config)?);
    let token = CancelToken::new();
    spawn_interrupt_listener(token.clone());
    let runner = Runner::with_options(registry, options).with_cancel_token(token.clone());

    let seed = config.seed();
    let results = match category {
        Some(category) => runner.run_category(category, seed).await,
        None => runner.run_all(seed).await,
    };

    let mut reporter: Box<dyn Reporter> = match config.format() {
        OutputFormat::Text => Box::new(TextReporter::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonReporter::new(io::stdout())),
    };
    reporter.report(&results)?;

    Ok(RunSummary::from_results(&results).batch_exit_code(token.is_cancelled()))
}

async fn record(
    registry: &Registry,
    config: &CatalogConfig,
    output: &str,
    category: Option<Category>,
) -> gof_catalog::Result<i32> {
    // Recording never grades against existing fixtures.
    let options = RunOptions::from_provider(config, None);
    let runner = Runner::with_options(registry, options);

    let seed = config.seed();
    let results = match category {
        Some(category) => runner.run_category(category, seed).await,
        None => runner.run_all(seed).await,
    };

    let fixtures = FixtureSet::from_results(&results);
    fixtures.save(output)?;

    let skipped: Vec<_> = results
        .iter()
        .filter(|r| r.status == RunStatus::Errored)
        .collect();
    for result in &skipped {
        let detail = result.error_detail.as_deref().unwrap_or("unknown error");
        tracing::warn!("Skipped {}: {}", result.example_id, detail);
        eprintln!("⚠️  skipped {}: {}", result.example_id, detail);
    }

    println!(
        "✅ Recorded {} fixture(s) with seed {} to {}",
        fixtures.len(),
        seed,
        output
    );

    if skipped.is_empty() {
        Ok(0)
    } else {
        Ok(RunStatus::Errored.exit_code())
    }
}
