use clap::Parser;
use ingest_etl::app::commands;
use ingest_etl::app::report::render_hashtags;
use ingest_etl::config::cli::Command;
use ingest_etl::utils::logger;
use ingest_etl::{Cli, EtlError, IngestConfig};

#[tokio::main]
async fn main() {
    // .env 不存在時忽略
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ingest");
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, exit code {})",
            e,
            e.category(),
            e.exit_code()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &Cli) -> Result<IngestConfig, EtlError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            IngestConfig::from_file(path)?
        }
        None => IngestConfig::default(),
    };
    config.apply_env()?;
    cli.apply(&mut config);
    Ok(config)
}

async fn run(cli: &Cli) -> Result<(), EtlError> {
    let config = load_config(cli)?;
    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written to the stores");
    }

    match &cli.command {
        Command::Weather { .. } => {
            let report = commands::run_weather(&config, cli.dry_run).await?;
            println!(
                "✅ Data inserted successfully! ({} row into {})",
                report.records_written, report.target
            );
        }
        Command::Tweets { .. } => {
            let report = commands::run_tweets(&config, cli.dry_run).await?;
            println!(
                "✅ Tweets fetched and stored successfully! ({} document(s) into {})",
                report.records_written, report.target
            );
        }
        Command::TopHashtags { format, .. } => {
            let counts = commands::top_hashtags(&config).await?;
            println!("{}", render_hashtags(&counts, *format)?);
        }
    }

    Ok(())
}
