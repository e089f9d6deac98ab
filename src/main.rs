use clap::Parser;
use delayed_square::core::{ConfigProvider, Storage};
use delayed_square::utils::{logger, validation::Validate};
use delayed_square::{BatchConfig, BatchReport, CliConfig, LocalStorage, SquareEngine, SquareError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match BatchConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    match &config.name {
        Some(name) => tracing::info!("Starting delayed-square batch '{}'", name),
        None => tracing::info!("Starting delayed-square"),
    }
    tracing::debug!("Batch config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let engine = SquareEngine::new(config.concurrency());
    let report = match engine.run(config.inputs()).await {
        Ok(report) => report,
        Err(e) => exit_with(&e),
    };

    let rendered = match render(&report, config.output_format()) {
        Ok(rendered) => rendered,
        Err(e) => exit_with(&e),
    };
    println!("{}", rendered);

    if let Some(output_path) = config.output_path() {
        let storage = LocalStorage::new(output_path.to_string());
        let file_name = config.report_file_name();
        if let Err(e) = storage.write_file(file_name, rendered.as_bytes()).await {
            exit_with(&e);
        }
        tracing::info!("📁 Report saved to: {}", storage.full_path(file_name));
    }

    if report.rejected() > 0 {
        std::process::exit(2);
    }

    Ok(())
}

fn render(report: &BatchReport, format: &str) -> Result<String, SquareError> {
    match format {
        "json" => Ok(report.to_json()?),
        _ => Ok(report.to_text()),
    }
}

fn exit_with(e: &SquareError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
