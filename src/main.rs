use clap::Parser;
use stream_probe::utils::{logger, validation::Validate};
use stream_probe::{CliConfig, HttpProbe, OutputFormat, ProbeEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.format {
        OutputFormat::Text => logger::init_cli_logger(config.verbose),
        OutputFormat::Json => logger::init_json_logger(config.verbose),
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let outcome = ProbeEngine::new(HttpProbe::new(settings))
        .with_format(config.format)
        .run()
        .await;
    println!("{}", outcome.output());

    if outcome.is_failure() && config.fail_on_error {
        std::process::exit(2);
    }

    Ok(())
}
