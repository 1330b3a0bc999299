use anyhow::Context;
use clap::Parser;
use manifest_etl::utils::{logger, validation, validation::Validate};
use manifest_etl::{AppConfig, CliConfig, CourierClient, Engine, LocalStorage, ManifestPipeline, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting manifest-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let toml_config = match &cli.config {
        Some(path) => {
            TomlConfig::from_file(path).with_context(|| format!("loading config file {}", path))?
        }
        None => TomlConfig::default(),
    };
    toml_config.validate()?;

    // The token is only needed once a real courier call is on the table.
    if !cli.dry_run {
        validation::validate_non_empty_string("api.token", &toml_config.api.token)?;
    }

    let app_config = AppConfig::new(&cli, &toml_config);
    app_config.validate()?;

    let courier = CourierClient::new(
        toml_config.api.base_url(),
        toml_config.api.token.clone(),
        toml_config.api.timeout_seconds,
    );
    let storage = LocalStorage::new(".".to_string());
    let pipeline = ManifestPipeline::new(storage, app_config, courier);
    let engine = Engine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Manifest run completed. Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Manifest run failed: {}", e);
            Err(e.into())
        }
    }
}
