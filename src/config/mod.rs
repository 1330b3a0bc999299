pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::domain::model::{PickupLocation, ShipmentDefaults};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "manifest-etl")]
#[command(about = "Normalize order spreadsheets and manifest them with the courier")]
pub struct CliConfig {
    /// Orders CSV to import
    #[arg(long)]
    pub input: String,

    /// Comma-separated order ids to manifest; every imported order when omitted
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// TOML file with courier credentials, pickup location and shipment defaults
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Build the manifest payload without calling the courier API
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Run configuration handed to the pipeline: CLI arguments merged with the
/// TOML-sourced deployment constants.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_file: String,
    pub output_path: String,
    pub selected_orders: Vec<String>,
    pub dry_run: bool,
    pub defaults: ShipmentDefaults,
    pub pickup: PickupLocation,
}

impl AppConfig {
    pub fn new(cli: &CliConfig, toml: &TomlConfig) -> Self {
        Self {
            input_file: cli.input.clone(),
            output_path: cli.output_path.clone(),
            selected_orders: cli.select.clone(),
            dry_run: cli.dry_run,
            defaults: toml.shipment_defaults(),
            pickup: toml.pickup_location(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn selected_orders(&self) -> &[String] {
        &self.selected_orders
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn shipment_defaults(&self) -> &ShipmentDefaults {
        &self.defaults
    }

    fn pickup_location(&self) -> &PickupLocation {
        &self.pickup
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_file)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("pickup.name", &self.pickup.name)?;
        Ok(())
    }
}
