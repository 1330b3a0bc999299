pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CourierClient, LocalStorage};
pub use config::{AppConfig, CliConfig, TomlConfig};
pub use crate::core::{engine::Engine, pipeline::ManifestPipeline};
pub use utils::error::{PipelineError, Result};
