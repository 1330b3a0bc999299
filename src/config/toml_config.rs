use crate::domain::model::{PickupLocation, ShipmentDefaults};
use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Deployment-level constants: courier credentials, the fixed pickup
/// warehouse and the static compliance values stamped onto every shipment.
/// Every field has a fallback, so a missing file or section still yields a
/// usable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pickup: PickupConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// "staging" or "live"; picks the courier base URL unless overridden.
    #[serde(default = "default_mode")]
    pub mode: String,
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            base_url: None,
            token: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.clone();
        }
        match self.mode.as_str() {
            "live" => "https://express.delhivery.com".to_string(),
            _ => "https://track.delhivery.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupConfig {
    #[serde(default = "default_pickup_name")]
    pub name: String,
    #[serde(default = "default_pickup_city")]
    pub city: String,
    #[serde(default = "default_pickup_pin")]
    pub pin: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            name: default_pickup_name(),
            city: default_pickup_city(),
            pin: default_pickup_pin(),
            country: default_country(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_gst_amount")]
    pub consignee_gst_amount: String,
    #[serde(default = "default_gst_amount")]
    pub integrated_gst_amount: String,
    #[serde(default = "default_gst_amount")]
    pub gst_cess_amount: String,
    #[serde(default)]
    pub consignee_gst_tin: String,
    pub hsn_code: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            consignee_gst_amount: default_gst_amount(),
            integrated_gst_amount: default_gst_amount(),
            gst_cess_amount: default_gst_amount(),
            consignee_gst_tin: String::new(),
            hsn_code: None,
            country: default_country(),
        }
    }
}

fn default_mode() -> String {
    "staging".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_pickup_name() -> String {
    "MainWarehouse".to_string()
}

fn default_pickup_city() -> String {
    "Kolkata".to_string()
}

fn default_pickup_pin() -> String {
    "700107".to_string()
}

fn default_country() -> String {
    "India".to_string()
}

fn default_gst_amount() -> String {
    "0".to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PipelineError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PipelineError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn shipment_defaults(&self) -> ShipmentDefaults {
        ShipmentDefaults {
            consignee_gst_amount: self.defaults.consignee_gst_amount.clone(),
            integrated_gst_amount: self.defaults.integrated_gst_amount.clone(),
            gst_cess_amount: self.defaults.gst_cess_amount.clone(),
            consignee_gst_tin: self.defaults.consignee_gst_tin.clone(),
            hsn_code: self.defaults.hsn_code.clone(),
            country: self.defaults.country.clone(),
        }
    }

    pub fn pickup_location(&self) -> PickupLocation {
        PickupLocation {
            name: self.pickup.name.clone(),
            city: self.pickup.city.clone(),
            pin: self.pickup.pin.clone(),
            country: self.pickup.country.clone(),
        }
    }
}

// Replaces ${VAR_NAME} with the environment value, so tokens stay out of
// checked-in config files. Unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.api.mode != "staging" && self.api.mode != "live" {
            return Err(PipelineError::InvalidConfigValue {
                field: "api.mode".to_string(),
                value: self.api.mode.clone(),
                reason: "Must be either 'staging' or 'live'".to_string(),
            });
        }
        validation::validate_url("api.base_url", &self.api.base_url())?;
        validation::validate_non_empty_string("pickup.name", &self.pickup.name)?;
        Ok(())
    }
}
