use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// One parsed spreadsheet row before normalization. Column names are not
/// fixed; different source exports use different headers for the same
/// concept, and any key may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub columns: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(columns: HashMap<String, String>) -> Self {
        Self { columns }
    }
}

/// Closed payment vocabulary accepted by the courier API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Prepaid,
    #[serde(rename = "COD")]
    Cod,
    Pickup,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMode::Prepaid => write!(f, "Prepaid"),
            PaymentMode::Cod => write!(f, "COD"),
            PaymentMode::Pickup => write!(f, "Pickup"),
        }
    }
}

/// Closed transport vocabulary accepted by the courier API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingMode {
    Surface,
    Express,
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingMode::Surface => write!(f, "Surface"),
            ShippingMode::Express => write!(f, "Express"),
        }
    }
}

/// Canonical, API-ready representation of one order. Field names follow the
/// courier wire format. Immutable once built; `ewbn` is filled later by an
/// external process and stays empty at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(rename = "add")]
    pub address: String,
    pub address_type: String,
    pub phone: String,
    pub payment_mode: PaymentMode,
    pub name: String,
    pub pin: String,
    pub order: String,
    pub consignee_gst_amount: String,
    pub integrated_gst_amount: String,
    pub gst_cess_amount: String,
    pub consignee_gst_tin: String,
    pub ewbn: String,
    /// Omitted from the payload entirely when no default was configured;
    /// the remote API distinguishes "not provided" from an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Grams, rounded to the nearest integer. An unparsable source cell is
    /// kept empty rather than claiming a known zero weight.
    #[serde(serialize_with = "serialize_weight", deserialize_with = "deserialize_weight")]
    pub weight: Option<u32>,
    pub shipment_length: u32,
    pub shipment_width: u32,
    pub shipment_height: u32,
    pub shipping_mode: ShippingMode,
    pub quantity: u32,
    pub total_amount: f64,
    pub product_desc: String,
    // Duplicated under a second key for older payload variants.
    pub products_desc: String,
}

fn serialize_weight<S: Serializer>(weight: &Option<u32>, ser: S) -> Result<S::Ok, S::Error> {
    match weight {
        Some(grams) => ser.serialize_u32(*grams),
        None => ser.serialize_str(""),
    }
}

fn deserialize_weight<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(value.as_u64().and_then(|g| u32::try_from(g).ok()))
}

/// Warehouse the courier collects from; deployment-level, not per-row data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupLocation {
    pub name: String,
    pub city: String,
    pub pin: String,
    pub country: String,
}

/// Request body for the courier create-manifest call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestPayload {
    pub shipments: Vec<Shipment>,
    pub pickup_location: PickupLocation,
}

/// One reconciled output row. Exactly one exists per originally selected
/// order identifier, waybill empty when the remote omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestResult {
    pub order: String,
    pub waybill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Static values injected into the shipment builder. These come from
/// configuration, never from row data.
#[derive(Debug, Clone)]
pub struct ShipmentDefaults {
    pub consignee_gst_amount: String,
    pub integrated_gst_amount: String,
    pub gst_cess_amount: String,
    pub consignee_gst_tin: String,
    pub hsn_code: Option<String>,
    pub country: String,
}

impl Default for ShipmentDefaults {
    fn default() -> Self {
        Self {
            consignee_gst_amount: "0".to_string(),
            integrated_gst_amount: "0".to_string(),
            gst_cess_amount: "0".to_string(),
            consignee_gst_tin: String::new(),
            hsn_code: None,
            country: "India".to_string(),
        }
    }
}

/// Result of the transform stage.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub shipments: Vec<Shipment>,
    /// Rows dropped for lacking every order-identifier alias.
    pub skipped: usize,
}

/// Result of the manifest stage, handed to load for export.
#[derive(Debug, Clone)]
pub struct ManifestOutcome {
    pub payload: ManifestPayload,
    /// Raw remote response; `None` on a dry run.
    pub response: Option<serde_json::Value>,
    /// One row per selected order id, in selection order. Empty on a dry run.
    pub results: Vec<ManifestResult>,
    pub dry_run: bool,
}
