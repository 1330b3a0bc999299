use crate::core::normalize::{normalize_payment_mode, normalize_shipping_mode};
use crate::core::resolve::{resolve_field, to_number};
use crate::domain::model::{BuildOutcome, RawRecord, Shipment, ShipmentDefaults};
use std::collections::HashMap;

// Per-field ordered alias lists. The first group of each list covers the
// generic warehouse export, the star-prefixed entries the storefront export,
// the lowercase entries re-imported canonical rows. Adding a new source
// schema means adding aliases here, not new code paths.
const ORDER_ID_KEYS: &[&str] = &["Sale Order Number", "*Order ID", "order"];
const ADDRESS_KEYS: &[&str] = &["Shipping Address Line1", "*Street Address", "add"];
const PHONE_KEYS: &[&str] = &["Customer Phone", "*Phone", "phone"];
const NAME_KEYS: &[&str] = &["Customer Name", "*First Name", "name"];
const LAST_NAME_KEYS: &[&str] = &["Last Name", "*Last Name"];
const CITY_KEYS: &[&str] = &["Shipping City", "*City", "city"];
const STATE_KEYS: &[&str] = &["Shipping State", "state"];
const PIN_KEYS: &[&str] = &["Shipping Pincode", "*Postal Code", "pin"];
const PAYMENT_KEYS: &[&str] = &["Payment Mode", "*Payment Status", "payment_mode"];
const TRANSPORT_KEYS: &[&str] = &["Transport Mode", "*Transport Mode"];
const QUANTITY_KEYS: &[&str] = &["Quantity Ordered", "Quantity", "*Quantity"];
const TOTAL_KEYS: &[&str] = &["Total Amount", "*Total Amount", "Total Price", "*Total Price"];
const UNIT_PRICE_KEYS: &[&str] = &["Unit Item Price", "*Unit Item Price", "Subtotal"];
const WEIGHT_KEYS: &[&str] = &["Weight (gm)", "Weight", "*Weight"];
const LENGTH_KEYS: &[&str] = &["Length (cm)"];
const BREADTH_KEYS: &[&str] = &["Breadth (cm)"];
const HEIGHT_KEYS: &[&str] = &["Height (cm)"];
const PRODUCT_KEYS: &[&str] = &[
    "Item Sku Name",
    "Translated Name",
    "*Translated Name",
    "Item Name",
    "Item Sku Code",
];
const SIZE_KEYS: &[&str] = &["Size", "*Size"];
const COLOUR_KEYS: &[&str] = &["Color", "*Color", "Colour"];

pub const ADDRESS_TYPE_HOME: &str = "home";

/// Order identifier for a raw row, or `None` when the row carries no value
/// under any recognized alias. Rows without one never reach the builder.
pub fn resolve_order_id(record: &RawRecord) -> Option<String> {
    let order = resolve_field(record, ORDER_ID_KEYS, "");
    if order.is_empty() {
        None
    } else {
        Some(order)
    }
}

/// Transforms raw rows into canonical shipments. Pure and total: every
/// missing or unparsable field degrades to its documented default, so
/// `build` never fails. Static compliance fields come from the injected
/// defaults, never from row data.
#[derive(Debug, Clone)]
pub struct ShipmentBuilder {
    defaults: ShipmentDefaults,
}

impl ShipmentBuilder {
    pub fn new(defaults: ShipmentDefaults) -> Self {
        Self { defaults }
    }

    /// Builds every row that carries an order identifier, counting the rest
    /// as skipped. The identifier is the unique key: multi-item storefront
    /// exports repeat it across rows, so a repeated id replaces the earlier
    /// shipment (last row wins) while keeping its first-appearance position.
    pub fn build_all(&self, rows: &[RawRecord]) -> BuildOutcome {
        let mut shipments: Vec<Shipment> = Vec::with_capacity(rows.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0;
        for row in rows {
            match resolve_order_id(row) {
                Some(order) => match positions.get(&order) {
                    Some(&at) => shipments[at] = self.build(row, order),
                    None => {
                        positions.insert(order.clone(), shipments.len());
                        shipments.push(self.build(row, order));
                    }
                },
                None => skipped += 1,
            }
        }
        BuildOutcome { shipments, skipped }
    }

    fn build(&self, record: &RawRecord, order: String) -> Shipment {
        let quantity_raw = to_number(&resolve_field(record, QUANTITY_KEYS, ""), 1.0);
        let quantity = quantity_raw.round().max(1.0) as u32;

        // A negative explicit total is as untrustworthy as a missing one.
        let mut total_amount = to_number(&resolve_field(record, TOTAL_KEYS, ""), 0.0);
        if total_amount <= 0.0 {
            let unit_price = to_number(&resolve_field(record, UNIT_PRICE_KEYS, ""), 0.0);
            total_amount = unit_price * quantity_raw.max(1.0);
        }

        Shipment {
            address: resolve_field(record, ADDRESS_KEYS, ""),
            address_type: ADDRESS_TYPE_HOME.to_string(),
            phone: resolve_field(record, PHONE_KEYS, ""),
            payment_mode: normalize_payment_mode(&resolve_field(record, PAYMENT_KEYS, "")),
            name: build_consignee_name(record),
            pin: resolve_field(record, PIN_KEYS, ""),
            order,
            consignee_gst_amount: self.defaults.consignee_gst_amount.clone(),
            integrated_gst_amount: self.defaults.integrated_gst_amount.clone(),
            gst_cess_amount: self.defaults.gst_cess_amount.clone(),
            consignee_gst_tin: self.defaults.consignee_gst_tin.clone(),
            ewbn: String::new(),
            hsn_code: self
                .defaults
                .hsn_code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            city: resolve_field(record, CITY_KEYS, ""),
            state: resolve_field(record, STATE_KEYS, ""),
            country: self.defaults.country.clone(),
            weight: parse_weight(&resolve_field(record, WEIGHT_KEYS, "")),
            shipment_length: parse_dimension(&resolve_field(record, LENGTH_KEYS, "")),
            shipment_width: parse_dimension(&resolve_field(record, BREADTH_KEYS, "")),
            shipment_height: parse_dimension(&resolve_field(record, HEIGHT_KEYS, "")),
            shipping_mode: normalize_shipping_mode(&resolve_field(record, TRANSPORT_KEYS, "")),
            quantity,
            total_amount: round2(total_amount.max(0.0)),
            product_desc: build_product_description(record),
            products_desc: build_product_description(record),
        }
    }
}

// Some storefront exports split the consignee name across two columns.
fn build_consignee_name(record: &RawRecord) -> String {
    let first = resolve_field(record, NAME_KEYS, "");
    let last = resolve_field(record, LAST_NAME_KEYS, "");
    if last.is_empty() {
        first
    } else {
        format!("{} {}", first, last).trim().to_string()
    }
}

fn build_product_description(record: &RawRecord) -> String {
    let name = resolve_field(record, PRODUCT_KEYS, "");
    let mut parts = Vec::new();
    let size = resolve_field(record, SIZE_KEYS, "");
    if !size.is_empty() {
        parts.push(format!("Size: {}", size));
    }
    let colour = resolve_field(record, COLOUR_KEYS, "");
    if !colour.is_empty() {
        parts.push(format!("Colour: {}", colour));
    }
    if parts.is_empty() {
        name
    } else if name.is_empty() {
        parts.join(" - ")
    } else {
        format!("{} - {}", name, parts.join(" - "))
    }
}

// Empty on unparsable input: a defaulted zero would falsely claim a known
// zero weight.
fn parse_weight(text: &str) -> Option<u32> {
    let cleaned = text.replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(grams) if grams.is_finite() && grams >= 0.0 => Some(grams.round() as u32),
        _ => None,
    }
}

fn parse_dimension(text: &str) -> u32 {
    to_number(text, 0.0).round().max(0.0) as u32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
