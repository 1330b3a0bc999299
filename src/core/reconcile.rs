use crate::domain::model::ManifestResult;
use crate::utils::error::{PipelineError, Result};
use serde_json::Value;
use std::collections::HashMap;

// The remote API has renamed its result collection across integration
// versions; earlier names win per identifier. Each collection may also sit
// one level down under a "response" wrapper.
const COLLECTION_KEYS: &[&str] = &["packages", "shipments"];
const ORDER_ALIASES: &[&str] = &["order", "order_id", "reference"];
const WAYBILL_ALIASES: &[&str] = &["waybill", "wbn", "awb"];

#[derive(Debug, Clone)]
struct IndexedEntry {
    waybill: String,
    status: Option<String>,
}

/// Builds exactly one result per selected order identifier, in selection
/// order, with the waybill populated when the response contains one under
/// any known collection/alias. Never drops, duplicates or invents an
/// identifier; what the remote chose to emit does not change the output
/// set. A response that is not a JSON object at all is a typed failure
/// rather than an empty reconciliation.
pub fn reconcile(selected_orders: &[String], response: &Value) -> Result<Vec<ManifestResult>> {
    let index = index_response(response)?;

    Ok(selected_orders
        .iter()
        .map(|order| match index.get(order.as_str()) {
            Some(entry) => ManifestResult {
                order: order.clone(),
                waybill: entry.waybill.clone(),
                status: entry.status.clone(),
            },
            None => ManifestResult {
                order: order.clone(),
                waybill: String::new(),
                status: None,
            },
        })
        .collect())
}

fn index_response(response: &Value) -> Result<HashMap<String, IndexedEntry>> {
    if !response.is_object() {
        return Err(PipelineError::ResponseShape {
            details: format!("expected a JSON object, got {}", json_kind(response)),
        });
    }

    let mut index: HashMap<String, IndexedEntry> = HashMap::new();
    for key in COLLECTION_KEYS {
        let Some(entries) = find_collection(response, key) else {
            continue;
        };
        for entry in entries {
            let Some(order) = string_under_aliases(entry, ORDER_ALIASES) else {
                continue;
            };
            let Some(waybill) = string_under_aliases(entry, WAYBILL_ALIASES) else {
                continue;
            };
            let status = entry
                .get("status")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            index
                .entry(order)
                .or_insert(IndexedEntry { waybill, status });
        }
    }
    Ok(index)
}

fn find_collection<'a>(response: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    response.get(key).and_then(Value::as_array).or_else(|| {
        response
            .get("response")
            .and_then(|nested| nested.get(key))
            .and_then(Value::as_array)
    })
}

// Identifiers occasionally come back as numbers; normalize to trimmed text.
fn string_under_aliases(entry: &Value, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        let text = match entry.get(*alias) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
