use crate::domain::model::RawRecord;

/// Returns the first non-empty trimmed value found under any of the
/// candidate keys, in order. Each candidate is tried as an exact key first,
/// then matched against the record's keys ignoring surrounding whitespace
/// and a leading byte-order marker (some exports keep both in their
/// headers). Missing keys are a normal case, never an error.
pub fn resolve_field(record: &RawRecord, candidates: &[&str], default: &str) -> String {
    for candidate in candidates {
        if let Some(value) = record.columns.get(*candidate) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        let wanted = normalize_key(candidate);
        for (key, value) in &record.columns {
            if normalize_key(key) == wanted {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }
    default.to_string()
}

fn normalize_key(key: &str) -> &str {
    key.trim().trim_start_matches('\u{feff}')
}

/// Parses numeric-looking text into a number, stripping thousands
/// separators. Returns `default` for anything that does not parse to a
/// finite value; blank numeric cells are routine in spreadsheets, so
/// failure is silent.
pub fn to_number(text: &str, default: f64) -> f64 {
    let cleaned = text.replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => default,
    }
}
