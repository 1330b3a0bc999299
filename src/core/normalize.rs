use crate::domain::model::{PaymentMode, ShippingMode};

/// Maps raw payment text onto the closed payment vocabulary. Unmatched and
/// empty input falls back to Prepaid; shipments are assumed pre-paid unless
/// explicitly flagged otherwise.
pub fn normalize_payment_mode(text: &str) -> PaymentMode {
    match text.trim().to_lowercase().as_str() {
        "cod" | "cash on delivery" => PaymentMode::Cod,
        "pickup" | "pick-up" => PaymentMode::Pickup,
        "prepaid" | "paid" | "online" => PaymentMode::Prepaid,
        _ => PaymentMode::Prepaid,
    }
}

/// Express only on an exact case-insensitive match; everything else,
/// including empty, ships Surface.
pub fn normalize_shipping_mode(text: &str) -> ShippingMode {
    if text.trim().eq_ignore_ascii_case("express") {
        ShippingMode::Express
    } else {
        ShippingMode::Surface
    }
}
