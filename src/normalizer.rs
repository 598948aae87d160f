use crate::models::{PropertyKind, PropertyRecord, Purpose, RawListing, SearchRequest};
use tracing::debug;

/// Placeholder for fields the provider left out
pub const NOT_AVAILABLE: &str = "N/A";

/// Pull the digits out of a free-text price ("AED 1,200,000" -> 1200000).
///
/// Returns `None` when no digits remain or the number does not fit in a `u64`.
pub fn extract_numeric_price(price_text: &str) -> Option<u64> {
    let digits: String = price_text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Group an amount in thousands the way listings print prices ("1,500,000").
/// Whole amounts drop the decimals; anything else keeps two places.
pub fn format_amount(amount: f64) -> String {
    let text = if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    };
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}

/// A listing is dropped only when both a budget and a numeric price are known
/// and the price is over budget.
pub fn passes_budget(numeric_price: Option<u64>, budget: Option<f64>) -> bool {
    match (numeric_price, budget) {
        (Some(price), Some(budget)) => price as f64 <= budget,
        _ => true,
    }
}

pub fn build_record(listing: &RawListing, purpose: Purpose, fallback_location: &str) -> PropertyRecord {
    PropertyRecord {
        kind: PropertyKind::Apartment,
        purpose,
        price: listing
            .price_text()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        location: listing
            .address_text()
            .unwrap_or(fallback_location)
            .to_string(),
        size: listing
            .size_text()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

/// Filter raw listings by the request budget and map the survivors to records,
/// keeping provider order.
pub fn normalize(listings: &[RawListing], request: &SearchRequest) -> Vec<PropertyRecord> {
    let records: Vec<PropertyRecord> = listings
        .iter()
        .filter(|listing| {
            let numeric = listing
                .price_text()
                .as_deref()
                .and_then(extract_numeric_price);
            passes_budget(numeric, request.budget)
        })
        .map(|listing| build_record(listing, request.purpose, &request.location))
        .collect();

    debug!(
        "Kept {} of {} listings for {}",
        records.len(),
        listings.len(),
        request.location
    );

    records
}
