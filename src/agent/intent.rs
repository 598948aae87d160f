use std::sync::OnceLock;

use regex::Regex;

use crate::agent::neighborhoods;
use crate::models::Purpose;

/// First known neighborhood mentioned in the query, in table order
pub fn extract_neighborhood(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    neighborhoods::all().find(|name| query.contains(*name))
}

/// Budget in AED from phrases like "under 5M AED" or "under 5,000,000 AED"
pub fn extract_budget(query: &str) -> Option<f64> {
    static MILLIONS: OnceLock<Regex> = OnceLock::new();
    static PLAIN: OnceLock<Regex> = OnceLock::new();

    let millions = MILLIONS.get_or_init(|| {
        Regex::new(r"(?i)under\s+([\d.]+)\s*m(?:illion)?\s*aed").expect("valid budget regex")
    });
    if let Some(amount) = millions
        .captures(query)
        .and_then(|caps| caps[1].parse::<f64>().ok())
    {
        return Some(amount * 1_000_000.0);
    }

    let plain = PLAIN.get_or_init(|| Regex::new(r"(?i)under\s+([\d,]+)\s*aed").expect("valid budget regex"));
    plain
        .captures(query)
        .and_then(|caps| caps[1].replace(',', "").parse::<f64>().ok())
}

pub fn extract_purpose(query: &str) -> Purpose {
    if query.to_lowercase().contains("rent") {
        Purpose::Rent
    } else {
        Purpose::Sale
    }
}
