use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Whether the listing is offered for rent or for sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Rent,
    Sale,
}

impl Purpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Rent => "rent",
            Purpose::Sale => "sale",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of property every normalized record describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Apartment,
}

impl PropertyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Apartment => "apartment",
        }
    }
}

/// Arguments accepted by the `fetch_properties` tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    /// Area or neighborhood in Dubai, e.g. "Dubai Marina"
    pub location: String,
    /// Either "rent" or "sale"
    pub purpose: Purpose,
    /// Maximum price in AED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl SearchRequest {
    pub fn new(location: impl Into<String>, purpose: Purpose, budget: Option<f64>) -> Self {
        Self {
            location: location.into(),
            purpose,
            budget,
        }
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("location must not be empty".to_string());
        }
        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(format!("budget must be a non-negative number, got {}", budget));
            }
        }
        Ok(())
    }
}

/// Listing as returned by the search provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawListing {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawListing {
    /// Price as free text; numbers are rendered with their JSON form
    pub fn price_text(&self) -> Option<String> {
        value_text(self.price.as_ref())
    }

    pub fn size_text(&self) -> Option<String> {
        value_text(self.size.as_ref())
    }

    pub fn address_text(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Uniform output shape for every retained listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub purpose: Purpose,
    pub price: String,
    pub location: String,
    pub size: String,
}

/// What a tool hands back to the host
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolOutput {
    pub content: Vec<String>,
}

impl ToolOutput {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
        }
    }
}
