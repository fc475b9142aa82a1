//! Stock movement records as returned by the backend

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::{EntityId, TimestampMillis};

/// A stock movement from the movement-listing endpoint.
///
/// Every field is optional on the wire so a single malformed record never
/// fails the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_lenient_type")]
    pub movement_type: MovementType,
    /// Signed at some call sites, absolute at others
    #[serde(default, deserialize_with = "deserialize_lenient_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub counterparty: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Product summary embedded in a movement
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Movement {
    /// `productId` when present, otherwise the embedded product's id
    pub fn product_id(&self) -> Option<EntityId> {
        self.product_id
            .or_else(|| self.product.as_ref().and_then(|p| p.id))
    }

    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("")
    }

    /// Magnitude of the movement regardless of sign convention
    pub fn magnitude(&self) -> u64 {
        self.quantity.unsigned_abs()
    }

    pub fn created_at_millis(&self) -> Option<TimestampMillis> {
        self.created_at.map(|t| t.timestamp_millis())
    }
}

/// Movement type as labelled by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementType {
    /// `SATIN_ALMA`
    Purchase,
    /// `SATIS`
    Sale,
    /// Any other label, kept verbatim
    Other(String),
}

impl MovementType {
    pub const PURCHASE_LABEL: &'static str = "SATIN_ALMA";
    pub const SALE_LABEL: &'static str = "SATIS";

    pub fn as_str(&self) -> &str {
        match self {
            MovementType::Purchase => Self::PURCHASE_LABEL,
            MovementType::Sale => Self::SALE_LABEL,
            MovementType::Other(raw) => raw,
        }
    }

    /// Human-readable label for list and report views
    pub fn display_label(&self) -> &str {
        match self {
            MovementType::Purchase => "Satın Alma",
            MovementType::Sale => "Satış",
            MovementType::Other(raw) => raw,
        }
    }
}

impl Default for MovementType {
    fn default() -> Self {
        MovementType::Other(String::new())
    }
}

impl From<String> for MovementType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            Self::PURCHASE_LABEL => MovementType::Purchase,
            Self::SALE_LABEL => MovementType::Sale,
            _ => MovementType::Other(raw),
        }
    }
}

impl From<&str> for MovementType {
    fn from(raw: &str) -> Self {
        MovementType::from(raw.to_string())
    }
}

impl From<MovementType> for String {
    fn from(value: MovementType) -> Self {
        match value {
            MovementType::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// Parse a timestamp from RFC 3339, a zone-less ISO date-time (read as UTC)
/// or epoch millis. Anything else becomes `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
}

fn deserialize_lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer).unwrap_or(None);
    let parsed = match raw {
        Some(RawTimestamp::Millis(millis)) => Utc.timestamp_millis_opt(millis).single(),
        Some(RawTimestamp::Text(text)) => {
            let parsed = parse_timestamp(&text);
            if parsed.is_none() {
                tracing::warn!("Ignoring unparseable movement timestamp: {}", text);
            }
            parsed
        }
        None => None,
    };
    Ok(parsed)
}

// Null or mistyped values read as the defaults so one bad record never
// fails the whole list. Going through `Value` keeps the input consumed.
fn deserialize_lenient_type<'de, D>(deserializer: D) -> Result<MovementType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(Value::String(label)) => MovementType::from(label),
        _ => MovementType::default(),
    })
}

fn deserialize_lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer).unwrap_or(None);
    let quantity = match raw {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(quantity)
}
