//! Persisted record types for the `inventory`, `warehouse_layout` and
//! `movement_logs` collections, plus the composite bin location key.

use std::fmt;
use std::str::FromStr;

use bson::{oid::ObjectId, Bson, DateTime};
use serde::{Deserialize, Serialize};

/// Order id stamped on movement log entries not tied to a real order.
pub const SYSTEM_ORDER_ID: &str = "SYSTEM_ADD";

/// Movement type recorded when an item enters the warehouse.
pub const MOVEMENT_IN: &str = "in";

/// Physical item dimensions in storage units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// An inventory item as stored in the `inventory` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Business key, distinct from the internal `_id`.
    pub item_id: String,
    pub item_name: String,
    pub category: String,
    pub dimensions: Dimensions,
    pub weight: f64,
    pub fragility: bool,
    pub expiry_date: Option<DateTime>,
    /// Composite `zone-rack-bin` location key.
    pub current_location: String,
    pub entry_date: DateTime,
}

/// A storage slot as stored in the `warehouse_layout` collection.
///
/// `capacity` is kept raw here: historical records hold either a structured
/// `{length, width, height}` document or its textual encoding. The capacity
/// parser normalizes it at the read boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub zone_id: String,
    pub rack_id: String,
    pub bin_id: String,
    #[serde(default)]
    pub capacity: Option<Bson>,
    /// Fraction of volumetric capacity occupied, in [0, 1]. Missing means 0.
    #[serde(default)]
    pub current_utilization: f64,
}

/// Append-only movement record in the `movement_logs` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Item business key, not the internal record id.
    pub item_id: String,
    pub timestamp: DateTime,
    pub movement_type: String,
    pub location: String,
    pub order_id: String,
}

/// One row of the category breakdown aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoryCount {
    #[serde(rename = "_id")]
    #[schema(example = "electronics")]
    pub category: String,
    pub count: i64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("location {0:?} does not split into zone-rack-bin")]
pub struct LocationParseError(pub String);

/// Validated composite location key.
///
/// Stored item locations encode zone, rack and bin as a single
/// `zone-rack-bin` string. Parsing rejects anything that does not split into
/// exactly three non-empty components, so malformed keys are caught when an
/// item is written rather than when its bin is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinLocation {
    pub zone: String,
    pub rack: String,
    pub bin: String,
}

impl FromStr for BinLocation {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(zone), Some(rack), Some(bin), None)
                if !zone.is_empty() && !rack.is_empty() && !bin.is_empty() =>
            {
                Ok(Self {
                    zone: zone.to_string(),
                    rack: rack.to_string(),
                    bin: bin.to_string(),
                })
            }
            _ => Err(LocationParseError(s.to_string())),
        }
    }
}

impl fmt::Display for BinLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.zone, self.rack, self.bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_splits_into_three_parts() {
        let loc: BinLocation = "A-R1-B3".parse().unwrap();
        assert_eq!(
            loc,
            BinLocation {
                zone: "A".to_string(),
                rack: "R1".to_string(),
                bin: "B3".to_string(),
            }
        );
        assert_eq!(loc.to_string(), "A-R1-B3");
    }

    #[test]
    fn location_rejects_wrong_arity() {
        assert!("A-R1".parse::<BinLocation>().is_err());
        assert!("A-R1-B3-extra".parse::<BinLocation>().is_err());
        assert!("".parse::<BinLocation>().is_err());
    }

    #[test]
    fn location_rejects_empty_components() {
        assert!("A--B3".parse::<BinLocation>().is_err());
        assert!("-R1-B3".parse::<BinLocation>().is_err());
        assert!("A-R1-".parse::<BinLocation>().is_err());
    }
}
