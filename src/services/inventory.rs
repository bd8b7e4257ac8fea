//! Item lookup and inventory mutations.

use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::capacity::{self, BinCapacity};
use crate::errors::ServiceError;
use crate::models::{
    Bin, BinLocation, Dimensions, Item, LocationParseError, MovementLog, MOVEMENT_IN,
    SYSTEM_ORDER_ID,
};
use crate::store::InventoryStore;

/// How many movement log entries a lookup returns.
const MOVEMENT_HISTORY_LIMIT: i64 = 5;

/// Fields a new item must carry, checked in this order.
const REQUIRED_FIELDS: [&str; 6] = [
    "item_id",
    "item_name",
    "category",
    "dimensions",
    "weight",
    "current_location",
];

/// Payload for adding an item.
///
/// Every field deserializes permissively; presence and types are enforced by
/// the service so a missing field can be reported by name. Numeric fields
/// accept numbers or numeric strings.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub item_id: Option<String>,
    pub item_name: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub dimensions: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Value>,
    #[schema(value_type = Option<bool>)]
    pub fragility: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub expiry_date: Option<Value>,
    pub current_location: Option<String>,
}

/// Bin record with its capacity normalized for responses.
#[derive(Debug, Clone, Serialize)]
pub struct BinDetails {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub zone_id: String,
    pub rack_id: String,
    pub bin_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<BinCapacity>,
    pub current_utilization: f64,
}

impl From<Bin> for BinDetails {
    fn from(bin: Bin) -> Self {
        let capacity = bin.capacity.as_ref().map(|raw| capacity::parse(Some(raw)));
        Self {
            id: bin.id,
            zone_id: bin.zone_id,
            rack_id: bin.rack_id,
            bin_id: bin.bin_id,
            capacity,
            current_utilization: bin.current_utilization,
        }
    }
}

/// An item enriched with its bin and recent movement history.
#[derive(Debug, Serialize)]
pub struct ItemDetails {
    #[serde(flatten)]
    pub item: Item,
    pub bin_details: Option<BinDetails>,
    pub movement_history: Vec<MovementLog>,
}

/// Service for item lookup and inventory mutations.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Resolve an item by exact name, enriched with bin details and up to
    /// five most recent movements.
    #[instrument(skip(self))]
    pub async fn lookup(&self, item_name: &str) -> Result<ItemDetails, ServiceError> {
        let item = self
            .store
            .find_item_by_name(item_name)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item not found".to_string()))?;

        // New items validate their location at write time; hitting this on a
        // read means the stored record predates that check.
        let location: BinLocation = item.current_location.parse().map_err(
            |err: LocationParseError| {
                ServiceError::Internal(format!("stored location for item {}: {}", item.item_id, err))
            },
        )?;

        let bin_details = self.store.find_bin(&location).await?.map(BinDetails::from);
        let movement_history = self
            .store
            .recent_movements(&item.item_id, MOVEMENT_HISTORY_LIMIT)
            .await?;

        Ok(ItemDetails {
            item,
            bin_details,
            movement_history,
        })
    }

    /// Validate and insert a new item, then append its "in" movement entry.
    ///
    /// The two writes run sequentially without a transaction; a failure
    /// after the first leaves an item without its entry log.
    #[instrument(skip(self, request))]
    pub async fn add_item(&self, request: AddItemRequest) -> Result<(), ServiceError> {
        let item = build_item(request, Utc::now())?;
        self.store.insert_item(&item).await?;

        let entry = MovementLog {
            id: None,
            item_id: item.item_id.clone(),
            timestamp: item.entry_date,
            movement_type: MOVEMENT_IN.to_string(),
            location: item.current_location.clone(),
            order_id: SYSTEM_ORDER_ID.to_string(),
        };
        self.store.insert_movement(&entry).await?;

        info!(item_id = %item.item_id, location = %item.current_location, "item added");
        Ok(())
    }

    /// Delete an item by its internal record id. Deletes are not logged.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = ObjectId::parse_str(raw_id)
            .map_err(|_| ServiceError::BadRequest(format!("Invalid item_id: {}", raw_id)))?;

        if self.store.delete_item(id).await? {
            info!(%id, "item deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound("Item not found".to_string()))
        }
    }
}

fn build_item(request: AddItemRequest, now: chrono::DateTime<Utc>) -> Result<Item, ServiceError> {
    // Presence first so the first missing field is the one reported,
    // regardless of coercion problems later in the payload.
    let present = [
        request.item_id.is_some(),
        request.item_name.is_some(),
        request.category.is_some(),
        request.dimensions.is_some(),
        request.weight.is_some(),
        request.current_location.is_some(),
    ];
    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .zip(present)
        .find_map(|(field, ok)| (!ok).then_some(field))
    {
        return Err(ServiceError::BadRequest(format!(
            "Missing required field: {}",
            missing
        )));
    }

    let current_location = request.current_location.unwrap_or_default();
    current_location
        .parse::<BinLocation>()
        .map_err(|err| ServiceError::BadRequest(format!("Invalid current_location: {}", err)))?;

    Ok(Item {
        id: None,
        item_id: request.item_id.unwrap_or_default(),
        item_name: request.item_name.unwrap_or_default(),
        category: request.category.unwrap_or_default(),
        dimensions: coerce_dimensions(&request.dimensions.unwrap_or_default())?,
        weight: coerce_f64(&request.weight.unwrap_or_default(), "weight")?,
        fragility: coerce_fragility(request.fragility.as_ref())?,
        expiry_date: parse_expiry(request.expiry_date.as_ref())?,
        current_location,
        entry_date: bson::DateTime::from_chrono(now),
    })
}

fn coerce_dimensions(value: &Value) -> Result<Dimensions, ServiceError> {
    let fields = value
        .as_object()
        .ok_or_else(|| ServiceError::Internal("dimensions must be an object".to_string()))?;
    let component = |key: &str| -> Result<f64, ServiceError> {
        let raw = fields
            .get(key)
            .ok_or_else(|| ServiceError::Internal(format!("dimensions is missing {}", key)))?;
        coerce_f64(raw, key)
    };
    Ok(Dimensions {
        length: component("length")?,
        width: component("width")?,
        height: component("height")?,
    })
}

fn coerce_f64(value: &Value, field: &str) -> Result<f64, ServiceError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.ok_or_else(|| ServiceError::Internal(format!("value for {} is not numeric", field)))
}

fn coerce_fragility(value: Option<&Value>) -> Result<bool, ServiceError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(ServiceError::Internal(
            "value for fragility is not a boolean".to_string(),
        )),
    }
}

/// Optional ISO-8601 expiry: accepts an RFC 3339 timestamp, a naive
/// timestamp, or a bare date. Null and empty string mean no expiry.
fn parse_expiry(value: Option<&Value>) -> Result<Option<bson::DateTime>, ServiceError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(ServiceError::Internal(
                "value for expiry_date is not a string".to_string(),
            ))
        }
    };

    let parsed = chrono::DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
        })
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        })
        .map_err(|_| {
            ServiceError::Internal(format!("expiry_date {:?} is not an ISO-8601 timestamp", text))
        })?;

    Ok(Some(bson::DateTime::from_chrono(parsed)))
}
