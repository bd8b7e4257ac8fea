//! Shared test harness: an in-memory `InventoryStore` double and a router
//! wrapper for driving endpoints without a running document store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use bson::{oid::ObjectId, Bson};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use warehouse_api::{
    config::AppConfig,
    errors::ServiceError,
    models::{Bin, BinLocation, CategoryCount, Item, MovementLog},
    store::InventoryStore,
    AppState,
};

/// Store double over plain vectors. Query semantics mirror the MongoDB
/// implementation: name matches are exact, recency sorts descend, and the
/// expiry window is half-open.
#[derive(Default)]
pub struct InMemoryStore {
    pub items: Mutex<Vec<Item>>,
    pub bins: Mutex<Vec<Bin>>,
    pub movements: Mutex<Vec<MovementLog>>,
}

impl InMemoryStore {
    pub fn with_bins(bins: Vec<Bin>) -> Self {
        Self {
            bins: Mutex::new(bins),
            ..Self::default()
        }
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn recent_items(&self, limit: i64) -> Result<Vec<Item>, ServiceError> {
        let mut items = self.items.lock().unwrap().clone();
        items.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn count_items(&self) -> Result<u64, ServiceError> {
        Ok(self.items.lock().unwrap().len() as u64)
    }

    async fn distinct_zones(&self) -> Result<Vec<String>, ServiceError> {
        let mut zones: Vec<String> = Vec::new();
        for bin in self.bins.lock().unwrap().iter() {
            if !zones.contains(&bin.zone_id) {
                zones.push(bin.zone_id.clone());
            }
        }
        Ok(zones)
    }

    async fn all_bins(&self) -> Result<Vec<Bin>, ServiceError> {
        Ok(self.bins.lock().unwrap().clone())
    }

    async fn bins_in_zone(&self, zone: &str) -> Result<Vec<Bin>, ServiceError> {
        Ok(self
            .bins
            .lock()
            .unwrap()
            .iter()
            .filter(|bin| bin.zone_id == zone)
            .cloned()
            .collect())
    }

    async fn find_item_by_name(&self, name: &str) -> Result<Option<Item>, ServiceError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.item_name == name)
            .cloned())
    }

    async fn find_bin(&self, location: &BinLocation) -> Result<Option<Bin>, ServiceError> {
        Ok(self
            .bins
            .lock()
            .unwrap()
            .iter()
            .find(|bin| {
                bin.zone_id == location.zone
                    && bin.rack_id == location.rack
                    && bin.bin_id == location.bin
            })
            .cloned())
    }

    async fn recent_movements(
        &self,
        item_id: &str,
        limit: i64,
    ) -> Result<Vec<MovementLog>, ServiceError> {
        let mut movements: Vec<MovementLog> = self
            .movements
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.item_id == item_id)
            .cloned()
            .collect();
        movements.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        movements.truncate(limit as usize);
        Ok(movements)
    }

    async fn insert_item(&self, item: &Item) -> Result<(), ServiceError> {
        let mut stored = item.clone();
        if stored.id.is_none() {
            stored.id = Some(ObjectId::new());
        }
        self.items.lock().unwrap().push(stored);
        Ok(())
    }

    async fn insert_movement(&self, entry: &MovementLog) -> Result<(), ServiceError> {
        self.movements.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn delete_item(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id != Some(id));
        Ok(items.len() < before)
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, ServiceError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for item in self.items.lock().unwrap().iter() {
            *counts.entry(item.category.clone()).or_default() += 1;
        }
        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(counts)
    }

    async fn count_expiring(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64, ServiceError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| {
                item.expiry_date
                    .map(|expiry| {
                        let expiry = expiry.to_chrono();
                        expiry >= from && expiry < until
                    })
                    .unwrap_or(false)
            })
            .count() as u64)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Application wrapper: router + handle on the shared store double.
pub struct TestApp {
    router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(test_config(), store.clone());
        Self {
            router: warehouse_api::router(state),
            store,
        }
    }

    /// Issue a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize request body"))
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("send request")
    }

    /// Issue a request with an explicit content type and raw body.
    #[allow(dead_code)]
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("send request")
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "mongodb://localhost:27017".to_string(),
        database_name: "warehouse_test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 18080,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        cors_allowed_origins: None,
        cors_allow_any_origin: false,
        assets_dir: None,
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

#[allow(dead_code)]
pub fn item(name: &str, category: &str, location: &str, entry_millis: i64) -> Item {
    Item {
        id: Some(ObjectId::new()),
        item_id: format!("ITM-{}", name.to_uppercase()),
        item_name: name.to_string(),
        category: category.to_string(),
        dimensions: warehouse_api::models::Dimensions {
            length: 1.0,
            width: 1.0,
            height: 1.0,
        },
        weight: 1.0,
        fragility: false,
        expiry_date: None,
        current_location: location.to_string(),
        entry_date: bson::DateTime::from_millis(entry_millis),
    }
}

#[allow(dead_code)]
pub fn bin(zone: &str, rack: &str, bin_id: &str, capacity: Bson, utilization: f64) -> Bin {
    Bin {
        id: Some(ObjectId::new()),
        zone_id: zone.to_string(),
        rack_id: rack.to_string(),
        bin_id: bin_id.to_string(),
        capacity: Some(capacity),
        current_utilization: utilization,
    }
}

#[allow(dead_code)]
pub fn movement(item_id: &str, order_id: &str, millis: i64) -> MovementLog {
    MovementLog {
        id: Some(ObjectId::new()),
        item_id: item_id.to_string(),
        timestamp: bson::DateTime::from_millis(millis),
        movement_type: "in".to_string(),
        location: "A-R1-B1".to_string(),
        order_id: order_id.to_string(),
    }
}
