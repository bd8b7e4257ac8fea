//! MongoDB implementation of the inventory store.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::models::{Bin, BinLocation, CategoryCount, Item, MovementLog};
use crate::store::InventoryStore;

const INVENTORY: &str = "inventory";
const WAREHOUSE_LAYOUT: &str = "warehouse_layout";
const MOVEMENT_LOGS: &str = "movement_logs";

/// Store backed by the `inventory`, `warehouse_layout` and `movement_logs`
/// collections.
#[derive(Clone)]
pub struct MongoInventoryStore {
    db: Database,
    inventory: Collection<Item>,
    layout: Collection<Bin>,
    movements: Collection<MovementLog>,
}

impl MongoInventoryStore {
    pub fn new(db: Database) -> Self {
        let inventory = db.collection(INVENTORY);
        let layout = db.collection(WAREHOUSE_LAYOUT);
        let movements = db.collection(MOVEMENT_LOGS);
        Self {
            db,
            inventory,
            layout,
            movements,
        }
    }

    /// Connect to the configured deployment and select the database.
    ///
    /// The driver connects lazily; a failure here means the URL itself is
    /// malformed, not that the deployment is down. Use [`ping`] to probe
    /// actual connectivity.
    ///
    /// [`ping`]: InventoryStore::ping
    pub async fn connect(cfg: &AppConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&cfg.database_url).await?;
        info!(database = %cfg.database_name, "document store client initialized");
        Ok(Self::new(client.database(&cfg.database_name)))
    }
}

#[async_trait]
impl InventoryStore for MongoInventoryStore {
    async fn recent_items(&self, limit: i64) -> Result<Vec<Item>, ServiceError> {
        let cursor = self
            .inventory
            .find(doc! {})
            .sort(doc! { "entry_date": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_items(&self) -> Result<u64, ServiceError> {
        Ok(self.inventory.count_documents(doc! {}).await?)
    }

    async fn distinct_zones(&self) -> Result<Vec<String>, ServiceError> {
        let values = self.layout.distinct("zone_id", doc! {}).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(zone) => Some(zone),
                _ => None,
            })
            .collect())
    }

    async fn all_bins(&self) -> Result<Vec<Bin>, ServiceError> {
        let cursor = self.layout.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn bins_in_zone(&self, zone: &str) -> Result<Vec<Bin>, ServiceError> {
        let cursor = self.layout.find(doc! { "zone_id": zone }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_item_by_name(&self, name: &str) -> Result<Option<Item>, ServiceError> {
        Ok(self.inventory.find_one(doc! { "item_name": name }).await?)
    }

    async fn find_bin(&self, location: &BinLocation) -> Result<Option<Bin>, ServiceError> {
        let filter = doc! {
            "zone_id": location.zone.as_str(),
            "rack_id": location.rack.as_str(),
            "bin_id": location.bin.as_str(),
        };
        Ok(self.layout.find_one(filter).await?)
    }

    async fn recent_movements(
        &self,
        item_id: &str,
        limit: i64,
    ) -> Result<Vec<MovementLog>, ServiceError> {
        let cursor = self
            .movements
            .find(doc! { "item_id": item_id })
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_item(&self, item: &Item) -> Result<(), ServiceError> {
        self.inventory.insert_one(item).await?;
        Ok(())
    }

    async fn insert_movement(&self, entry: &MovementLog) -> Result<(), ServiceError> {
        self.movements.insert_one(entry).await?;
        Ok(())
    }

    async fn delete_item(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let result = self.inventory.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, ServiceError> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1 } },
        ];
        let mut cursor = self.inventory.aggregate(pipeline).await?;
        let mut counts = Vec::new();
        while let Some(group) = cursor.try_next().await? {
            counts.push(bson::from_document(group)?);
        }
        Ok(counts)
    }

    async fn count_expiring(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64, ServiceError> {
        let filter = doc! {
            "expiry_date": {
                "$gte": bson::DateTime::from_chrono(from),
                "$lt": bson::DateTime::from_chrono(until),
            }
        };
        Ok(self.inventory.count_documents(filter).await?)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
