//! Document-store access boundary.
//!
//! Handlers and services never talk to the database driver directly; they go
//! through [`InventoryStore`], which covers exactly the find/insert/delete/
//! aggregate surface the system needs. The store is injected into
//! [`crate::AppState`], so tests substitute doubles for the MongoDB
//! implementation.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::errors::ServiceError;
use crate::models::{Bin, BinLocation, CategoryCount, Item, MovementLog};

pub mod mongo;

pub use mongo::MongoInventoryStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Latest items by entry date, newest first.
    async fn recent_items(&self, limit: i64) -> Result<Vec<Item>, ServiceError>;

    /// Total number of items in the inventory.
    async fn count_items(&self) -> Result<u64, ServiceError>;

    /// Distinct zone identifiers across the warehouse layout.
    async fn distinct_zones(&self) -> Result<Vec<String>, ServiceError>;

    /// Every bin in the warehouse.
    async fn all_bins(&self) -> Result<Vec<Bin>, ServiceError>;

    /// Every bin in one zone.
    async fn bins_in_zone(&self, zone: &str) -> Result<Vec<Bin>, ServiceError>;

    /// Exact-name item lookup.
    async fn find_item_by_name(&self, name: &str) -> Result<Option<Item>, ServiceError>;

    /// Bin lookup by composite location key.
    async fn find_bin(&self, location: &BinLocation) -> Result<Option<Bin>, ServiceError>;

    /// Most recent movements for an item business key, newest first.
    async fn recent_movements(
        &self,
        item_id: &str,
        limit: i64,
    ) -> Result<Vec<MovementLog>, ServiceError>;

    async fn insert_item(&self, item: &Item) -> Result<(), ServiceError>;

    async fn insert_movement(&self, entry: &MovementLog) -> Result<(), ServiceError>;

    /// Delete an item by internal id. Returns whether a record was removed.
    async fn delete_item(&self, id: ObjectId) -> Result<bool, ServiceError>;

    /// Item counts grouped by category, descending by count.
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, ServiceError>;

    /// Number of items whose expiry falls within `[from, until)`.
    async fn count_expiring(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64, ServiceError>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), ServiceError>;
}
