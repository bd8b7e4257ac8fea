//! Warehouse-wide statistics and the dashboard snapshot.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::models::{CategoryCount, Item};
use crate::store::InventoryStore;
use crate::utilization::UtilizationSummary;

/// Items expiring within this many days count as "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

/// How many recent items the dashboard lists.
const DASHBOARD_ITEM_LIMIT: i64 = 10;

/// Utilization figures for a single zone.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ZoneStats {
    pub name: String,
    /// One-decimal percentage, e.g. `"33.3"`.
    #[schema(example = "33.3")]
    pub utilization: String,
    /// Number of bins in the zone.
    pub bins: usize,
}

/// Full statistics snapshot.
///
/// Sub-computations read the store independently; there is no snapshot
/// isolation across them.
#[derive(Debug, Serialize, ToSchema)]
pub struct WarehouseStats {
    pub zones: Vec<ZoneStats>,
    pub categories: Vec<CategoryCount>,
    pub total_items: u64,
    pub expiring_soon: u64,
}

/// Data backing the dashboard page.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub items: Vec<Item>,
    pub total_items: u64,
    pub zones: Vec<String>,
    /// Overall utilization percent string, e.g. `"42.0%"`.
    pub utilization: String,
}

/// Half-open expiry window starting at `now`.
pub fn expiry_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(EXPIRY_WINDOW_DAYS))
}

/// Service producing utilization statistics and dashboard snapshots.
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn InventoryStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Per-zone utilization, category breakdown, expiring-soon count and
    /// total item count.
    #[instrument(skip(self))]
    pub async fn warehouse_stats(&self) -> Result<WarehouseStats, ServiceError> {
        let mut zones = Vec::new();
        for zone in self.store.distinct_zones().await? {
            let bins = self.store.bins_in_zone(&zone).await?;
            let summary = UtilizationSummary::from_bins(&bins);
            zones.push(ZoneStats {
                name: zone,
                utilization: summary.percent_display(),
                bins: bins.len(),
            });
        }

        let categories = self.store.category_counts().await?;
        let (from, until) = expiry_window(Utc::now());
        let expiring_soon = self.store.count_expiring(from, until).await?;
        let total_items = self.store.count_items().await?;

        Ok(WarehouseStats {
            zones,
            categories,
            total_items,
            expiring_soon,
        })
    }

    /// Latest items, totals and overall utilization for the dashboard page.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardData, ServiceError> {
        let items = self.store.recent_items(DASHBOARD_ITEM_LIMIT).await?;
        let total_items = self.store.count_items().await?;
        let zones = self.store.distinct_zones().await?;

        let bins = self.store.all_bins().await?;
        let summary = UtilizationSummary::from_bins(&bins);

        Ok(DashboardData {
            items,
            total_items,
            zones,
            utilization: format!("{}%", summary.percent_display()),
        })
    }
}
