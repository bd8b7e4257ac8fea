//! Volumetric utilization aggregation over bin records.

use serde::Serialize;

use crate::capacity;
use crate::models::Bin;

/// Aggregated capacity figures for a set of bins.
///
/// `used_capacity` trusts `current_utilization` as a fraction of capacity;
/// values above 1.0 in source data are reflected, not clamped, so the
/// percentage can exceed 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UtilizationSummary {
    pub total_capacity: f64,
    pub used_capacity: f64,
}

impl UtilizationSummary {
    /// Aggregate a collection of bins, normalizing each capacity on the way.
    ///
    /// Bins whose capacity is malformed parse to zero volume and contribute
    /// nothing to either total, which can silently undercount true capacity.
    pub fn from_bins<'a>(bins: impl IntoIterator<Item = &'a Bin>) -> Self {
        let mut summary = Self::default();
        for bin in bins {
            let volume = capacity::parse(bin.capacity.as_ref()).volume();
            summary.total_capacity += volume;
            summary.used_capacity += volume * bin.current_utilization;
        }
        summary
    }

    /// Used capacity as a percentage of total; 0 when there is no capacity.
    pub fn utilization_percent(&self) -> f64 {
        if self.total_capacity > 0.0 {
            self.used_capacity / self.total_capacity * 100.0
        } else {
            0.0
        }
    }

    /// One-decimal display form, e.g. `"33.3"`.
    pub fn percent_display(&self) -> String {
        format!("{:.1}", self.utilization_percent())
    }
}
