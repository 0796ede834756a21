//! Demand aggregation: merge the aging and churn signals per device type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fleetforge_core::DeviceType;

use crate::snapshot::{AgingByType, ChurnRiskByType};

/// Base replacement demand for one device type, before any safety buffer.
///
/// `refresh_needed` and `total_base_demand` are derived at construction and
/// never drift from their components.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRecord {
    /// Assets past end-of-life.
    pub refresh_urgent: u32,
    /// Assets in the refresh window.
    pub refresh_recommended: u32,
    /// `refresh_urgent + refresh_recommended`.
    pub refresh_needed: u32,
    /// One replacement per at-risk assignment.
    pub churn_replacement: u32,
    /// `refresh_needed + churn_replacement`.
    pub total_base_demand: u32,
}

impl DemandRecord {
    pub fn new(refresh_urgent: u32, refresh_recommended: u32, churn_replacement: u32) -> Self {
        let refresh_needed = refresh_urgent.saturating_add(refresh_recommended);
        Self {
            refresh_urgent,
            refresh_recommended,
            refresh_needed,
            churn_replacement,
            total_base_demand: refresh_needed.saturating_add(churn_replacement),
        }
    }
}

/// Merge both demand signals over the union of their device types.
///
/// A device type present in only one snapshot gets zero for the other signal.
/// Churn demand assumes full replacement of every at-risk assignment, with no
/// probability weighting.
pub fn aggregate_demand(
    aging: &AgingByType,
    churn_risk: &ChurnRiskByType,
) -> BTreeMap<DeviceType, DemandRecord> {
    let mut demand = BTreeMap::new();

    for (device_type, count) in aging {
        demand.insert(
            device_type.clone(),
            DemandRecord::new(count.urgent, count.recommended, 0),
        );
    }

    for (device_type, &assets_at_risk) in churn_risk {
        demand
            .entry(device_type.clone())
            .and_modify(|record: &mut DemandRecord| {
                *record = DemandRecord::new(
                    record.refresh_urgent,
                    record.refresh_recommended,
                    assets_at_risk,
                );
            })
            .or_insert_with(|| DemandRecord::new(0, 0, assets_at_risk));
    }

    demand
}
