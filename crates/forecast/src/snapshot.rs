//! Read-only input snapshots supplied by upstream collaborators.
//!
//! The forecaster never reaches into asset or HR systems itself. Callers hand
//! it three point-in-time maps keyed by device type, and every run works from
//! exactly those. `BTreeMap` keeps iteration (and therefore every derived
//! report) in a stable order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fleetforge_core::{DeviceType, DomainError, DomainResult};

use crate::error::ForecastResult;

/// Aging-asset counts for one device type.
///
/// Classification happens upstream: `urgent` covers assets past end-of-life
/// (five years or older), `recommended` covers assets in the three-to-five
/// year refresh window. Younger assets never appear here.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingCount {
    pub urgent: u32,
    pub recommended: u32,
}

impl AgingCount {
    pub fn new(urgent: u32, recommended: u32) -> Self {
        Self { urgent, recommended }
    }

    /// Rebuild from an upstream record that carries its own total.
    ///
    /// The total is redundant, so a mismatch means the record is corrupt and
    /// is rejected rather than silently recomputed.
    pub fn from_parts(urgent: u32, recommended: u32, total: u32) -> DomainResult<Self> {
        let count = Self::new(urgent, recommended);
        if count.total() != total {
            return Err(DomainError::invariant(format!(
                "aging total must equal urgent + recommended (got {total}, expected {})",
                count.total()
            )));
        }
        Ok(count)
    }

    pub fn total(&self) -> u32 {
        self.urgent.saturating_add(self.recommended)
    }
}

/// Aging-asset counts per device type.
pub type AgingByType = BTreeMap<DeviceType, AgingCount>;

/// Assets held by employees flagged as churn risks, per device type.
pub type ChurnRiskByType = BTreeMap<DeviceType, u32>;

/// Unassigned, ready-to-deploy stock per device type.
pub type AvailableByType = BTreeMap<DeviceType, u32>;

/// The three snapshots a forecast run consumes, frozen at `as_of`.
///
/// Absence of a device type in any map means zero for that signal. The same
/// inputs always produce the same forecast; `as_of` is echoed into outputs
/// rather than read from a clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastInputs {
    pub as_of: DateTime<Utc>,
    pub aging_assets: AgingByType,
    pub churn_risk_assets: ChurnRiskByType,
    pub available_inventory: AvailableByType,
}

impl ForecastInputs {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            aging_assets: BTreeMap::new(),
            churn_risk_assets: BTreeMap::new(),
            available_inventory: BTreeMap::new(),
        }
    }

    pub fn with_aging(mut self, device_type: DeviceType, count: AgingCount) -> Self {
        self.aging_assets.insert(device_type, count);
        self
    }

    pub fn with_churn_risk(mut self, device_type: DeviceType, assets_at_risk: u32) -> Self {
        self.churn_risk_assets.insert(device_type, assets_at_risk);
        self
    }

    pub fn with_available(mut self, device_type: DeviceType, on_hand: u32) -> Self {
        self.available_inventory.insert(device_type, on_hand);
        self
    }
}

/// Collaborator seam for producing forecast inputs.
///
/// Implementations wrap asset registries, HR feeds, stock systems or fixtures.
/// Failures stay on the collaborator side of this boundary.
pub trait SnapshotSource {
    fn load(&self) -> ForecastResult<ForecastInputs>;
}

/// In-memory source that always serves the same inputs.
#[derive(Debug, Clone)]
pub struct FixedSnapshots {
    inputs: ForecastInputs,
}

impl FixedSnapshots {
    pub fn new(inputs: ForecastInputs) -> Self {
        Self { inputs }
    }
}

impl SnapshotSource for FixedSnapshots {
    fn load(&self) -> ForecastResult<ForecastInputs> {
        Ok(self.inputs.clone())
    }
}
