//! Safety buffer and inventory comparison.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fleetforge_core::DeviceType;

use crate::demand::DemandRecord;
use crate::error::{ForecastError, ForecastResult};
use crate::snapshot::AvailableByType;

/// Safety-stock percentage expressed as a fraction (`0.20` = 20%).
///
/// Must be finite and non-negative; values above `1.0` are allowed for
/// aggressive over-provisioning.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct SafetyStock(f64);

impl SafetyStock {
    pub fn new(percent: f64) -> ForecastResult<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(ForecastError::invalid_config(format!(
                "safety stock percent must be a finite value >= 0 (got {percent})"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Whole buffer units for a base demand.
    ///
    /// The buffer is rounded half away from zero *before* it is added, so the
    /// padded total is always `base + round(base * percent)` rather than a
    /// truncation of `base * (1 + percent)`.
    pub fn buffer_units(&self, total_base_demand: u32) -> u32 {
        (f64::from(total_base_demand) * self.0).round() as u32
    }
}

impl Default for SafetyStock {
    /// 20% safety stock.
    fn default() -> Self {
        Self(0.20)
    }
}

impl TryFrom<f64> for SafetyStock {
    type Error = ForecastError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Demand for one device type with the safety buffer applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferedDemand {
    pub refresh_urgent: u32,
    pub refresh_recommended: u32,
    pub refresh_needed: u32,
    pub churn_replacement: u32,
    pub total_base_demand: u32,
    /// Whole units added on top of base demand.
    pub safety_buffer: u32,
    /// `total_base_demand + safety_buffer`.
    pub total_needed_with_buffer: u32,
}

impl BufferedDemand {
    pub fn new(record: DemandRecord, safety_stock: SafetyStock) -> Self {
        let safety_buffer = safety_stock.buffer_units(record.total_base_demand);
        Self {
            refresh_urgent: record.refresh_urgent,
            refresh_recommended: record.refresh_recommended,
            refresh_needed: record.refresh_needed,
            churn_replacement: record.churn_replacement,
            total_base_demand: record.total_base_demand,
            safety_buffer,
            total_needed_with_buffer: record.total_base_demand.saturating_add(safety_buffer),
        }
    }
}

/// Buffered demand held against available stock.
///
/// `shortage` and `surplus` are both clamped at zero, so at most one of them
/// is positive for any device type.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryComparison {
    pub available_stock: u32,
    pub shortage: u32,
    pub surplus: u32,
}

impl InventoryComparison {
    pub fn new(total_needed_with_buffer: u32, available_stock: u32) -> Self {
        Self {
            available_stock,
            shortage: total_needed_with_buffer.saturating_sub(available_stock),
            surplus: available_stock.saturating_sub(total_needed_with_buffer),
        }
    }
}

/// One device type's full demand-versus-stock position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAssessment {
    pub demand: BufferedDemand,
    pub inventory: InventoryComparison,
}

/// Apply the safety buffer and compare against available stock.
///
/// Covers the union of demanded and stocked device types: a type that only
/// appears in the inventory snapshot still gets a row, with zero demand and
/// its whole stock as surplus.
pub fn assess_stock(
    demand: &BTreeMap<DeviceType, DemandRecord>,
    safety_stock: SafetyStock,
    available: &AvailableByType,
) -> BTreeMap<DeviceType, StockAssessment> {
    let mut assessments = BTreeMap::new();

    for (device_type, record) in demand {
        let buffered = BufferedDemand::new(*record, safety_stock);
        let available_stock = available.get(device_type).copied().unwrap_or(0);
        assessments.insert(
            device_type.clone(),
            StockAssessment {
                demand: buffered,
                inventory: InventoryComparison::new(buffered.total_needed_with_buffer, available_stock),
            },
        );
    }

    for (device_type, &available_stock) in available {
        assessments.entry(device_type.clone()).or_insert_with(|| {
            let buffered = BufferedDemand::new(DemandRecord::default(), safety_stock);
            StockAssessment {
                demand: buffered,
                inventory: InventoryComparison::new(buffered.total_needed_with_buffer, available_stock),
            }
        });
    }

    assessments
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn test_device(name: &str) -> DeviceType {
        DeviceType::new(name).unwrap()
    }

    #[test]
    fn default_safety_stock_is_twenty_percent() {
        assert_eq!(SafetyStock::default().percent(), 0.20);
    }

    #[test]
    fn rejects_negative_safety_stock() {
        match SafetyStock::new(-0.1) {
            Err(ForecastError::InvalidConfig(msg)) if msg.contains("safety stock") => {}
            other => panic!("Expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_safety_stock() {
        assert!(SafetyStock::new(f64::NAN).is_err());
        assert!(SafetyStock::new(f64::INFINITY).is_err());
    }

    #[test]
    fn permits_percentages_above_one() {
        let stock = SafetyStock::new(1.5).unwrap();
        assert_eq!(stock.buffer_units(10), 15);
    }

    #[test]
    fn deserialization_applies_validation() {
        assert!(serde_json::from_str::<SafetyStock>("-0.2").is_err());
        let ok: SafetyStock = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.percent(), 0.25);
    }

    #[test]
    fn buffer_rounds_half_away_from_zero() {
        let stock = SafetyStock::default();
        // 27 * 0.20 = 5.4 rounds down; 5 * 0.20 = 1.0 stays.
        assert_eq!(stock.buffer_units(27), 5);
        assert_eq!(stock.buffer_units(5), 1);

        // 2 * 0.25 = 0.5 rounds up, not to even.
        let quarter = SafetyStock::new(0.25).unwrap();
        assert_eq!(quarter.buffer_units(2), 1);
    }

    #[test]
    fn buffer_is_rounded_before_it_is_added() {
        // base 2 at 30%: round(0.6) = 1 unit of buffer, so 3 are needed.
        // Padding the total first and truncating would give only 2.
        let record = DemandRecord::new(2, 0, 0);
        let buffered = BufferedDemand::new(record, SafetyStock::new(0.3).unwrap());
        assert_eq!(buffered.safety_buffer, 1);
        assert_eq!(buffered.total_needed_with_buffer, 3);
    }

    #[test]
    fn zero_base_demand_gets_zero_buffer() {
        let buffered = BufferedDemand::new(DemandRecord::default(), SafetyStock::default());
        assert_eq!(buffered.safety_buffer, 0);
        assert_eq!(buffered.total_needed_with_buffer, 0);
    }

    #[test]
    fn shortage_and_surplus_clamp_at_zero() {
        let short = InventoryComparison::new(32, 1);
        assert_eq!(short.shortage, 31);
        assert_eq!(short.surplus, 0);

        let long = InventoryComparison::new(26, 51);
        assert_eq!(long.shortage, 0);
        assert_eq!(long.surplus, 25);

        let exact = InventoryComparison::new(10, 10);
        assert_eq!(exact.shortage, 0);
        assert_eq!(exact.surplus, 0);
    }

    #[test]
    fn missing_inventory_entries_count_as_zero_stock() {
        let mut demand = BTreeMap::new();
        demand.insert(test_device("laptop"), DemandRecord::new(1, 1, 0));

        let assessments = assess_stock(&demand, SafetyStock::default(), &AvailableByType::new());
        let laptop = assessments[&test_device("laptop")];
        assert_eq!(laptop.inventory.available_stock, 0);
        assert_eq!(laptop.inventory.shortage, 2);
    }

    #[test]
    fn stock_only_device_types_get_a_zero_demand_row() {
        let mut available = AvailableByType::new();
        available.insert(test_device("dock"), 7);

        let assessments = assess_stock(&BTreeMap::new(), SafetyStock::default(), &available);
        let dock = assessments[&test_device("dock")];
        assert_eq!(dock.demand.total_needed_with_buffer, 0);
        assert_eq!(dock.inventory.surplus, 7);
        assert_eq!(dock.inventory.shortage, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// At most one of shortage/surplus is ever positive.
        #[test]
        fn shortage_and_surplus_are_mutually_exclusive(needed in 0u32..10_000, available in 0u32..10_000) {
            let comparison = InventoryComparison::new(needed, available);
            prop_assert!(comparison.shortage == 0 || comparison.surplus == 0);
            prop_assert_eq!(
                i64::from(comparison.shortage) - i64::from(comparison.surplus),
                i64::from(needed) - i64::from(available)
            );
        }

        /// The padded total always equals base demand plus the rounded buffer.
        #[test]
        fn buffered_total_follows_the_two_step_rule(
            urgent in 0u32..500,
            recommended in 0u32..500,
            churn in 0u32..500,
            percent in 0.0f64..3.0,
        ) {
            let record = DemandRecord::new(urgent, recommended, churn);
            let stock = SafetyStock::new(percent).unwrap();
            let buffered = BufferedDemand::new(record, stock);

            let expected_buffer = (f64::from(record.total_base_demand) * percent).round() as u32;
            prop_assert_eq!(buffered.safety_buffer, expected_buffer);
            prop_assert_eq!(
                buffered.total_needed_with_buffer,
                record.total_base_demand + expected_buffer
            );
        }

        /// Raising the safety-stock percentage never shrinks the buffer or the shortage.
        #[test]
        fn buffers_grow_monotonically_with_the_percentage(
            base in 0u32..2_000,
            available in 0u32..2_000,
            lo in 0.0f64..2.0,
            hi in 0.0f64..2.0,
        ) {
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            let record = DemandRecord::new(base, 0, 0);

            let small = BufferedDemand::new(record, SafetyStock::new(lo).unwrap());
            let large = BufferedDemand::new(record, SafetyStock::new(hi).unwrap());
            prop_assert!(small.safety_buffer <= large.safety_buffer);

            let short_small = InventoryComparison::new(small.total_needed_with_buffer, available);
            let short_large = InventoryComparison::new(large.total_needed_with_buffer, available);
            prop_assert!(short_small.shortage <= short_large.shortage);
        }
    }
}


