//! Purchase recommendations: priority policy, justification text, ordering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fleetforge_core::DeviceType;

use crate::stock::{BufferedDemand, InventoryComparison, StockAssessment};

/// Procurement priority for one device type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
    None,
}

impl Priority {
    /// Classify a stock position. Rules are checked in order; the first match
    /// wins:
    ///
    /// 1. No shortage is always `None`, even with urgent aging assets on the
    ///    books: stock on hand already covers their replacement.
    /// 2. Any urgent aging asset, or a shortage of five or more, is `High`.
    /// 3. A shortage of two to four, or any shortage with base demand of
    ///    three or more, is `Medium`.
    /// 4. What remains (shortage of one, small demand) is `Low`.
    pub fn classify(demand: &BufferedDemand, inventory: &InventoryComparison) -> Self {
        if inventory.shortage == 0 {
            return Priority::None;
        }
        if demand.refresh_urgent >= 1 || inventory.shortage >= 5 {
            return Priority::High;
        }
        if inventory.shortage >= 2 || demand.total_base_demand >= 3 {
            return Priority::Medium;
        }
        Priority::Low
    }

    /// Ordering rank; higher means more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::None => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::None => "NONE",
        }
    }
}

impl core::fmt::Display for Priority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actionable purchase recommendation for one device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecommendation {
    pub device_type: DeviceType,
    pub demand: BufferedDemand,
    pub inventory: InventoryComparison,
    pub action_required: bool,
    /// Exactly the shortage; zero when stock suffices.
    pub purchase_quantity: u32,
    pub priority: Priority,
    pub estimated_timeline: String,
    pub justification: String,
}

impl PurchaseRecommendation {
    pub fn build(
        device_type: DeviceType,
        assessment: &StockAssessment,
        forecast_months: u32,
    ) -> Self {
        let shortage = assessment.inventory.shortage;
        Self {
            priority: Priority::classify(&assessment.demand, &assessment.inventory),
            action_required: shortage > 0,
            purchase_quantity: shortage,
            estimated_timeline: format!("{forecast_months} months"),
            justification: justification(&device_type, &assessment.demand, &assessment.inventory),
            demand: assessment.demand,
            inventory: assessment.inventory,
            device_type,
        }
    }
}

fn justification(
    device_type: &DeviceType,
    demand: &BufferedDemand,
    inventory: &InventoryComparison,
) -> String {
    if inventory.shortage > 0 {
        let mut drivers = Vec::new();
        if demand.refresh_needed > 0 {
            drivers.push(format!("{} aging assets need replacement", demand.refresh_needed));
        }
        if demand.churn_replacement > 0 {
            drivers.push(format!(
                "{} assets at risk due to employee churn",
                demand.churn_replacement
            ));
        }
        format!(
            "Purchase {} {}(s) to meet demand. {}.",
            inventory.shortage,
            device_type,
            drivers.join(" and ")
        )
    } else if inventory.surplus > 0 {
        format!(
            "Inventory sufficient. {} surplus {}(s) available.",
            inventory.surplus, device_type
        )
    } else {
        format!("Inventory matches demand for {device_type}.")
    }
}

/// Build one recommendation per assessed device type, most urgent first.
///
/// Ordering: action required before not, then priority rank descending, then
/// purchase quantity descending, then device type name for a total order.
pub fn build_recommendations(
    assessments: &BTreeMap<DeviceType, StockAssessment>,
    forecast_months: u32,
) -> Vec<PurchaseRecommendation> {
    let mut recommendations: Vec<PurchaseRecommendation> = assessments
        .iter()
        .map(|(device_type, assessment)| {
            PurchaseRecommendation::build(device_type.clone(), assessment, forecast_months)
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.action_required
            .cmp(&a.action_required)
            .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
            .then_with(|| b.purchase_quantity.cmp(&a.purchase_quantity))
            .then_with(|| a.device_type.cmp(&b.device_type))
    });

    recommendations
}
