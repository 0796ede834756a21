//! Result payloads: forecast, executive report and quick summary.
//!
//! These are plain serializable values. Presentation layers render them; the
//! pipeline never mutates them after construction.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fleetforge_core::DeviceType;

use crate::recommendation::{Priority, PurchaseRecommendation};
use crate::snapshot::ForecastInputs;

/// Cross-type rollup of one forecast run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_device_types: usize,
    pub types_needing_procurement: usize,
    /// Sum of purchase quantities across device types needing action.
    pub total_units_to_purchase: u64,
    /// True exactly when no device type has a shortage.
    pub inventory_sufficient: bool,
}

impl ForecastSummary {
    pub fn from_recommendations(recommendations: &[PurchaseRecommendation]) -> Self {
        let needing = recommendations.iter().filter(|r| r.action_required);
        let total_units_to_purchase: u64 = needing
            .clone()
            .map(|r| u64::from(r.purchase_quantity))
            .sum();
        Self {
            total_device_types: recommendations.len(),
            types_needing_procurement: needing.count(),
            total_units_to_purchase,
            inventory_sufficient: total_units_to_purchase == 0,
        }
    }
}

/// Full output of one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementForecast {
    /// Timestamp of the snapshots this forecast was computed from.
    pub as_of: DateTime<Utc>,
    pub forecast_period_months: u32,
    pub safety_stock_percent: f64,
    pub summary: ForecastSummary,
    pub summary_message: String,
    /// Most urgent first.
    pub recommendations: Vec<PurchaseRecommendation>,
}

impl ProcurementForecast {
    pub fn new(
        as_of: DateTime<Utc>,
        forecast_period_months: u32,
        safety_stock_percent: f64,
        recommendations: Vec<PurchaseRecommendation>,
    ) -> Self {
        let summary = ForecastSummary::from_recommendations(&recommendations);
        let summary_message = summary_message(&recommendations);
        Self {
            as_of,
            forecast_period_months,
            safety_stock_percent,
            summary,
            summary_message,
            recommendations,
        }
    }
}

fn summary_message(recommendations: &[PurchaseRecommendation]) -> String {
    let needing: Vec<&PurchaseRecommendation> = recommendations
        .iter()
        .filter(|r| r.action_required)
        .collect();
    if needing.is_empty() {
        return "Current inventory is sufficient for forecasted demand.".to_string();
    }

    let mut message = format!("Procurement needed for {} device type(s):\n", needing.len());
    for recommendation in needing {
        message.push_str(&format!(
            "  - {}: purchase {} units ({} priority)\n",
            recommendation.device_type,
            recommendation.purchase_quantity,
            recommendation.priority
        ));
    }
    message
}

/// Leading block of the comprehensive report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub procurement_needed: bool,
    pub total_units_to_purchase: u64,
    pub device_types_affected: usize,
    pub summary_message: String,
}

/// Aging totals for one device type, split by urgency band.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingSummary {
    pub urgent: u32,
    pub recommended: u32,
    pub total: u32,
}

/// Aging side of the demand drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingDrivers {
    pub total_aging_assets: u64,
    pub by_type: BTreeMap<DeviceType, AgingSummary>,
}

/// Churn side of the demand drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnDrivers {
    pub total_assets_at_risk: u64,
    pub by_type: BTreeMap<DeviceType, u32>,
}

/// What is generating demand, straight from the input snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandDrivers {
    pub aging_assets: AgingDrivers,
    pub employee_churn: ChurnDrivers,
}

impl DemandDrivers {
    pub fn from_inputs(inputs: &ForecastInputs) -> Self {
        let mut aging_by_type = BTreeMap::new();
        let mut total_aging_assets: u64 = 0;
        for (device_type, count) in &inputs.aging_assets {
            total_aging_assets += u64::from(count.total());
            aging_by_type.insert(
                device_type.clone(),
                AgingSummary {
                    urgent: count.urgent,
                    recommended: count.recommended,
                    total: count.total(),
                },
            );
        }

        let total_assets_at_risk: u64 = inputs
            .churn_risk_assets
            .values()
            .map(|&assets| u64::from(assets))
            .sum();

        Self {
            aging_assets: AgingDrivers {
                total_aging_assets,
                by_type: aging_by_type,
            },
            employee_churn: ChurnDrivers {
                total_assets_at_risk,
                by_type: inputs.churn_risk_assets.clone(),
            },
        }
    }
}

/// Comprehensive report for planning reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcurementReport {
    pub as_of: DateTime<Utc>,
    pub forecast_period_months: u32,
    pub executive_summary: ExecutiveSummary,
    pub recommendations: Vec<PurchaseRecommendation>,
    pub demand_drivers: DemandDrivers,
    /// Inventory snapshot echoed back for side-by-side reading.
    pub current_inventory: BTreeMap<DeviceType, u32>,
}

impl ProcurementReport {
    pub fn from_forecast(forecast: ProcurementForecast, inputs: &ForecastInputs) -> Self {
        let executive_summary = ExecutiveSummary {
            procurement_needed: !forecast.summary.inventory_sufficient,
            total_units_to_purchase: forecast.summary.total_units_to_purchase,
            device_types_affected: forecast.summary.types_needing_procurement,
            summary_message: forecast.summary_message,
        };
        Self {
            as_of: forecast.as_of,
            forecast_period_months: forecast.forecast_period_months,
            executive_summary,
            recommendations: forecast.recommendations,
            demand_drivers: DemandDrivers::from_inputs(inputs),
            current_inventory: inputs.available_inventory.clone(),
        }
    }
}

/// Compact shape for chat and notification surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSummary {
    pub procurement_needed: bool,
    pub total_units_to_purchase: u64,
    /// Only device types needing action appear here.
    pub purchase_by_type: BTreeMap<DeviceType, u32>,
    /// `HIGH` priority lines, rendered like `31 laptop(s)`.
    pub urgent_items: Vec<String>,
    pub message: String,
    pub forecast_period_months: u32,
}

impl QuickSummary {
    pub fn from_recommendations(
        recommendations: &[PurchaseRecommendation],
        forecast_period_months: u32,
    ) -> Self {
        let mut purchase_by_type = BTreeMap::new();
        let mut urgent_items = Vec::new();
        let mut total_units_to_purchase: u64 = 0;

        for recommendation in recommendations.iter().filter(|r| r.action_required) {
            total_units_to_purchase += u64::from(recommendation.purchase_quantity);
            purchase_by_type.insert(
                recommendation.device_type.clone(),
                recommendation.purchase_quantity,
            );
            if recommendation.priority == Priority::High {
                urgent_items.push(format!(
                    "{} {}(s)",
                    recommendation.purchase_quantity, recommendation.device_type
                ));
            }
        }

        let message = if purchase_by_type.is_empty() {
            "Inventory sufficient for forecasted demand".to_string()
        } else {
            let lines: Vec<String> = purchase_by_type
                .iter()
                .map(|(device_type, quantity)| format!("{quantity} {device_type}(s)"))
                .collect();
            format!("Purchase needed: {}", lines.join(", "))
        };

        Self {
            procurement_needed: !purchase_by_type.is_empty(),
            total_units_to_purchase,
            purchase_by_type,
            urgent_items,
            message,
            forecast_period_months,
        }
    }
}
