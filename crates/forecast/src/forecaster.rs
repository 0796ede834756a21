//! Forecast orchestration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fleetforge_core::DeviceType;

use crate::demand::aggregate_demand;
use crate::error::ForecastResult;
use crate::recommendation::build_recommendations;
use crate::report::{ProcurementForecast, ProcurementReport, QuickSummary};
use crate::snapshot::{ForecastInputs, SnapshotSource};
use crate::stock::{assess_stock, BufferedDemand, SafetyStock, StockAssessment};

/// Tunable parameters for a forecast run.
///
/// `forecast_months` labels the planning horizon in outputs and timelines; it
/// does not scale any quantity.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub forecast_months: u32,
    pub safety_stock: SafetyStock,
}

impl ForecastConfig {
    pub fn new(forecast_months: u32, safety_stock_percent: f64) -> ForecastResult<Self> {
        Ok(Self {
            forecast_months,
            safety_stock: SafetyStock::new(safety_stock_percent)?,
        })
    }
}

impl Default for ForecastConfig {
    /// Six-month horizon with 20% safety stock.
    fn default() -> Self {
        Self {
            forecast_months: 6,
            safety_stock: SafetyStock::default(),
        }
    }
}

/// Stateless procurement forecaster.
///
/// Holds only configuration; every run works exclusively from the inputs it
/// is handed, so identical inputs and config always produce identical output.
#[derive(Debug, Copy, Clone, Default)]
pub struct ProcurementForecaster {
    config: ForecastConfig,
}

impl ProcurementForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ForecastConfig {
        self.config
    }

    /// Buffered demand per device type, before any inventory comparison.
    ///
    /// Covers the union of the two demand snapshots only; device types that
    /// exist purely as stock do not appear.
    pub fn demand_forecast(
        &self,
        inputs: &ForecastInputs,
    ) -> BTreeMap<DeviceType, BufferedDemand> {
        aggregate_demand(&inputs.aging_assets, &inputs.churn_risk_assets)
            .into_iter()
            .map(|(device_type, record)| {
                (
                    device_type,
                    BufferedDemand::new(record, self.config.safety_stock),
                )
            })
            .collect()
    }

    /// Full pipeline: aggregate demand, buffer, compare, recommend.
    pub fn forecast(&self, inputs: &ForecastInputs) -> ProcurementForecast {
        tracing::info!(
            forecast_months = self.config.forecast_months,
            safety_stock_percent = self.config.safety_stock.percent(),
            "generating procurement forecast"
        );

        let assessments = self.assessments(inputs);
        tracing::debug!(
            device_types = assessments.len(),
            "assessed stock positions"
        );

        let recommendations = build_recommendations(&assessments, self.config.forecast_months);
        ProcurementForecast::new(
            inputs.as_of,
            self.config.forecast_months,
            self.config.safety_stock.percent(),
            recommendations,
        )
    }

    /// Comprehensive report: forecast plus demand drivers and the inventory
    /// snapshot it was compared against.
    pub fn report(&self, inputs: &ForecastInputs) -> ProcurementReport {
        ProcurementReport::from_forecast(self.forecast(inputs), inputs)
    }

    /// Compact shape for chat and notification surfaces.
    pub fn quick_summary(&self, inputs: &ForecastInputs) -> QuickSummary {
        let assessments = self.assessments(inputs);
        let recommendations = build_recommendations(&assessments, self.config.forecast_months);
        QuickSummary::from_recommendations(&recommendations, self.config.forecast_months)
    }

    /// Pull inputs from a collaborator source, then forecast.
    pub fn forecast_from(&self, source: &impl SnapshotSource) -> ForecastResult<ProcurementForecast> {
        let inputs = source.load()?;
        Ok(self.forecast(&inputs))
    }

    fn assessments(&self, inputs: &ForecastInputs) -> BTreeMap<DeviceType, StockAssessment> {
        let demand = aggregate_demand(&inputs.aging_assets, &inputs.churn_risk_assets);
        assess_stock(&demand, self.config.safety_stock, &inputs.available_inventory)
    }
}
