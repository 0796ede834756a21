//! `fleetforge-forecast` — procurement forecasting for the device fleet.
//!
//! **Responsibility:** turn point-in-time snapshots of asset aging, employee
//! churn risk and available inventory into prioritized purchase
//! recommendations.
//!
//! The pipeline is deterministic and side-effect free: demand is aggregated
//! per device type, padded with a safety buffer, compared against stock, and
//! rendered as recommendations plus report shapes. Callers own the snapshots
//! and the clock.

pub mod demand;
pub mod error;
pub mod forecaster;
pub mod recommendation;
pub mod report;
pub mod snapshot;
pub mod stock;

pub use demand::{aggregate_demand, DemandRecord};
pub use error::{ForecastError, ForecastResult};
pub use forecaster::{ForecastConfig, ProcurementForecaster};
pub use recommendation::{build_recommendations, Priority, PurchaseRecommendation};
pub use report::{
    AgingDrivers, AgingSummary, ChurnDrivers, DemandDrivers, ExecutiveSummary, ForecastSummary,
    ProcurementForecast, ProcurementReport, QuickSummary,
};
pub use snapshot::{
    AgingByType, AgingCount, AvailableByType, ChurnRiskByType, FixedSnapshots, ForecastInputs,
    SnapshotSource,
};
pub use stock::{assess_stock, BufferedDemand, InventoryComparison, SafetyStock, StockAssessment};


