//! `fleetforge-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod device;
pub mod error;

pub use device::DeviceType;
pub use error::{DomainError, DomainResult};


