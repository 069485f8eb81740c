//! Simulation module
//!
//! Random, non-deterministic helpers kept apart from the nutrition core.

pub mod performance;

pub use performance::PerformanceSimulator;
