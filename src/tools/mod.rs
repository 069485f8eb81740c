//! trifuel Tools module
//!
//! MCP tool implementations for Triathlon Fuel.

pub mod calculator;
pub mod charts;
pub mod reports;
pub mod status;
