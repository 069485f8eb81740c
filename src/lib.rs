//! Triathlon Fuel (trifuel) Library
//!
//! Energy and macronutrient planning for endurance athletes.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod simulation;
pub mod tools;

pub use models::{ActivityLevel, AthleteProfile, EnergyEstimate, MacronutrientSplit, Sex};
pub use nutrition::{estimate_daily_energy, split};
