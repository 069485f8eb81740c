//! Nutrition calculation module
//!
//! Deterministic core: energy estimation and macronutrient split.

pub mod energy;
pub mod macros;

pub use energy::{
    activity_multiplier, estimate_basal_metabolic_rate, estimate_daily_energy, estimate_energy,
};
pub use macros::{split, split_calories, split_with, MacronutrientRatios};
