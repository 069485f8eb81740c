//! Data models
//!
//! Value types passed between the calculators and the tool layer.

mod nutrition;
mod performance;
mod profile;

pub use nutrition::{EnergyEstimate, MacronutrientSplit};
pub use performance::PerformanceSnapshot;
pub use profile::{
    ActivityLevel, AthleteProfile, ProfileError, Sex, HIGH_MULTIPLIER, LIGHT_MULTIPLIER,
    MAX_AGE_YEARS, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_AGE_YEARS, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
    MODERATE_MULTIPLIER, SEDENTARY_MULTIPLIER,
};
