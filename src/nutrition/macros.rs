//! Macronutrient split
//!
//! Converts a daily energy total into grams of carbohydrate, protein and fat
//! using fixed percent-of-calories shares and Atwater caloric densities.

use serde::{Deserialize, Serialize};

use super::energy::round_kcal;
use crate::models::MacronutrientSplit;

/// Share of calories from carbohydrate
pub const CARBOHYDRATE_SHARE: f64 = 0.55;
/// Share of calories from protein
pub const PROTEIN_SHARE: f64 = 0.20;
/// Share of calories from fat
pub const FAT_SHARE: f64 = 0.25;

/// kcal per gram of carbohydrate
pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
/// kcal per gram of protein
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Percent-of-calories shares for each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacronutrientRatios {
    pub carbohydrate_share: f64,
    pub protein_share: f64,
    pub fat_share: f64,
}

impl MacronutrientRatios {
    /// 55 / 20 / 25 endurance split
    pub const ENDURANCE: MacronutrientRatios = MacronutrientRatios {
        carbohydrate_share: CARBOHYDRATE_SHARE,
        protein_share: PROTEIN_SHARE,
        fat_share: FAT_SHARE,
    };
}

impl Default for MacronutrientRatios {
    fn default() -> Self {
        Self::ENDURANCE
    }
}

/// Split daily energy using the endurance ratios
///
/// Zero or negative energy is passed through and yields zero or negative grams.
pub fn split(daily_energy_kcal: i64) -> MacronutrientSplit {
    split_with(daily_energy_kcal, &MacronutrientRatios::ENDURANCE)
}

/// Split daily energy using custom ratios
pub fn split_with(daily_energy_kcal: i64, ratios: &MacronutrientRatios) -> MacronutrientSplit {
    let kcal = daily_energy_kcal as f64;
    MacronutrientSplit {
        carbohydrate_grams: round_kcal(kcal * ratios.carbohydrate_share / KCAL_PER_GRAM_CARBOHYDRATE),
        protein_grams: round_kcal(kcal * ratios.protein_share / KCAL_PER_GRAM_PROTEIN),
        fat_grams: round_kcal(kcal * ratios.fat_share / KCAL_PER_GRAM_FAT),
    }
}

/// Calories represented by a split, before any rounding drift is reconciled
pub fn split_calories(split: &MacronutrientSplit) -> f64 {
    split.carbohydrate_grams as f64 * KCAL_PER_GRAM_CARBOHYDRATE
        + split.protein_grams as f64 * KCAL_PER_GRAM_PROTEIN
        + split.fat_grams as f64 * KCAL_PER_GRAM_FAT
}
