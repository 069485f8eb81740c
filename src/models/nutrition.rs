//! Calculation results
//!
//! Derived values returned by the energy estimator and the macronutrient
//! splitter. Nothing here is stored; each value lives for one request.

use serde::{Deserialize, Serialize};

/// Energy requirement for a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub basal_metabolic_rate_kcal: f64,
    pub activity_multiplier: f64,
    pub daily_energy_kcal: i64,
}

/// Daily grams of each macronutrient
///
/// Each field is rounded on its own, so the calories they add up to can
/// drift a few kcal from the total they were split from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacronutrientSplit {
    pub carbohydrate_grams: i64,
    pub protein_grams: i64,
    pub fat_grams: i64,
}

impl MacronutrientSplit {
    /// Labelled values in display order (carbohydrate, protein, fat)
    pub fn as_bars(&self) -> [(&'static str, i64); 3] {
        [
            ("Carbohydrates (g)", self.carbohydrate_grams),
            ("Protein (g)", self.protein_grams),
            ("Fat (g)", self.fat_grams),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bars_order() {
        let split = MacronutrientSplit {
            carbohydrate_grams: 372,
            protein_grams: 135,
            fat_grams: 75,
        };
        let bars = split.as_bars();
        assert_eq!(bars[0], ("Carbohydrates (g)", 372));
        assert_eq!(bars[1], ("Protein (g)", 135));
        assert_eq!(bars[2], ("Fat (g)", 75));
    }
}
