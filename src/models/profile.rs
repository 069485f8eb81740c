//! Athlete profile model
//!
//! Biometric inputs for one calculation request, plus the activity level
//! table used to scale basal metabolic rate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Form Bounds
// ============================================================================

/// Youngest age accepted by the input form
pub const MIN_AGE_YEARS: u32 = 15;
/// Oldest age accepted by the input form
pub const MAX_AGE_YEARS: u32 = 80;
/// Lightest weight accepted by the input form (kg)
pub const MIN_WEIGHT_KG: f64 = 40.0;
/// Heaviest weight accepted by the input form (kg)
pub const MAX_WEIGHT_KG: f64 = 120.0;
/// Shortest height accepted by the input form (cm)
pub const MIN_HEIGHT_CM: f64 = 140.0;
/// Tallest height accepted by the input form (cm)
pub const MAX_HEIGHT_CM: f64 = 210.0;

// ============================================================================
// Activity Multipliers
// ============================================================================

/// Multiplier for unrecognized activity levels (sedentary)
pub const SEDENTARY_MULTIPLIER: f64 = 1.2;
/// Multiplier for light activity
pub const LIGHT_MULTIPLIER: f64 = 1.375;
/// Multiplier for moderate activity
pub const MODERATE_MULTIPLIER: f64 = 1.55;
/// Multiplier for high activity
pub const HIGH_MULTIPLIER: f64 = 1.725;

/// Profile validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unrecognized {field}: '{label}'")]
    UnknownLabel { field: &'static str, label: String },
}

/// Biological sex, used only to pick the BMR constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Strict parse; unknown labels yield None
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "homme" => Some(Sex::Male),
            "female" | "f" | "woman" | "femme" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Lenient parse: anything that is not recognizably male is treated as female
    pub fn from_label(s: &str) -> Self {
        Self::from_str(s).unwrap_or(Sex::Female)
    }
}

/// Physical activity level
///
/// `Sedentary` is never offered as a choice; it is what an unrecognized
/// activity label resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    High,
}

impl ActivityLevel {
    /// The levels a user can choose from
    pub const CHOICES: [ActivityLevel; 3] =
        [ActivityLevel::Light, ActivityLevel::Moderate, ActivityLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
        }
    }

    /// Strict parse of one of the selectable levels
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" | "léger" | "leger" => Some(ActivityLevel::Light),
            "moderate" | "modéré" | "modere" => Some(ActivityLevel::Moderate),
            "high" | "élevé" | "eleve" => Some(ActivityLevel::High),
            _ => None,
        }
    }

    /// Lenient parse: unrecognized labels fall back to sedentary
    pub fn from_label(s: &str) -> Self {
        match Self::from_str(s) {
            Some(level) => level,
            None => {
                tracing::warn!(
                    "Unrecognized activity level '{}'. Using sedentary multiplier {}.",
                    s,
                    SEDENTARY_MULTIPLIER
                );
                ActivityLevel::Sedentary
            }
        }
    }

    /// Multiplier applied to BMR to get daily energy expenditure
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Light => LIGHT_MULTIPLIER,
            ActivityLevel::Moderate => MODERATE_MULTIPLIER,
            ActivityLevel::High => HIGH_MULTIPLIER,
            ActivityLevel::Sedentary => SEDENTARY_MULTIPLIER,
        }
    }
}

/// Biometric inputs for a single calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub age_years: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
}

impl AthleteProfile {
    pub fn new(
        age_years: u32,
        weight_kg: f64,
        height_cm: f64,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            age_years,
            weight_kg,
            height_cm,
            sex,
            activity_level,
        }
    }

    /// Check the profile against the input form's slider bounds
    ///
    /// The estimator itself accepts any value; this is for callers that
    /// collect raw input and want the same limits the form imposed.
    pub fn check_form_bounds(&self) -> Result<(), ProfileError> {
        check_range(
            "age_years",
            self.age_years as f64,
            MIN_AGE_YEARS as f64,
            MAX_AGE_YEARS as f64,
        )?;
        check_range("weight_kg", self.weight_kg, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        check_range("height_cm", self.height_cm, MIN_HEIGHT_CM, MAX_HEIGHT_CM)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ProfileError> {
    // NaN fails this check
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
