//! Calculator tools
//!
//! Turns raw tool input into an `AthleteProfile`, runs the nutrition core
//! and shapes serializable responses.

use std::path::Path;

use serde::Serialize;

use crate::models::{
    ActivityLevel, AthleteProfile, MacronutrientSplit, PerformanceSnapshot, Sex,
};
use crate::nutrition::{self, MacronutrientRatios};
use crate::simulation::PerformanceSimulator;
use crate::tools::charts;

/// Advice shown with every result
pub const HYDRATION_TIP: &str = "Health tip: drink well before, during and after exercise. \
Good hydration improves muscle recovery and reduces fatigue.";

/// Shown with every simulation so nobody mistakes it for a measurement
pub const SIMULATION_DISCLAIMER: &str =
    "Scores are uniformly random and do not measure athletic performance.";

// ============================================================================
// Response Types
// ============================================================================

/// A profile built from raw input, with a note on how the activity label resolved
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedProfile {
    pub profile: AthleteProfile,
    pub activity_label: String,
    pub activity_label_recognized: bool,
}

/// Response for calculate_needs
#[derive(Debug, Serialize)]
pub struct NeedsResponse {
    pub greeting: Option<String>,
    pub profile: AthleteProfile,
    pub activity_label_recognized: bool,
    pub basal_metabolic_rate_kcal: f64,
    pub activity_multiplier: f64,
    pub daily_energy_kcal: i64,
    pub macronutrients: Option<MacronutrientSplit>,
    pub hydration_tip: &'static str,
    pub message: String,
}

/// Response for estimate_bmr
#[derive(Debug, Serialize)]
pub struct BmrResponse {
    pub sex: Sex,
    pub basal_metabolic_rate_kcal: f64,
}

/// Response for split_macros
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub daily_energy_kcal: i64,
    pub ratios: MacronutrientRatios,
    pub macronutrients: MacronutrientSplit,
    /// Calories the rounded grams add back up to
    pub represented_kcal: f64,
    pub drift_kcal: f64,
}

/// Response for simulate_performance
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub seed: Option<u64>,
    pub scores: PerformanceSnapshot,
    pub disclaimer: &'static str,
}

/// Response for chart tools
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub success: bool,
    pub file_path: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
}

// ============================================================================
// Input Handling
// ============================================================================

/// Greeting shown once both names are filled in
pub fn welcome_message(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let first = first_name.map(str::trim).filter(|s| !s.is_empty())?;
    let last = last_name.map(str::trim).filter(|s| !s.is_empty())?;
    Some(format!(
        "Hello {} {}, welcome to your personalized nutrition assistant!",
        first, last
    ))
}

/// Build a profile from raw input and apply the form's range bounds
pub fn resolve_profile(
    age_years: u32,
    weight_kg: f64,
    height_cm: f64,
    sex: &str,
    activity_level: &str,
) -> Result<ResolvedProfile, String> {
    let activity_label_recognized = ActivityLevel::from_str(activity_level).is_some();
    let profile = AthleteProfile::new(
        age_years,
        weight_kg,
        height_cm,
        Sex::from_label(sex),
        ActivityLevel::from_label(activity_level),
    );
    profile.check_form_bounds().map_err(|e| e.to_string())?;

    Ok(ResolvedProfile {
        profile,
        activity_label: activity_level.to_string(),
        activity_label_recognized,
    })
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Estimate daily energy (and optionally macros) for a resolved profile
pub fn calculate_needs(
    resolved: &ResolvedProfile,
    first_name: Option<&str>,
    last_name: Option<&str>,
    include_macros: bool,
) -> NeedsResponse {
    let estimate = nutrition::estimate_energy(&resolved.profile);
    let macronutrients = include_macros.then(|| nutrition::split(estimate.daily_energy_kcal));
    let greeting = welcome_message(first_name, last_name);

    let mut message = format!(
        "Estimated energy needs: {} kcal/day",
        estimate.daily_energy_kcal
    );
    if !resolved.activity_label_recognized {
        message.push_str(&format!(
            " (activity level '{}' not recognized, sedentary multiplier used)",
            resolved.activity_label
        ));
    }

    tracing::info!(
        daily_energy_kcal = estimate.daily_energy_kcal,
        activity_level = resolved.profile.activity_level.as_str(),
        "Calculated needs"
    );

    NeedsResponse {
        greeting,
        profile: resolved.profile.clone(),
        activity_label_recognized: resolved.activity_label_recognized,
        basal_metabolic_rate_kcal: estimate.basal_metabolic_rate_kcal,
        activity_multiplier: estimate.activity_multiplier,
        daily_energy_kcal: estimate.daily_energy_kcal,
        macronutrients,
        hydration_tip: HYDRATION_TIP,
        message,
    }
}

/// Raw Mifflin-St Jeor BMR with no range checks
pub fn estimate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: &str) -> BmrResponse {
    let sex = Sex::from_label(sex);
    BmrResponse {
        sex,
        basal_metabolic_rate_kcal: nutrition::estimate_basal_metabolic_rate(
            weight_kg, height_cm, age_years, sex,
        ),
    }
}

/// Split a daily energy total into macronutrient grams
pub fn split_macros(daily_energy_kcal: i64) -> SplitResponse {
    let macronutrients = nutrition::split(daily_energy_kcal);
    let represented_kcal = nutrition::split_calories(&macronutrients);
    SplitResponse {
        daily_energy_kcal,
        ratios: MacronutrientRatios::ENDURANCE,
        macronutrients,
        represented_kcal,
        drift_kcal: represented_kcal - daily_energy_kcal as f64,
    }
}

fn simulator(seed: Option<u64>) -> PerformanceSimulator {
    match seed {
        Some(seed) => PerformanceSimulator::new(seed),
        None => PerformanceSimulator::from_entropy(),
    }
}

/// Draw simulated performance scores
pub fn simulate_performance(seed: Option<u64>) -> SimulationResponse {
    let mut sim = simulator(seed);
    SimulationResponse {
        seed: sim.seed(),
        scores: sim.simulate(),
        disclaimer: SIMULATION_DISCLAIMER,
    }
}

/// Render the macronutrient chart for a daily energy total and write it as PNG
pub fn save_macro_chart(
    daily_energy_kcal: i64,
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<ChartResponse, String> {
    let split = nutrition::split(daily_energy_kcal);
    let png = charts::generate_macro_chart(&split, width, height).map_err(|e| e.to_string())?;
    write_chart(&png, output_path, width, height)
}

/// Render a simulated performance chart and write it as PNG
pub fn save_performance_chart(
    seed: Option<u64>,
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<ChartResponse, String> {
    let snapshot = simulator(seed).simulate();
    let png =
        charts::generate_performance_chart(&snapshot, width, height).map_err(|e| e.to_string())?;
    write_chart(&png, output_path, width, height)
}

fn write_chart(
    png: &[u8],
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<ChartResponse, String> {
    charts::save_png(png, output_path).map_err(|e| e.to_string())?;
    tracing::info!("Wrote chart to {}", output_path.display());
    Ok(ChartResponse {
        success: true,
        file_path: output_path.display().to_string(),
        width,
        height,
        size_bytes: png.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_message_needs_both_names() {
        assert_eq!(
            welcome_message(Some("Ada"), Some("Lovelace")).as_deref(),
            Some("Hello Ada Lovelace, welcome to your personalized nutrition assistant!")
        );
        assert_eq!(welcome_message(Some("Ada"), None), None);
        assert_eq!(welcome_message(None, Some("Lovelace")), None);
        assert_eq!(welcome_message(Some("  "), Some("Lovelace")), None);
    }

    #[test]
    fn test_resolve_profile_labels() {
        let resolved = resolve_profile(25, 70.0, 175.0, "Homme", "modéré").unwrap();
        assert_eq!(resolved.profile.sex, Sex::Male);
        assert_eq!(resolved.profile.activity_level, ActivityLevel::Moderate);
        assert!(resolved.activity_label_recognized);

        let resolved = resolve_profile(25, 70.0, 175.0, "female", "marathon").unwrap();
        assert_eq!(resolved.profile.sex, Sex::Female);
        assert_eq!(resolved.profile.activity_level, ActivityLevel::Sedentary);
        assert!(!resolved.activity_label_recognized);
    }

    #[test]
    fn test_resolve_profile_enforces_form_bounds() {
        let err = resolve_profile(25, 35.0, 175.0, "male", "light").unwrap_err();
        assert_eq!(err, "weight_kg must be between 40 and 120, got 35");

        let err = resolve_profile(81, 70.0, 175.0, "male", "light").unwrap_err();
        assert!(err.starts_with("age_years"));
    }

    #[test]
    fn test_calculate_needs_with_macros() {
        let resolved = resolve_profile(25, 77.0, 175.0, "male", "moderate").unwrap();
        let resp = calculate_needs(&resolved, Some("Ada"), Some("Lovelace"), true);
        assert_eq!(resp.basal_metabolic_rate_kcal, 1743.75);
        assert_eq!(resp.activity_multiplier, 1.55);
        assert_eq!(resp.daily_energy_kcal, 2703);
        assert_eq!(
            resp.macronutrients,
            Some(MacronutrientSplit {
                carbohydrate_grams: 372,
                protein_grams: 135,
                fat_grams: 75,
            })
        );
        assert!(resp.greeting.is_some());
        assert_eq!(resp.message, "Estimated energy needs: 2703 kcal/day");
    }

    #[test]
    fn test_calculate_needs_flags_fallback() {
        let resolved = resolve_profile(25, 77.0, 175.0, "male", "couch").unwrap();
        let resp = calculate_needs(&resolved, None, None, false);
        assert_eq!(resp.daily_energy_kcal, 2093);
        assert_eq!(resp.macronutrients, None);
        assert_eq!(resp.greeting, None);
        assert!(!resp.activity_label_recognized);
        assert!(resp.message.contains("'couch' not recognized"));
    }

    #[test]
    fn test_estimate_bmr_unbounded() {
        let resp = estimate_bmr(70.0, 175.0, 25, "female");
        assert_eq!(resp.basal_metabolic_rate_kcal, 1507.75);

        // Outside the form bounds is still computed
        let resp = estimate_bmr(200.0, 175.0, 25, "male");
        assert_eq!(resp.basal_metabolic_rate_kcal, 2973.75);
    }

    #[test]
    fn test_split_macros_reports_drift() {
        let resp = split_macros(2594);
        assert_eq!(resp.macronutrients.carbohydrate_grams, 357);
        assert_eq!(resp.represented_kcal, 2596.0);
        assert_eq!(resp.drift_kcal, 2.0);
    }

    #[test]
    fn test_simulate_performance_seeded() {
        let a = simulate_performance(Some(2025));
        let b = simulate_performance(Some(2025));
        assert_eq!(a.seed, Some(2025));
        assert_eq!(a.scores, b.scores);
        assert_eq!(simulate_performance(None).seed, None);
    }

    #[test]
    fn test_save_macro_chart_rejects_negative_energy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macros.png");
        let err = save_macro_chart(-100, &path, 800, 500).unwrap_err();
        assert!(err.contains("negative"));
        assert!(!path.exists());
    }
}
