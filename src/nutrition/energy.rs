//! Energy estimation
//!
//! Basal metabolic rate via the Mifflin-St Jeor equation, scaled by an
//! activity multiplier to estimate total daily energy expenditure.

use crate::models::{ActivityLevel, AthleteProfile, EnergyEstimate, Sex};

/// kcal per kg of body weight
pub const WEIGHT_COEFFICIENT: f64 = 10.0;
/// kcal per cm of height
pub const HEIGHT_COEFFICIENT: f64 = 6.25;
/// kcal per year of age (subtracted)
pub const AGE_COEFFICIENT: f64 = 5.0;
/// Constant term for men
pub const MALE_OFFSET: f64 = 5.0;
/// Constant term for women
pub const FEMALE_OFFSET: f64 = -161.0;

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// Defined for any input; range checks belong to whoever collects the input.
pub fn estimate_basal_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
) -> f64 {
    let offset = match sex {
        Sex::Male => MALE_OFFSET,
        Sex::Female => FEMALE_OFFSET,
    };
    WEIGHT_COEFFICIENT * weight_kg + HEIGHT_COEFFICIENT * height_cm
        - AGE_COEFFICIENT * age_years as f64
        + offset
}

/// Look up the multiplier for a raw activity label
///
/// Unrecognized labels get the sedentary multiplier (1.2) instead of an error.
pub fn activity_multiplier(label: &str) -> f64 {
    ActivityLevel::from_label(label).multiplier()
}

/// Calculate BMR, the multiplier used, and the rounded daily energy
pub fn estimate_energy(profile: &AthleteProfile) -> EnergyEstimate {
    let bmr = estimate_basal_metabolic_rate(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.sex,
    );
    let multiplier = profile.activity_level.multiplier();
    let daily_energy_kcal = round_kcal(bmr * multiplier);

    tracing::debug!(
        bmr,
        multiplier,
        daily_energy_kcal,
        "Estimated daily energy"
    );

    EnergyEstimate {
        basal_metabolic_rate_kcal: bmr,
        activity_multiplier: multiplier,
        daily_energy_kcal,
    }
}

/// Total daily energy expenditure in whole kcal
pub fn estimate_daily_energy(profile: &AthleteProfile) -> i64 {
    estimate_energy(profile).daily_energy_kcal
}

/// Round to the nearest whole number, halves away from zero
pub(crate) fn round_kcal(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(weight_kg: f64, sex: Sex, activity_level: ActivityLevel) -> AthleteProfile {
        AthleteProfile::new(25, weight_kg, 175.0, sex, activity_level)
    }

    #[test]
    fn test_bmr_male() {
        // 700 + 1093.75 - 125 + 5
        let bmr = estimate_basal_metabolic_rate(70.0, 175.0, 25, Sex::Male);
        assert_eq!(bmr, 1673.75);

        let bmr = estimate_basal_metabolic_rate(77.0, 175.0, 25, Sex::Male);
        assert_eq!(bmr, 1743.75);
    }

    #[test]
    fn test_bmr_female() {
        // 700 + 1093.75 - 125 - 161
        let bmr = estimate_basal_metabolic_rate(70.0, 175.0, 25, Sex::Female);
        assert_eq!(bmr, 1507.75);
    }

    #[test]
    fn test_bmr_has_no_domain_checks() {
        let bmr = estimate_basal_metabolic_rate(0.0, 0.0, 100, Sex::Female);
        assert_eq!(bmr, -661.0);
    }

    #[test]
    fn test_daily_energy_moderate() {
        // 1743.75 × 1.55 = 2702.8125
        let kcal = estimate_daily_energy(&profile(77.0, Sex::Male, ActivityLevel::Moderate));
        assert_eq!(kcal, 2703);

        // 1673.75 × 1.55 = 2594.3125
        let kcal = estimate_daily_energy(&profile(70.0, Sex::Male, ActivityLevel::Moderate));
        assert_eq!(kcal, 2594);
    }

    #[test]
    fn test_daily_energy_light_and_high() {
        // 1507.75 × 1.375 = 2073.15625
        let kcal = estimate_daily_energy(&profile(70.0, Sex::Female, ActivityLevel::Light));
        assert_eq!(kcal, 2073);

        // 1673.75 × 1.725 = 2887.21875
        let kcal = estimate_daily_energy(&profile(70.0, Sex::Male, ActivityLevel::High));
        assert_eq!(kcal, 2887);
    }

    #[test]
    fn test_unknown_activity_uses_sedentary_and_rounds_half_up() {
        assert_eq!(activity_multiplier("couch"), 1.2);

        // 1743.75 × 1.2 = 2092.5 exactly; halves round away from zero
        let level = ActivityLevel::from_label("couch");
        let kcal = estimate_daily_energy(&profile(77.0, Sex::Male, level));
        assert_eq!(kcal, 2093);
    }

    #[test]
    fn test_estimate_energy_breakdown() {
        let estimate = estimate_energy(&profile(70.0, Sex::Female, ActivityLevel::High));
        assert_eq!(estimate.basal_metabolic_rate_kcal, 1507.75);
        assert_eq!(estimate.activity_multiplier, 1.725);
        assert_eq!(estimate.daily_energy_kcal, 2601);
    }

    #[test]
    fn test_round_kcal() {
        assert_eq!(round_kcal(2092.5), 2093);
        assert_eq!(round_kcal(2092.49), 2092);
        assert_eq!(round_kcal(-55.5), -56);
        assert_eq!(round_kcal(0.0), 0);
    }

    proptest! {
        /// Property: identical profiles always produce identical energy
        #[test]
        fn prop_daily_energy_deterministic(
            age in 15u32..=80,
            weight in 40.0f64..120.0,
            height in 140.0f64..210.0,
            male in any::<bool>(),
            level in 0usize..3
        ) {
            let sex = if male { Sex::Male } else { Sex::Female };
            let p = AthleteProfile::new(age, weight, height, sex, ActivityLevel::CHOICES[level]);
            prop_assert_eq!(estimate_daily_energy(&p), estimate_daily_energy(&p.clone()));
        }

        /// Property: men get exactly 166 kcal more BMR than women with the same biometrics
        #[test]
        fn prop_sex_offset(
            age in 15u32..=80,
            weight in 40.0f64..120.0,
            height in 140.0f64..210.0
        ) {
            let male = estimate_basal_metabolic_rate(weight, height, age, Sex::Male);
            let female = estimate_basal_metabolic_rate(weight, height, age, Sex::Female);
            prop_assert!((male - female - 166.0).abs() < 1e-9);
        }

        /// Property: higher activity never lowers the estimate
        #[test]
        fn prop_activity_monotonic(
            age in 15u32..=80,
            weight in 40.0f64..120.0,
            height in 140.0f64..210.0
        ) {
            let kcal = |level| estimate_daily_energy(&AthleteProfile::new(age, weight, height, Sex::Female, level));
            prop_assert!(kcal(ActivityLevel::Sedentary) <= kcal(ActivityLevel::Light));
            prop_assert!(kcal(ActivityLevel::Light) <= kcal(ActivityLevel::Moderate));
            prop_assert!(kcal(ActivityLevel::Moderate) <= kcal(ActivityLevel::High));
        }
    }
}
