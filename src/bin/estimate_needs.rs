//! Print energy needs and macronutrients for a profile
//! Usage: cargo run --bin estimate_needs -- <age> <weight_kg> <height_cm> <sex> <activity> [--strict]

use trifuel::models::{ActivityLevel, AthleteProfile, ProfileError, Sex};
use trifuel::nutrition;

const USAGE: &str =
    "Usage: estimate_needs <age> <weight_kg> <height_cm> <male|female> <light|moderate|high> [--strict]";

fn parse_profile(args: &[String], strict: bool) -> Result<AthleteProfile, Box<dyn std::error::Error>> {
    let [age, weight, height, sex, activity] = args else {
        return Err(USAGE.into());
    };

    let (sex, activity_level) = if strict {
        let sex = Sex::from_str(sex).ok_or_else(|| ProfileError::UnknownLabel {
            field: "sex",
            label: sex.clone(),
        })?;
        let level = ActivityLevel::from_str(activity).ok_or_else(|| ProfileError::UnknownLabel {
            field: "activity level",
            label: activity.clone(),
        })?;
        (sex, level)
    } else {
        (Sex::from_label(sex), ActivityLevel::from_label(activity))
    };

    let profile = AthleteProfile::new(
        age.parse()?,
        weight.parse()?,
        height.parse()?,
        sex,
        activity_level,
    );
    if strict {
        profile.check_form_bounds()?;
    }
    Ok(profile)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let strict = args.iter().any(|a| a == "--strict");
    let positional: Vec<String> = args.into_iter().filter(|a| a != "--strict").collect();

    let profile = parse_profile(&positional, strict)?;
    let estimate = nutrition::estimate_energy(&profile);
    let macros = nutrition::split(estimate.daily_energy_kcal);

    println!("Profile: {} y, {} kg, {} cm, {}, {} activity",
        profile.age_years,
        profile.weight_kg,
        profile.height_cm,
        profile.sex.as_str(),
        profile.activity_level.as_str()
    );
    println!("  BMR: {:.2} kcal/day", estimate.basal_metabolic_rate_kcal);
    println!("  Multiplier: {}", estimate.activity_multiplier);
    println!("  Daily energy: {} kcal/day", estimate.daily_energy_kcal);
    println!("  Carbohydrates: {} g", macros.carbohydrate_grams);
    println!("  Protein: {} g", macros.protein_grams);
    println!("  Fat: {} g", macros.fat_grams);

    Ok(())
}
