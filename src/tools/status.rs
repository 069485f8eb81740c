//! trifuel Status Tool
//!
//! Provides runtime status information and usage instructions.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# Triathlon Fuel Instructions

Triathlon Fuel estimates daily energy needs for endurance athletes and splits
them into macronutrients.

## Collecting the Profile

Ask the athlete for:

| Field | Range | Notes |
|-------|-------|-------|
| first_name, last_name | text | Optional, both needed for the greeting |
| age_years | 15 - 80 | Whole years |
| weight_kg | 40 - 120 | Kilograms |
| height_cm | 140 - 210 | Centimeters |
| sex | male / female | Anything not recognizably male is treated as female |
| activity_level | light / moderate / high | Unrecognized values use the sedentary multiplier 1.2 |

Values outside the ranges are rejected by `calculate_needs` and
`generate_nutrition_report`. `estimate_bmr` applies the raw formula with no
range checks.

## How Energy is Estimated

1. BMR (Mifflin-St Jeor):
   - Men: 10 x weight + 6.25 x height - 5 x age + 5
   - Women: 10 x weight + 6.25 x height - 5 x age - 161
2. Daily energy = BMR x activity multiplier, rounded to whole kcal
   (halves round up):
   - light 1.375, moderate 1.55, high 1.725, unrecognized 1.2

## Macronutrient Split

55% carbohydrate, 20% protein, 25% fat of daily calories, converted at
4 kcal/g (carbohydrate, protein) and 9 kcal/g (fat). Each value is rounded on
its own, so the grams can add back up to a few kcal more or less than the total.

## Performance Simulation

`simulate_performance` returns random endurance, strength and recovery scores.
They are NOT measurements. Pass a `seed` for a reproducible draw.

## Artifacts

Charts (PNG) and reports (PDF) are written to the output directory unless an
absolute path is given.

- `save_macro_chart` - bar chart of macronutrient grams
- `save_performance_chart` - bar chart of simulated scores
- `generate_nutrition_report` - PDF with everything above (continues on a second page when needed)
"#;

/// Runtime status of the trifuel service
#[derive(Debug, Clone, Serialize)]
pub struct TrifuelStatus {
    /// Build information
    pub version: String,
    pub build_number: Option<u64>,
    pub build_timestamp: Option<&'static str>,

    /// Where charts and reports go
    pub output_dir: String,
    pub output_dir_exists: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    output_dir: PathBuf,
}

impl StatusTracker {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            output_dir,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> TrifuelStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TrifuelStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.label(),
            output_dir: self.output_dir.display().to_string(),
            output_dir_exists: self.output_dir.is_dir(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
