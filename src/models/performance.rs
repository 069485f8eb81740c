//! Simulated performance scores
//!
//! These are random placeholders and carry no athletic meaning.

use serde::{Deserialize, Serialize};

/// One draw of simulated capacity scores, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub endurance_pct: u32,
    pub strength_pct: u32,
    pub recovery_pct: u32,
}

impl PerformanceSnapshot {
    /// Labelled values in display order
    pub fn as_bars(&self) -> [(&'static str, u32); 3] {
        [
            ("Endurance", self.endurance_pct),
            ("Strength", self.strength_pct),
            ("Recovery", self.recovery_pct),
        ]
    }
}
