//! Version and build stamp
//!
//! `build.rs` stamps a build number and timestamp into the environment;
//! a plain `cargo install` from a tarball may not, so both are optional.

use std::path::Path;

use serde::Serialize;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BUILD_NUMBER_STAMP: Option<&str> = option_env!("TRIFUEL_BUILD_NUMBER");
const BUILD_TIMESTAMP_STAMP: Option<&str> = option_env!("TRIFUEL_BUILD_TIMESTAMP");

/// What the running binary was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: Option<u64>,
    pub build_timestamp: Option<&'static str>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamps(BUILD_NUMBER_STAMP, BUILD_TIMESTAMP_STAMP)
    }

    fn from_stamps(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()),
            build_timestamp: timestamp.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Version string shown to users, e.g. `0.1.0+build.17`
    pub fn label(&self) -> String {
        match self.build_number {
            Some(n) => format!("{}+build.{}", self.version, n),
            None => format!("{} (unstamped)", self.version),
        }
    }
}

/// Print the startup banner to stderr (stdout carries the MCP protocol)
pub fn print_startup_banner(output_dir: &Path) {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Triathlon Fuel {}", info.label());
    if let Some(ts) = info.build_timestamp {
        eprintln!("  Compiled: {}", ts);
    }
    eprintln!("  Output: {}", output_dir.display());
    eprintln!("===============================================");
}
