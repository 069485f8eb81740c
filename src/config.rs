//! Runtime configuration
//!
//! Everything is read from the environment; there is no config file.

use std::path::{Path, PathBuf};

/// Environment variable overriding the artifact output directory
pub const OUTPUT_DIR_ENV: &str = "TRIFUEL_OUTPUT_DIR";

/// Default tracing directive when RUST_LOG is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "trifuel=info";

/// Get the directory charts and reports are written to
///
/// Uses `TRIFUEL_OUTPUT_DIR` when set, otherwise `output/` in the project
/// root (walking up out of `target/debug` or `target/release`).
pub fn get_output_dir() -> PathBuf {
    std::env::var(OUTPUT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));
            default_output_dir(&exe_dir)
        })
}

fn default_output_dir(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("output");
    path
}

/// Resolve a caller-supplied artifact path
///
/// Relative paths land inside the output directory; absolute paths are kept.
pub fn resolve_output_path(output_dir: &Path, requested: &str) -> PathBuf {
    let requested = Path::new(requested);
    if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        output_dir.join(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_leaves_target() {
        let dir = default_output_dir(Path::new("/work/trifuel/target/release"));
        assert_eq!(dir, PathBuf::from("/work/trifuel/output"));

        let dir = default_output_dir(Path::new("/opt/trifuel/bin"));
        assert_eq!(dir, PathBuf::from("/opt/trifuel/bin/output"));
    }

    #[test]
    fn test_resolve_output_path() {
        let base = Path::new("/data/out");
        assert_eq!(
            resolve_output_path(base, "report.pdf"),
            PathBuf::from("/data/out/report.pdf")
        );
        assert_eq!(
            resolve_output_path(base, "/tmp/report.pdf"),
            PathBuf::from("/tmp/report.pdf")
        );
    }
}
