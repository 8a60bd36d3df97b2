//! Logging setup for the `forma` binary.
//!
//! Logs go to stderr so that JSON written to stdout stays parseable.
//!
//! ## Environment Variables
//!
//! 1. **`FORMA_LOG`** (highest priority) - forma-specific logging control
//! 2. **`RUST_LOG`** - standard tracing environment variable
//! 3. **Default** - `warn` everywhere

use std::env;
use tracing_subscriber::EnvFilter;

/// Crates whose logs `FORMA_LOG=<level>` turns up.
const CRATES: &[&str] = &[
    "forma",
    "api",
    "element",
    "interchange",
    "render",
    "store",
    "submission",
];

/// Initialize logging. `verbose` raises the default to `debug` when no
/// environment variable is set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = create_filter(verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_filter(verbose: bool) -> EnvFilter {
    if let Ok(forma_log) = env::var("FORMA_LOG") {
        return expand_forma_log(&forma_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    if verbose {
        return expand_forma_log("debug");
    }

    EnvFilter::new("warn")
}

/// `FORMA_LOG=debug` becomes `warn,forma=debug,api=debug,...`. Values with
/// directive syntax are used as-is.
fn expand_forma_log(level: &str) -> EnvFilter {
    EnvFilter::new(directives(level))
}

fn directives(level: &str) -> String {
    if level.contains('=') || level.contains(':') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = String::from("warn");
    for name in CRATES {
        directives.push_str(&format!(",{name}={level}"));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_expands_to_workspace_crates() {
        let expanded = directives("debug");
        assert!(expanded.starts_with("warn,"));
        assert!(expanded.contains("store=debug"));
        assert!(expanded.contains("submission=debug"));
    }

    #[test]
    fn directive_syntax_is_kept() {
        assert_eq!(directives("store=trace"), "store=trace");
        assert_eq!(directives("info,render=off"), "info,render=off");
    }
}
