//! Command-line front end for goalcast_core
//!
//! Reads provider records from a directory, plans a savings goal and renders
//! the result as a text report or JSON.

// ============================================================================
// Modules
// ============================================================================

pub mod logging;
pub mod report;
pub mod source;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use logging::init_logging;
pub use report::Report;
pub use source::DirectorySource;

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use goalcast_core::PlannerConfig;

/// Load a planner configuration from a YAML file.
///
/// Missing sections and fields keep their defaults.
pub fn load_config(path: &Path) -> color_eyre::Result<PlannerConfig> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    parse_config(&content).wrap_err_with(|| format!("invalid config {}", path.display()))
}

/// Parse a YAML planner configuration
pub fn parse_config(yaml: &str) -> Result<PlannerConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}
