//! Optimization configuration types
//!
//! Search bounds and probability menu for the contribution solver, and the
//! allocation menu for the comparator.

use serde::{Deserialize, Serialize};

use crate::model::AllocationPoint;

/// Settings for the minimum-contribution binary search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Lower search bound (monthly currency units)
    #[serde(default = "default_minimum_contribution")]
    pub minimum_contribution: f64,

    /// Upper search bound as a fraction of monthly income
    #[serde(default = "default_max_income_fraction")]
    pub max_income_fraction: f64,

    /// Number of bisection steps
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Monte Carlo trials per evaluation during the search
    #[serde(default = "default_search_trials")]
    pub search_trials: usize,

    /// Success probabilities (percent) to solve for
    #[serde(default = "default_target_probabilities")]
    pub target_probabilities: Vec<f64>,

    /// Contributions up to this share of income are affordable
    #[serde(default = "default_affordable_fraction")]
    pub affordable_fraction: f64,

    /// Contributions up to this share of income are a stretch
    #[serde(default = "default_stretch_fraction")]
    pub stretch_fraction: f64,
}

fn default_minimum_contribution() -> f64 {
    1000.0
}

fn default_max_income_fraction() -> f64 {
    0.8
}

fn default_iterations() -> usize {
    20
}

fn default_search_trials() -> usize {
    1000
}

fn default_target_probabilities() -> Vec<f64> {
    vec![50.0, 70.0, 85.0, 95.0]
}

fn default_affordable_fraction() -> f64 {
    0.3
}

fn default_stretch_fraction() -> f64 {
    0.5
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            minimum_contribution: default_minimum_contribution(),
            max_income_fraction: default_max_income_fraction(),
            iterations: default_iterations(),
            search_trials: default_search_trials(),
            target_probabilities: default_target_probabilities(),
            affordable_fraction: default_affordable_fraction(),
            stretch_fraction: default_stretch_fraction(),
        }
    }
}

/// Settings for the allocation comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Named equity allocations to evaluate
    #[serde(default = "default_menu")]
    pub menu: Vec<AllocationPoint>,

    /// Maximum distance (percentage points, exclusive) for a menu point to
    /// count as the user's current allocation
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Monte Carlo trials per scenario
    #[serde(default = "default_trials")]
    pub trials: usize,
}

fn default_menu() -> Vec<AllocationPoint> {
    vec![
        AllocationPoint::new("Conservative", 30.0),
        AllocationPoint::new("Moderate", 50.0),
        AllocationPoint::new("Balanced", 70.0),
        AllocationPoint::new("Aggressive", 85.0),
        AllocationPoint::new("Very Aggressive", 95.0),
    ]
}

fn default_tolerance() -> f64 {
    5.0
}

fn default_trials() -> usize {
    5000
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            menu: default_menu(),
            tolerance: default_tolerance(),
            trials: default_trials(),
        }
    }
}
