//! Planner configuration
//!
//! Every knob of the planning pipeline lives in [`PlannerConfig`]. All fields
//! carry serde defaults, so a partial YAML or JSON document only overrides what
//! it names:
//!
//! ```ignore
//! let config: PlannerConfig = serde_json::from_str(r#"{
//!     "simulation": { "trials": 10000, "seed": 7 },
//!     "solver": { "target_probabilities": [60.0, 90.0] }
//! }"#)?;
//! ```
//!
//! # Builder DSL
//!
//! Validated [`SimulationParameters`](crate::model::SimulationParameters) can be
//! assembled fluently:
//!
//! ```ignore
//! let params = GoalBuilder::new()
//!     .ages(30, 40)
//!     .target(5_000_000.0)
//!     .portfolio(1_000_000.0)
//!     .monthly(25_000.0)
//!     .equity(70.0)
//!     .build()?;
//! ```

mod builder;

pub use builder::GoalBuilder;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::model::MarketAssumptions;
use crate::optimization::{AllocationConfig, SolverConfig};

/// Trial count and seeding for top-level projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of Monte Carlo trials for reported projections
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Fixed seed for reproducible runs; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> usize {
    5000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Random source for a request: seeded when `seed` is set
    #[must_use]
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

/// Heuristics used to estimate monthly income from bank credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeConfig {
    /// Lowercase narration substrings that mark a salary credit
    #[serde(default = "default_salary_keywords")]
    pub salary_keywords: Vec<String>,

    /// Credits above this amount may stand in for salary
    #[serde(default = "default_large_credit_threshold")]
    pub large_credit_threshold: f64,

    /// Income assumed when no signal is found; `None` turns the fallback off
    #[serde(default = "default_income")]
    pub default_income: Option<f64>,
}

fn default_salary_keywords() -> Vec<String> {
    ["salary", "sal", "pay"].map(String::from).to_vec()
}

fn default_large_credit_threshold() -> f64 {
    50_000.0
}

fn default_income() -> Option<f64> {
    Some(75_000.0)
}

impl Default for IncomeConfig {
    fn default() -> Self {
        Self {
            salary_keywords: default_salary_keywords(),
            large_credit_threshold: default_large_credit_threshold(),
            default_income: default_income(),
        }
    }
}

/// Thresholds for turning results into recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Minimum probability gain (points) before a contribution change is suggested
    #[serde(default = "default_materiality")]
    pub contribution_materiality: f64,

    /// Minimum probability gain (points) before an allocation change is suggested
    #[serde(default = "default_materiality")]
    pub allocation_materiality: f64,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_materiality() -> f64 {
    5.0
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            contribution_materiality: default_materiality(),
            allocation_materiality: default_materiality(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Complete configuration for a planning request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub market: MarketAssumptions,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub income: IncomeConfig,
    #[serde(default)]
    pub insights: InsightConfig,
}
