//! Output value types for projections, contribution searches and allocation
//! comparisons

use serde::{Deserialize, Serialize};

/// Summary of a Monte Carlo projection
///
/// Monetary fields are truncated to whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Share of trials whose nominal final value met the target, 0-100
    pub success_probability: f64,
    pub mean_final_value: f64,
    pub median_final_value: f64,
    pub p10_final_value: f64,
    pub p90_final_value: f64,
    /// Median final value deflated by cumulative inflation (reporting only)
    pub real_median_final_value: f64,
    pub inflation_factor: f64,
    pub target_amount: f64,
    pub horizon_years: u32,
    pub trials: usize,
    pub monthly_contribution: f64,
    pub equity_allocation: f64,
}

/// How comfortably a contribution fits the user's income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affordability {
    /// At most 30% of income
    Affordable,
    /// At most 50% of income
    Stretch,
    Challenging,
    /// Even the search ceiling misses the target probability
    Insufficient,
}

impl Affordability {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Affordability::Affordable => "Affordable",
            Affordability::Stretch => "Stretch",
            Affordability::Challenging => "Challenging",
            Affordability::Insufficient => "Insufficient",
        }
    }

    /// Affordable or Stretch
    #[must_use]
    pub fn is_actionable(self) -> bool {
        matches!(self, Affordability::Affordable | Affordability::Stretch)
    }
}

/// Minimum monthly contribution for one target success probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub target_probability: f64,
    /// Whole currency units, rounded up
    pub required_contribution: f64,
    pub affordability: Affordability,
    /// Probability the search observed at `required_contribution`
    pub achieved_probability: f64,
    pub contribution_change: f64,
    /// Change relative to the current contribution, one decimal; 0 when there is none
    pub contribution_change_percentage: f64,
    /// Engine evaluations performed by the search
    pub iterations: usize,
}

/// A named equity allocation on the comparison menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPoint {
    pub name: String,
    pub equity_allocation: f64,
}

impl AllocationPoint {
    pub fn new(name: impl Into<String>, equity_allocation: f64) -> Self {
        Self {
            name: name.into(),
            equity_allocation,
        }
    }
}

/// An allocation point together with its projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationScenario {
    pub name: String,
    pub equity_allocation: f64,
    pub result: SimulationResult,
}

impl AllocationScenario {
    #[must_use]
    pub fn success_probability(&self) -> f64 {
        self.result.success_probability
    }
}

/// Ranked allocation scenarios and the gain over the user's current mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationComparison {
    pub current_equity_allocation: f64,
    /// Sorted by descending success probability, ties by lower equity share
    pub scenarios: Vec<AllocationScenario>,
    /// Scenario closest to the current allocation within tolerance
    pub baseline: Option<String>,
    /// Optimal probability minus baseline probability (or minus zero)
    pub probability_improvement: f64,
}

impl AllocationComparison {
    #[must_use]
    pub fn optimal(&self) -> Option<&AllocationScenario> {
        self.scenarios.first()
    }

    #[must_use]
    pub fn baseline_scenario(&self) -> Option<&AllocationScenario> {
        let name = self.baseline.as_deref()?;
        self.scenarios.iter().find(|s| s.name == name)
    }
}
