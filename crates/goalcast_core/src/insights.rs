//! Insight synthesis
//!
//! Pure, deterministic mapping from projection, solver and comparator output
//! to a feasibility verdict, ranked recommendations, risk flags and a fixed
//! checklist of action items.

use serde::{Deserialize, Serialize};

use crate::config::InsightConfig;
use crate::format::{format_currency, format_percentage};
use crate::model::{AllocationComparison, Recommendation, SimulationResult};

/// Feasibility tier derived from the current success probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feasibility {
    /// 85% and above
    HighlyAchievable,
    /// 70% and above
    Achievable,
    /// 50% and above
    ModeratelyChallenging,
    RequiresSignificantChange,
}

impl Feasibility {
    #[must_use]
    pub fn from_probability(success_probability: f64) -> Self {
        if success_probability >= 85.0 {
            Feasibility::HighlyAchievable
        } else if success_probability >= 70.0 {
            Feasibility::Achievable
        } else if success_probability >= 50.0 {
            Feasibility::ModeratelyChallenging
        } else {
            Feasibility::RequiresSignificantChange
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Feasibility::HighlyAchievable => "Highly Achievable",
            Feasibility::Achievable => "Achievable with Discipline",
            Feasibility::ModeratelyChallenging => "Moderately Challenging",
            Feasibility::RequiresSignificantChange => "Requires Significant Changes",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Feasibility::HighlyAchievable => {
                "Your current strategy has a high probability of success."
            }
            Feasibility::Achievable => "Good probability with consistent investing.",
            Feasibility::ModeratelyChallenging => "Requires optimization of strategy.",
            Feasibility::RequiresSignificantChange => {
                "Current strategy needs major adjustments."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlag {
    /// Success probability below 70%
    LowSuccessProbability,
    /// 10th percentile outcome below 70% of the target
    MarketSensitivity,
}

impl RiskFlag {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            RiskFlag::LowSuccessProbability => "Low success probability with current strategy",
            RiskFlag::MarketSensitivity => "High sensitivity to market downturns",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    IncreaseContribution,
    OptimizeAllocation,
}

/// A suggested change with its expected probability gain (points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecommendation {
    pub kind: RecommendationKind,
    pub improvement: f64,
    pub message: String,
}

/// Headline figures for the goal as currently planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub success_probability: f64,
    pub target_amount: f64,
    pub years_to_goal: u32,
    pub median_final_value: f64,
    /// One-line verdict for display
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInsights {
    pub feasibility: Feasibility,
    /// Largest improvement first
    pub recommendations: Vec<ActionRecommendation>,
    pub risk_flags: Vec<RiskFlag>,
    pub action_items: Vec<String>,
    pub summary: GoalSummary,
}

const ROUTINE_ACTIONS: [&str; 3] = [
    "Review and adjust SIP amount quarterly",
    "Monitor portfolio allocation and rebalance annually",
    "Consider increasing SIP with salary increments",
];

const LOW_PROBABILITY_ACTION: &str = "Consider extending timeline or reducing target amount";

/// Turn analysis results into user-facing guidance
pub fn synthesize(
    result: &SimulationResult,
    recommendations: &[Recommendation],
    comparison: &AllocationComparison,
    config: &InsightConfig,
) -> GoalInsights {
    let probability = result.success_probability;
    let feasibility = Feasibility::from_probability(probability);

    let mut suggestions = Vec::new();

    // Most ambitious target that is still affordable
    let contribution = recommendations
        .iter()
        .filter(|r| r.affordability.is_actionable())
        .max_by(|a, b| a.target_probability.total_cmp(&b.target_probability));
    if let Some(rec) = contribution {
        let improvement = rec.target_probability - probability;
        if improvement > config.contribution_materiality
            && rec.required_contribution > result.monthly_contribution
        {
            suggestions.push(ActionRecommendation {
                kind: RecommendationKind::IncreaseContribution,
                improvement,
                message: format!(
                    "Increase SIP to {} for {}% success probability",
                    format_currency(rec.required_contribution, &config.currency_symbol),
                    rec.target_probability
                ),
            });
        }
    }

    if let Some(optimal) = comparison.optimal()
        && comparison.probability_improvement > config.allocation_materiality
    {
        suggestions.push(ActionRecommendation {
            kind: RecommendationKind::OptimizeAllocation,
            improvement: comparison.probability_improvement,
            message: format!(
                "Optimize asset allocation to {}% equity for {} higher success rate",
                optimal.equity_allocation,
                format_percentage(comparison.probability_improvement)
            ),
        });
    }

    suggestions.sort_by(|a, b| b.improvement.total_cmp(&a.improvement));

    let mut risk_flags = Vec::new();
    if probability < 70.0 {
        risk_flags.push(RiskFlag::LowSuccessProbability);
    }
    if result.p10_final_value < 0.7 * result.target_amount {
        risk_flags.push(RiskFlag::MarketSensitivity);
    }

    let mut action_items: Vec<String> = ROUTINE_ACTIONS.iter().map(|s| s.to_string()).collect();
    if probability < 50.0 {
        action_items.push(LOW_PROBABILITY_ACTION.to_string());
    }

    let headline = format!(
        "{}: {} chance of reaching {} in {} years. {}",
        feasibility.label(),
        format_percentage(probability),
        format_currency(result.target_amount, &config.currency_symbol),
        result.horizon_years,
        feasibility.description()
    );

    GoalInsights {
        feasibility,
        recommendations: suggestions,
        risk_flags,
        action_items,
        summary: GoalSummary {
            success_probability: probability,
            target_amount: result.target_amount,
            years_to_goal: result.horizon_years,
            median_final_value: result.median_final_value,
            headline,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Feasibility::from_probability(85.0), Feasibility::HighlyAchievable);
        assert_eq!(Feasibility::from_probability(84.9), Feasibility::Achievable);
        assert_eq!(Feasibility::from_probability(70.0), Feasibility::Achievable);
        assert_eq!(
            Feasibility::from_probability(50.0),
            Feasibility::ModeratelyChallenging
        );
        assert_eq!(
            Feasibility::from_probability(49.9),
            Feasibility::RequiresSignificantChange
        );
    }
}
