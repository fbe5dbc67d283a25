//! End-to-end goal planning
//!
//! Combines a normalized [`FinancialProfile`] with a goal request and runs
//! projection, contribution search, allocation comparison and insight
//! synthesis in sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GoalBuilder, PlannerConfig};
use crate::error::PlanError;
use crate::insights::{GoalInsights, synthesize};
use crate::model::{AllocationComparison, Recommendation, SimulationParameters, SimulationResult};
use crate::normalize::FinancialProfile;
use crate::optimization::{compare_allocations, recommend_contributions};
use crate::simulation::simulate;

/// What the user wants to reach, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRequest {
    pub current_age: u32,
    pub target_age: u32,
    pub target_amount: f64,
    /// Defaults to the detected recurring investment, else zero
    #[serde(default)]
    pub monthly_contribution: Option<f64>,
    /// Defaults to the portfolio's current equity share
    #[serde(default)]
    pub equity_allocation: Option<f64>,
}

/// Every intermediate result of a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub request: GoalRequest,
    pub profile: FinancialProfile,
    pub parameters: SimulationParameters,
    pub projection: SimulationResult,
    pub recommendations: Vec<Recommendation>,
    pub allocation: AllocationComparison,
    pub insights: GoalInsights,
}

/// Plan a goal against the user's profile.
///
/// All randomness comes from `rng`; a seeded RNG gives a reproducible plan.
pub fn plan_goal<R: Rng + ?Sized>(
    profile: &FinancialProfile,
    goal: &GoalRequest,
    config: &PlannerConfig,
    rng: &mut R,
) -> Result<GoalPlan, PlanError> {
    let span = tracing::info_span!(
        "plan_goal",
        current_age = goal.current_age,
        target_age = goal.target_age
    );
    let _enter = span.enter();

    if profile.snapshot.total_net_worth < 0.0 {
        tracing::warn!(
            net_worth = profile.snapshot.total_net_worth,
            "negative net worth, projecting from an empty portfolio"
        );
    }

    let monthly_contribution = goal
        .monthly_contribution
        .or_else(|| profile.recurring_investment.as_ref().map(|r| r.monthly_average))
        .unwrap_or(0.0);

    let mut builder = GoalBuilder::new()
        .ages(goal.current_age, goal.target_age)
        .target(goal.target_amount)
        .from_snapshot(&profile.snapshot)
        .monthly(monthly_contribution)
        .market(config.market);
    if let Some(equity) = goal.equity_allocation {
        builder = builder.equity(equity);
    }
    let parameters = builder.build()?;

    let projection = {
        let _stage = tracing::debug_span!("projection").entered();
        simulate(&parameters, config.simulation.trials, rng)?
    };
    tracing::info!(
        success_probability = projection.success_probability,
        median = projection.median_final_value,
        "projection complete"
    );

    let recommendations = {
        let _stage = tracing::debug_span!("contribution_search").entered();
        recommend_contributions(
            &parameters,
            profile.income.monthly_income,
            &config.solver,
            rng,
        )?
    };
    tracing::info!(targets = recommendations.len(), "contribution search complete");

    let allocation = {
        let _stage = tracing::debug_span!("allocation_comparison").entered();
        compare_allocations(
            &parameters,
            parameters.equity_allocation,
            &config.allocation,
            rng,
        )?
    };
    tracing::info!(
        improvement = allocation.probability_improvement,
        "allocation comparison complete"
    );

    let insights = synthesize(&projection, &recommendations, &allocation, &config.insights);

    Ok(GoalPlan {
        request: goal.clone(),
        profile: profile.clone(),
        parameters,
        projection,
        recommendations,
        allocation,
        insights,
    })
}
