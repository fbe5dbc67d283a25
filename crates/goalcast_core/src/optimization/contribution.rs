//! Minimum-contribution solver
//!
//! Bisection on the monthly contribution. Success probability is
//! non-decreasing in contribution for a fixed allocation, and every
//! evaluation within one solve reuses the same base seed, so on the sampled
//! return paths the estimate is exactly monotone and the search is stable.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, SimulationError};
use crate::model::{
    Affordability, Recommendation, SimulationParameters, require_non_negative, round_to,
};
use crate::simulation::simulate_with_seed;

use super::config::SolverConfig;

/// Find the smallest monthly contribution reaching `target_probability`.
///
/// The search space is `[minimum_contribution, max_income_fraction × income]`.
/// When even the upper bound misses the target the upper bound is returned
/// with [`Affordability::Insufficient`] instead of an error.
pub fn solve_contribution<R: Rng + ?Sized>(
    base: &SimulationParameters,
    target_probability: f64,
    monthly_income: f64,
    config: &SolverConfig,
    rng: &mut R,
) -> Result<Recommendation> {
    let seed = rng.next_u64();
    solve_with_seed(base, target_probability, monthly_income, config, seed)
}

/// Solve every target on the configured probability menu.
///
/// All targets share one base seed, so the returned contributions are
/// non-decreasing in target probability. Output is sorted by target.
pub fn recommend_contributions<R: Rng + ?Sized>(
    base: &SimulationParameters,
    monthly_income: f64,
    config: &SolverConfig,
    rng: &mut R,
) -> Result<Vec<Recommendation>> {
    let seed = rng.next_u64();
    let solve = |target: &f64| solve_with_seed(base, *target, monthly_income, config, seed);

    #[cfg(feature = "parallel")]
    let recommendations: Result<Vec<Recommendation>> =
        config.target_probabilities.par_iter().map(solve).collect();

    #[cfg(not(feature = "parallel"))]
    let recommendations: Result<Vec<Recommendation>> =
        config.target_probabilities.iter().map(solve).collect();

    let mut recommendations = recommendations?;
    recommendations.sort_by(|a, b| a.target_probability.total_cmp(&b.target_probability));
    Ok(recommendations)
}

fn solve_with_seed(
    base: &SimulationParameters,
    target_probability: f64,
    monthly_income: f64,
    config: &SolverConfig,
    seed: u64,
) -> Result<Recommendation> {
    base.validate()?;
    if !(target_probability > 0.0 && target_probability <= 100.0) {
        return Err(SimulationError::InvalidParameter {
            name: "target_probability",
            value: target_probability,
        });
    }
    require_non_negative("monthly_income", monthly_income)?;
    require_non_negative("minimum_contribution", config.minimum_contribution)?;
    require_non_negative("max_income_fraction", config.max_income_fraction)?;

    let probability_at = |contribution: f64| {
        simulate_with_seed(
            &base.with_contribution(contribution),
            config.search_trials,
            seed,
        )
        .map(|r| r.success_probability)
    };

    let floor = config.minimum_contribution;
    let ceiling = (config.max_income_fraction * monthly_income).max(floor);

    let ceiling_probability = probability_at(ceiling)?;
    if ceiling_probability < target_probability {
        tracing::debug!(
            target_probability,
            ceiling,
            ceiling_probability,
            "target unreachable within income bound"
        );
        return Ok(recommendation(
            base,
            target_probability,
            ceiling,
            ceiling_probability,
            Affordability::Insufficient,
            1,
        ));
    }

    let floor_probability = probability_at(floor)?;
    let (contribution, achieved, evaluations) = if floor_probability >= target_probability {
        (floor, floor_probability, 2)
    } else {
        let mut low = floor;
        let mut high = ceiling;
        let mut best = (ceiling, ceiling_probability);

        for _ in 0..config.iterations {
            let mid = (low + high) / 2.0;
            let probability = probability_at(mid)?;
            tracing::trace!(mid, probability, "contribution search step");

            if probability >= target_probability {
                high = mid;
                best = (mid, probability);
            } else {
                low = mid;
            }
        }
        (best.0, best.1, 2 + config.iterations)
    };

    // Whole currency units, never above the income bound
    let required = contribution.ceil().min(ceiling);
    let affordability = classify(required, monthly_income, config);

    tracing::debug!(
        target_probability,
        required,
        achieved,
        affordability = affordability.label(),
        evaluations,
        "contribution solved"
    );

    Ok(recommendation(
        base,
        target_probability,
        required,
        achieved,
        affordability,
        evaluations,
    ))
}

fn classify(contribution: f64, monthly_income: f64, config: &SolverConfig) -> Affordability {
    if contribution <= config.affordable_fraction * monthly_income {
        Affordability::Affordable
    } else if contribution <= config.stretch_fraction * monthly_income {
        Affordability::Stretch
    } else {
        Affordability::Challenging
    }
}

fn recommendation(
    base: &SimulationParameters,
    target_probability: f64,
    required_contribution: f64,
    achieved_probability: f64,
    affordability: Affordability,
    iterations: usize,
) -> Recommendation {
    let current = base.monthly_contribution;
    let contribution_change = required_contribution - current;
    let contribution_change_percentage = if current > 0.0 {
        round_to(contribution_change / current * 100.0, 1)
    } else {
        0.0
    };

    Recommendation {
        target_probability,
        required_contribution,
        affordability,
        achieved_probability,
        contribution_change,
        contribution_change_percentage,
        iterations,
    }
}
