//! Allocation comparison
//!
//! Runs the projection once per menu point. All points share one base seed,
//! so differences between scenarios come from the allocation alone.

use std::cmp::Ordering;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, SimulationError};
use crate::model::{
    AllocationComparison, AllocationPoint, AllocationScenario, SimulationParameters,
    require_non_negative,
};
use crate::simulation::simulate_with_seed;

use super::config::AllocationConfig;

/// Evaluate every allocation on the menu against `base` and rank them.
///
/// Scenarios are sorted by descending success probability, ties going to the
/// lower equity share. The baseline is the menu point closest to
/// `current_equity_allocation` within the configured tolerance.
pub fn compare_allocations<R: Rng + ?Sized>(
    base: &SimulationParameters,
    current_equity_allocation: f64,
    config: &AllocationConfig,
    rng: &mut R,
) -> Result<AllocationComparison> {
    if config.menu.is_empty() {
        return Err(SimulationError::InvalidParameter {
            name: "allocation menu",
            value: 0.0,
        });
    }
    base.validate()?;
    if !(0.0..=100.0).contains(&current_equity_allocation) {
        return Err(SimulationError::InvalidAllocation(current_equity_allocation));
    }
    require_non_negative("allocation tolerance", config.tolerance)?;

    let seed = rng.next_u64();
    let evaluate = |point: &AllocationPoint| -> Result<AllocationScenario> {
        let params = base.with_allocation(point.equity_allocation);
        let result = simulate_with_seed(&params, config.trials, seed)?;
        Ok(AllocationScenario {
            name: point.name.clone(),
            equity_allocation: point.equity_allocation,
            result,
        })
    };

    #[cfg(feature = "parallel")]
    let scenarios: Result<Vec<AllocationScenario>> = config.menu.par_iter().map(evaluate).collect();

    #[cfg(not(feature = "parallel"))]
    let scenarios: Result<Vec<AllocationScenario>> = config.menu.iter().map(evaluate).collect();

    let mut scenarios = scenarios?;
    scenarios.sort_by(rank);

    let baseline = closest_within(&scenarios, current_equity_allocation, config.tolerance);
    let baseline_probability = baseline.map_or(0.0, AllocationScenario::success_probability);
    let baseline = baseline.map(|s| s.name.clone());

    let probability_improvement = scenarios
        .first()
        .map_or(0.0, |best| best.success_probability() - baseline_probability);

    tracing::debug!(
        scenarios = scenarios.len(),
        optimal = scenarios.first().map(|s| s.name.as_str()),
        baseline = baseline.as_deref(),
        probability_improvement,
        "allocations compared"
    );

    Ok(AllocationComparison {
        current_equity_allocation,
        scenarios,
        baseline,
        probability_improvement,
    })
}

fn rank(a: &AllocationScenario, b: &AllocationScenario) -> Ordering {
    b.success_probability()
        .total_cmp(&a.success_probability())
        .then(a.equity_allocation.total_cmp(&b.equity_allocation))
}

/// Menu point nearest to `current`, strictly within `tolerance`
fn closest_within(
    scenarios: &[AllocationScenario],
    current: f64,
    tolerance: f64,
) -> Option<&AllocationScenario> {
    let distance = |s: &AllocationScenario| (s.equity_allocation - current).abs();

    scenarios
        .iter()
        .filter(|s| distance(s) < tolerance)
        .min_by(|a, b| {
            distance(a)
                .total_cmp(&distance(b))
                .then(a.equity_allocation.total_cmp(&b.equity_allocation))
        })
}
