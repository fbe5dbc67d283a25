//! Monte Carlo projection engine
//!
//! Every trial compounds the current portfolio month by month: the monthly
//! contribution is added, the value is split into equity and debt by the
//! allocation, and each part grows by an independent normal draw.

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, SimulationError};
use crate::model::{SimulationParameters, SimulationResult};

/// Trials per independently seeded batch
const MAX_BATCH_SIZE: usize = 100;

/// Project `params` over `trials` Monte Carlo runs.
///
/// One base seed is drawn from `rng`; the projection itself is then fully
/// determined by that seed, so identically seeded callers get identical
/// results regardless of thread scheduling.
pub fn simulate<R: Rng + ?Sized>(
    params: &SimulationParameters,
    trials: usize,
    rng: &mut R,
) -> Result<SimulationResult> {
    let seed = rng.next_u64();
    simulate_with_seed(params, trials, seed)
}

/// Project `params` using an explicit base seed.
///
/// Runs that share a seed share their sampled return paths, which is what the
/// solver and comparator rely on to compare decisions without sampling noise.
pub fn simulate_with_seed(
    params: &SimulationParameters,
    trials: usize,
    seed: u64,
) -> Result<SimulationResult> {
    params.validate()?;
    if trials == 0 {
        return Err(SimulationError::InvalidParameter {
            name: "trials",
            value: 0.0,
        });
    }

    let equity = params.market.equity.monthly_distribution("equity volatility")?;
    let debt = params.market.debt.monthly_distribution("debt volatility")?;
    let months = params.horizon_months();
    let num_batches = trials.div_ceil(MAX_BATCH_SIZE);

    tracing::trace!(trials, months, num_batches, seed, "running projection");

    let run_batch = |i: usize| -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(derive_seed(seed, i as u64));

        let batch_size = if i == num_batches - 1 {
            trials - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };

        (0..batch_size)
            .map(|_| run_trial(params, months, &equity, &debt, &mut rng))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let mut finals: Vec<f64> = (0..num_batches).into_par_iter().flat_map(run_batch).collect();

    #[cfg(not(feature = "parallel"))]
    let mut finals: Vec<f64> = (0..num_batches).flat_map(run_batch).collect();

    finals.sort_by(f64::total_cmp);

    Ok(summarize(params, &finals))
}

fn run_trial<R: Rng + ?Sized>(
    params: &SimulationParameters,
    months: usize,
    equity: &Normal<f64>,
    debt: &Normal<f64>,
    rng: &mut R,
) -> f64 {
    let equity_share = params.equity_allocation / 100.0;
    let mut value = params.current_portfolio;

    for _ in 0..months {
        value += params.monthly_contribution;

        let equity_part = value * equity_share;
        let debt_part = value * (1.0 - equity_share);

        // Draw order is part of the seeded stream: equity first
        let equity_return = equity.sample(rng);
        let debt_return = debt.sample(rng);

        value = equity_part * (1.0 + equity_return) + debt_part * (1.0 + debt_return);
    }

    value
}

/// Aggregate sorted nominal final values
fn summarize(params: &SimulationParameters, sorted: &[f64]) -> SimulationResult {
    let trials = sorted.len();
    let successes = sorted.iter().filter(|v| **v >= params.target_amount).count();
    let mean = sorted.iter().sum::<f64>() / trials as f64;
    let median = percentile(sorted, 50.0);

    let horizon_years = params.horizon_years();
    let inflation_factor = params.market.inflation_factor(horizon_years);

    SimulationResult {
        success_probability: successes as f64 / trials as f64 * 100.0,
        mean_final_value: mean.trunc(),
        median_final_value: median.trunc(),
        p10_final_value: percentile(sorted, 10.0).trunc(),
        p90_final_value: percentile(sorted, 90.0).trunc(),
        real_median_final_value: (median / inflation_factor).trunc(),
        inflation_factor,
        target_amount: params.target_amount,
        horizon_years,
        trials,
        monthly_contribution: params.monthly_contribution,
        equity_allocation: params.equity_allocation,
    }
}

/// Linear interpolation between closest ranks over an ascending slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0) * (n as f64 - 1.0);
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

fn derive_seed(base_seed: u64, batch: u64) -> u64 {
    splitmix64(base_seed ^ batch.rotate_left(32))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarketAssumptions;

    fn params() -> SimulationParameters {
        SimulationParameters {
            current_age: 30,
            target_age: 32,
            target_amount: 100_000.0,
            current_portfolio: 50_000.0,
            monthly_contribution: 2_000.0,
            equity_allocation: 60.0,
            market: MarketAssumptions::default(),
        }
    }

    #[test]
    fn test_percentile_interpolates_between_points() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&values, 25.0) - 1.75).abs() < 1e-12);
        assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 4.0);
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
    }

    #[test]
    fn test_derive_seed_changes_per_batch() {
        assert_ne!(derive_seed(42, 0), derive_seed(42, 1));
        assert_ne!(derive_seed(42, 0), derive_seed(43, 0));
    }

    #[test]
    fn test_partial_final_batch() {
        let result = simulate_with_seed(&params(), 250, 3).unwrap();
        assert_eq!(result.trials, 250);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let result = simulate_with_seed(&params(), 0, 3);
        assert_eq!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "trials",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_monetary_fields_are_whole_units() {
        let result = simulate_with_seed(&params(), 300, 11).unwrap();
        for value in [
            result.mean_final_value,
            result.median_final_value,
            result.p10_final_value,
            result.p90_final_value,
            result.real_median_final_value,
        ] {
            assert_eq!(value, value.trunc());
        }
    }
}
