//! Integration tests for the goalcast planning engine
//!
//! Tests are organized by topic:
//! - `engine` - Projection mechanics, determinism and closed-form checks
//! - `solver` - Minimum contribution search
//! - `allocation` - Allocation ranking and baseline selection
//! - `insights` - Verdicts, recommendations and risk flags
//! - `planner` - End-to-end planning from raw records

mod solver;

use crate::model::{MarketAssumptions, SimulationParameters};

/// 30 -> 40, target 5M, portfolio 1M, 25k/month, 70% equity
pub(crate) fn reference_goal() -> SimulationParameters {
    SimulationParameters {
        current_age: 30,
        target_age: 40,
        target_amount: 5_000_000.0,
        current_portfolio: 1_000_000.0,
        monthly_contribution: 25_000.0,
        equity_allocation: 70.0,
        market: MarketAssumptions::default(),
    }
}
