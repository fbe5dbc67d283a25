//! Goal-based financial planning library
//!
//! This crate estimates how likely a savings goal is to be reached and what to
//! change if it is not. It provides:
//! - Normalization of raw net-worth, bank and mutual fund records into a
//!   portfolio snapshot and a monthly income estimate
//! - A Monte Carlo projection engine with a two-asset (equity/debt) market
//! - A solver for the minimum monthly contribution reaching a target
//!   success probability
//! - A comparison of success probability across equity allocations
//! - Deterministic synthesis of verdicts, recommendations and risk flags
//!
//! # Example
//!
//! ```ignore
//! use goalcast_core::{FinancialProfile, GoalRequest, PlannerConfig, plan_goal};
//!
//! let config = PlannerConfig::default();
//! let profile = FinancialProfile::from_source(&source, &config.income)?;
//! let goal = GoalRequest {
//!     current_age: 30,
//!     target_age: 40,
//!     target_amount: 5_000_000.0,
//!     monthly_contribution: Some(25_000.0),
//!     equity_allocation: None,
//! };
//! let plan = plan_goal(&profile, &goal, &config, &mut config.simulation.rng())?;
//! println!("{}", plan.insights.summary.headline);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod format;
pub mod insights;
pub mod normalize;
pub mod optimization;
pub mod planner;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{GoalBuilder, PlannerConfig};
pub use error::{PlanError, RecordError, SimulationError, SourceError};
pub use insights::{Feasibility, GoalInsights, GoalSummary, synthesize};
pub use normalize::{FinancialProfile, normalize};
pub use optimization::{compare_allocations, recommend_contributions, solve_contribution};
pub use planner::{GoalPlan, GoalRequest, plan_goal};
pub use simulation::{simulate, simulate_with_seed};
