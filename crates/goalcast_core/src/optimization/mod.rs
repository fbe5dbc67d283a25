//! Optimization over the two decisions a saver controls
//!
//! - [`solve_contribution`] / [`recommend_contributions`]: the smallest monthly
//!   contribution that reaches one or more target success probabilities.
//! - [`compare_allocations`]: success probability across a menu of equity
//!   allocations.
//!
//! Both evaluate the projection engine under common random numbers: one base
//! seed is drawn from the caller's RNG and reused for every evaluation, so
//! results move only with the decision variable.
//!
//! # Example
//!
//! ```ignore
//! use goalcast_core::optimization::{SolverConfig, recommend_contributions};
//!
//! let recommendations = recommend_contributions(
//!     &params,
//!     150_000.0,
//!     &SolverConfig::default(),
//!     &mut rng,
//! )?;
//! for rec in &recommendations {
//!     println!("{}% -> {}", rec.target_probability, rec.required_contribution);
//! }
//! ```

mod allocation;
mod config;
mod contribution;

pub use allocation::compare_allocations;
pub use config::{AllocationConfig, SolverConfig};
pub use contribution::{recommend_contributions, solve_contribution};
