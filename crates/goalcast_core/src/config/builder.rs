//! Goal Builder
//!
//! Fluent construction of [`SimulationParameters`] with validation at
//! `build()` time.

use crate::error::SimulationError;
use crate::model::{MarketAssumptions, PortfolioSnapshot, SimulationParameters};

/// Builder for [`SimulationParameters`]
#[derive(Debug, Clone)]
pub struct GoalBuilder {
    params: SimulationParameters,
}

impl Default for GoalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalBuilder {
    /// Start from an empty goal: no portfolio, no contribution, 50% equity
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: SimulationParameters {
                current_age: 0,
                target_age: 0,
                target_amount: 0.0,
                current_portfolio: 0.0,
                monthly_contribution: 0.0,
                equity_allocation: 50.0,
                market: MarketAssumptions::default(),
            },
        }
    }

    /// Set current and target age
    #[must_use]
    pub fn ages(mut self, current_age: u32, target_age: u32) -> Self {
        self.params.current_age = current_age;
        self.params.target_age = target_age;
        self
    }

    /// Set target age as a number of years from the current age
    #[must_use]
    pub fn years_to_goal(mut self, years: u32) -> Self {
        self.params.target_age = self.params.current_age.saturating_add(years);
        self
    }

    #[must_use]
    pub fn target(mut self, amount: f64) -> Self {
        self.params.target_amount = amount;
        self
    }

    #[must_use]
    pub fn portfolio(mut self, value: f64) -> Self {
        self.params.current_portfolio = value;
        self
    }

    /// Use the snapshot's net worth and the equity share of its invested holdings
    #[must_use]
    pub fn from_snapshot(mut self, snapshot: &PortfolioSnapshot) -> Self {
        self.params.current_portfolio = snapshot.total_net_worth.max(0.0);
        self.params.equity_allocation = snapshot.invested_equity_share();
        self
    }

    /// Monthly contribution (SIP)
    #[must_use]
    pub fn monthly(mut self, contribution: f64) -> Self {
        self.params.monthly_contribution = contribution;
        self
    }

    /// Equity allocation in percent
    #[must_use]
    pub fn equity(mut self, percentage: f64) -> Self {
        self.params.equity_allocation = percentage;
        self
    }

    #[must_use]
    pub fn market(mut self, market: MarketAssumptions) -> Self {
        self.params.market = market;
        self
    }

    pub fn build(self) -> Result<SimulationParameters, SimulationError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_builder_produces_valid_params() {
        let params = GoalBuilder::new()
            .ages(30, 40)
            .target(5_000_000.0)
            .portfolio(1_000_000.0)
            .monthly(25_000.0)
            .equity(70.0)
            .build()
            .unwrap();

        assert_eq!(params.horizon_years(), 10);
        assert_eq!(params.equity_allocation, 70.0);
    }

    #[test]
    fn test_years_to_goal() {
        let params = GoalBuilder::new()
            .ages(35, 0)
            .years_to_goal(15)
            .target(1.0)
            .build()
            .unwrap();
        assert_eq!(params.target_age, 50);
    }

    #[test]
    fn test_builder_rejects_missing_horizon() {
        let result = GoalBuilder::new().ages(40, 40).target(1.0).build();
        assert!(matches!(result, Err(SimulationError::InvalidHorizon { .. })));
    }

    #[test]
    fn test_from_snapshot() {
        let snapshot = PortfolioSnapshot::new(
            200.0,
            BTreeMap::from([
                ("ASSET_TYPE_MUTUAL_FUND".to_string(), 150.0),
                ("ASSET_TYPE_EPF".to_string(), 50.0),
            ]),
            BTreeMap::new(),
        );
        let params = GoalBuilder::new()
            .ages(30, 31)
            .from_snapshot(&snapshot)
            .build()
            .unwrap();
        assert_eq!(params.current_portfolio, 200.0);
        assert_eq!(params.equity_allocation, 75.0);
    }
}
