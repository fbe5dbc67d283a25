use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

use super::market::MarketAssumptions;

/// Inputs for a single goal projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub current_age: u32,
    pub target_age: u32,
    pub target_amount: f64,
    pub current_portfolio: f64,
    pub monthly_contribution: f64,
    /// Share of the portfolio held in equity, 0-100
    pub equity_allocation: f64,
    #[serde(default)]
    pub market: MarketAssumptions,
}

impl SimulationParameters {
    /// Years between current and target age. Call [`validate`](Self::validate) first.
    #[must_use]
    pub fn horizon_years(&self) -> u32 {
        self.target_age.saturating_sub(self.current_age)
    }

    #[must_use]
    pub fn horizon_months(&self) -> usize {
        self.horizon_years() as usize * 12
    }

    /// Copy of these parameters with a different monthly contribution
    #[must_use]
    pub fn with_contribution(&self, monthly_contribution: f64) -> Self {
        Self {
            monthly_contribution,
            ..self.clone()
        }
    }

    /// Copy of these parameters with a different equity allocation
    #[must_use]
    pub fn with_allocation(&self, equity_allocation: f64) -> Self {
        Self {
            equity_allocation,
            ..self.clone()
        }
    }

    /// Reject out-of-domain inputs. Nothing is ever clamped.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.target_age <= self.current_age {
            return Err(SimulationError::InvalidHorizon {
                current_age: self.current_age,
                target_age: self.target_age,
            });
        }

        if !(0.0..=100.0).contains(&self.equity_allocation) {
            return Err(SimulationError::InvalidAllocation(self.equity_allocation));
        }

        let fields = [
            ("target_amount", self.target_amount),
            ("current_portfolio", self.current_portfolio),
            ("monthly_contribution", self.monthly_contribution),
            ("equity mean return", self.market.equity.mean),
            ("equity volatility", self.market.equity.volatility),
            ("debt mean return", self.market.debt.mean),
            ("debt volatility", self.market.debt.volatility),
            ("inflation_rate", self.market.inflation_rate),
        ];
        for (name, value) in fields {
            require_non_negative(name, value)?;
        }

        Ok(())
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParameters {
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

    #[test]
    fn test_horizon() {
        let p = params();
        assert_eq!(p.horizon_years(), 10);
        assert_eq!(p.horizon_months(), 120);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let p = SimulationParameters {
            target_age: 30,
            ..params()
        };
        assert_eq!(
            p.validate(),
            Err(SimulationError::InvalidHorizon {
                current_age: 30,
                target_age: 30
            })
        );
    }

    #[test]
    fn test_allocation_bounds() {
        assert!(params().with_allocation(0.0).validate().is_ok());
        assert!(params().with_allocation(100.0).validate().is_ok());
        assert_eq!(
            params().with_allocation(100.5).validate(),
            Err(SimulationError::InvalidAllocation(100.5))
        );
        assert_eq!(
            params().with_allocation(-1.0).validate(),
            Err(SimulationError::InvalidAllocation(-1.0))
        );
        assert!(params().with_allocation(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_negative_contribution_rejected() {
        let result = params().with_contribution(-10.0).validate();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "monthly_contribution",
                ..
            })
        ));
    }
}
