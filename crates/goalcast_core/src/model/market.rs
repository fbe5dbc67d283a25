use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Annualized return assumption for one asset bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnAssumption {
    /// Expected annual return (0.12 = 12%)
    pub mean: f64,
    /// Annual standard deviation of returns
    pub volatility: f64,
}

impl ReturnAssumption {
    // Long-run Indian equity and debt figures
    pub const EQUITY: ReturnAssumption = ReturnAssumption {
        mean: 0.12,
        volatility: 0.18,
    };
    pub const DEBT: ReturnAssumption = ReturnAssumption {
        mean: 0.07,
        volatility: 0.05,
    };

    /// Monthly return distribution: N(mean / 12, volatility / sqrt(12))
    pub fn monthly_distribution(&self, name: &'static str) -> Result<Normal<f64>, SimulationError> {
        if !self.mean.is_finite() {
            return Err(SimulationError::InvalidParameter {
                name,
                value: self.mean,
            });
        }
        Normal::new(self.mean / 12.0, self.volatility / 12f64.sqrt()).map_err(|_| {
            SimulationError::InvalidParameter {
                name,
                value: self.volatility,
            }
        })
    }
}

/// Market assumptions shared by every projection in a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    #[serde(default = "default_equity")]
    pub equity: ReturnAssumption,
    #[serde(default = "default_debt")]
    pub debt: ReturnAssumption,
    /// Annual inflation, used only for real-terms reporting
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,
}

fn default_equity() -> ReturnAssumption {
    ReturnAssumption::EQUITY
}

fn default_debt() -> ReturnAssumption {
    ReturnAssumption::DEBT
}

fn default_inflation_rate() -> f64 {
    0.06
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            equity: default_equity(),
            debt: default_debt(),
            inflation_rate: default_inflation_rate(),
        }
    }
}

impl MarketAssumptions {
    /// Cumulative price-level growth over `years`
    #[must_use]
    pub fn inflation_factor(&self, years: u32) -> f64 {
        (1.0 + self.inflation_rate).powi(years as i32)
    }

    /// Deterministic market (no volatility), handy for closed-form checks
    #[must_use]
    pub fn fixed(equity_return: f64, debt_return: f64) -> Self {
        Self {
            equity: ReturnAssumption {
                mean: equity_return,
                volatility: 0.0,
            },
            debt: ReturnAssumption {
                mean: debt_return,
                volatility: 0.0,
            },
            inflation_rate: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand_distr::Distribution;

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let dist = ReturnAssumption {
            mean: 0.12,
            volatility: 0.0,
        }
        .monthly_distribution("equity")
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!((dist.sample(&mut rng) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let result = ReturnAssumption {
            mean: 0.05,
            volatility: -0.1,
        }
        .monthly_distribution("debt volatility");
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "debt volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_inflation_factor() {
        let market = MarketAssumptions::default();
        assert!((market.inflation_factor(2) - 1.1236).abs() < 1e-9);
    }
}
