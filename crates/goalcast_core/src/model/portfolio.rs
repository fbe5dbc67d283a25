//! Normalized portfolio and income aggregates

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Asset classes recognised in provider net-worth records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    MutualFund,
    DomesticSecurities,
    ForeignSecurities,
    RetirementFund,
    SavingsAccounts,
    /// Anything else (deposits, gold, property, ...) counts toward neither bucket
    Other,
}

impl AssetClass {
    /// Map a provider tag such as `ASSET_TYPE_MUTUAL_FUND` to its class
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ASSET_TYPE_MUTUAL_FUND" => AssetClass::MutualFund,
            "ASSET_TYPE_INDIAN_SECURITIES" => AssetClass::DomesticSecurities,
            "ASSET_TYPE_US_SECURITIES" => AssetClass::ForeignSecurities,
            "ASSET_TYPE_EPF" => AssetClass::RetirementFund,
            "ASSET_TYPE_SAVINGS_ACCOUNTS" => AssetClass::SavingsAccounts,
            _ => AssetClass::Other,
        }
    }

    #[must_use]
    pub fn is_equity(self) -> bool {
        matches!(
            self,
            AssetClass::MutualFund | AssetClass::DomesticSecurities | AssetClass::ForeignSecurities
        )
    }

    #[must_use]
    pub fn is_debt(self) -> bool {
        matches!(self, AssetClass::RetirementFund | AssetClass::SavingsAccounts)
    }
}

/// Point-in-time view of the user's net worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Total net worth as reported by the provider (liabilities already netted)
    pub total_net_worth: f64,
    /// Asset tag -> value
    pub assets: BTreeMap<String, f64>,
    /// Liability tag -> value, excluded from the equity/debt split
    pub liabilities: BTreeMap<String, f64>,
    pub equity_value: f64,
    pub debt_value: f64,
    /// Equity share of total net worth, 0-100, two decimals
    pub equity_percentage: f64,
    /// Debt share of total net worth, 0-100, two decimals
    pub debt_percentage: f64,
}

impl PortfolioSnapshot {
    /// Build a snapshot from tagged asset and liability values.
    ///
    /// A zero (or negative) total yields zero percentages.
    #[must_use]
    pub fn new(
        total_net_worth: f64,
        assets: BTreeMap<String, f64>,
        liabilities: BTreeMap<String, f64>,
    ) -> Self {
        let mut equity_value = 0.0;
        let mut debt_value = 0.0;
        for (tag, value) in &assets {
            let class = AssetClass::from_tag(tag);
            if class.is_equity() {
                equity_value += value.max(0.0);
            } else if class.is_debt() {
                debt_value += value.max(0.0);
            }
        }

        let share = |part: f64| {
            if total_net_worth > 0.0 {
                round_to(part / total_net_worth * 100.0, 2)
            } else {
                0.0
            }
        };

        Self {
            total_net_worth,
            equity_percentage: share(equity_value),
            debt_percentage: share(debt_value),
            assets,
            liabilities,
            equity_value,
            debt_value,
        }
    }

    /// Value held in a given asset class
    #[must_use]
    pub fn class_value(&self, class: AssetClass) -> f64 {
        self.assets
            .iter()
            .filter(|(tag, _)| AssetClass::from_tag(tag) == class)
            .map(|(_, v)| *v)
            .sum()
    }

    /// Equity share of the invested (equity + debt) holdings, 0-100.
    ///
    /// Unlike `equity_percentage` this ignores liabilities and unclassified
    /// assets, so it is always a valid allocation. Zero when nothing is invested.
    #[must_use]
    pub fn invested_equity_share(&self) -> f64 {
        let invested = self.equity_value + self.debt_value;
        if invested > 0.0 {
            round_to(self.equity_value / invested * 100.0, 2)
        } else {
            0.0
        }
    }
}

/// How the monthly income figure was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeSource {
    /// Mean of credits whose narration matched a salary keyword
    SalaryCredits,
    /// Largest credit above the materiality threshold
    LargestCredit,
    /// Configured default constant
    Default,
}

/// Estimated recurring monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEstimate {
    pub monthly_income: f64,
    pub source: IncomeSource,
    pub salary_transactions: usize,
    pub first_salary_date: Option<Date>,
    pub last_salary_date: Option<Date>,
}

/// Recurring investment detected from mutual fund purchases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringInvestment {
    /// Average purchase amount per month with at least one purchase
    pub monthly_average: f64,
    pub purchases: usize,
    pub active_months: usize,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_snapshot_split() {
        let snapshot = PortfolioSnapshot::new(
            1_000.0,
            assets(&[
                ("ASSET_TYPE_MUTUAL_FUND", 400.0),
                ("ASSET_TYPE_US_SECURITIES", 100.0),
                ("ASSET_TYPE_EPF", 200.0),
                ("ASSET_TYPE_SAVINGS_ACCOUNTS", 150.0),
                ("ASSET_TYPE_GOLD", 150.0),
            ]),
            BTreeMap::new(),
        );

        assert_eq!(snapshot.equity_value, 500.0);
        assert_eq!(snapshot.debt_value, 350.0);
        assert_eq!(snapshot.equity_percentage, 50.0);
        assert_eq!(snapshot.debt_percentage, 35.0);
        assert_eq!(snapshot.class_value(AssetClass::Other), 150.0);
        assert_eq!(snapshot.invested_equity_share(), 58.82);
    }

    #[test]
    fn test_liabilities_push_share_of_net_worth_past_100() {
        let snapshot = PortfolioSnapshot::new(
            600.0,
            assets(&[
                ("ASSET_TYPE_MUTUAL_FUND", 900.0),
                ("ASSET_TYPE_SAVINGS_ACCOUNTS", 100.0),
            ]),
            assets(&[("LIABILITY_TYPE_HOME_LOAN", 400.0)]),
        );
        assert_eq!(snapshot.equity_percentage, 150.0);
        assert_eq!(snapshot.invested_equity_share(), 90.0);
    }

    #[test]
    fn test_snapshot_rounds_to_two_decimals() {
        let snapshot = PortfolioSnapshot::new(
            3.0,
            assets(&[("ASSET_TYPE_MUTUAL_FUND", 1.0)]),
            BTreeMap::new(),
        );
        assert_eq!(snapshot.equity_percentage, 33.33);
    }

    #[test]
    fn test_zero_net_worth_has_zero_percentages() {
        let snapshot = PortfolioSnapshot::new(
            0.0,
            assets(&[("ASSET_TYPE_MUTUAL_FUND", 0.0)]),
            BTreeMap::new(),
        );
        assert_eq!(snapshot.equity_percentage, 0.0);
        assert_eq!(snapshot.debt_percentage, 0.0);
        assert_eq!(snapshot.invested_equity_share(), 0.0);
    }
}
