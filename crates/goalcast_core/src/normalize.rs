//! Financial record normalization
//!
//! Turns raw provider documents into typed aggregates. Structural problems
//! (a missing or mistyped required field) are reported as
//! [`RecordError::DataFormat`] with the JSON path of the offending field.
//! A missing *signal* (no salary credits) is not an error: the income
//! estimate falls back through documented heuristics and records which one
//! it used.

use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::IncomeConfig;
use crate::error::{RecordError, SourceError};
use crate::model::{
    BankTransaction, Direction, FundTransaction, IncomeEstimate, IncomeSource, OrderType,
    PortfolioSnapshot, RecordKind, RecordSource, RecurringInvestment,
};

/// Positional layout of a provider bank transaction
const BANK_TXN_FIELDS: [&str; 6] = ["amount", "narration", "date", "type", "mode", "balance"];

/// Positional layout of a provider mutual fund transaction
const FUND_TXN_FIELDS: [&str; 5] = [
    "orderType",
    "transactionDate",
    "purchasePrice",
    "purchaseUnits",
    "transactionAmount",
];

/// A typed view of one raw record document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NormalizedRecord {
    NetWorth(PortfolioSnapshot),
    BankTransactions(Vec<BankTransaction>),
    MutualFundTransactions(Vec<FundTransaction>),
}

/// Normalize a raw document of the given kind
pub fn normalize(kind: RecordKind, doc: &Value) -> Result<NormalizedRecord, RecordError> {
    match kind {
        RecordKind::NetWorth => portfolio_snapshot(doc).map(NormalizedRecord::NetWorth),
        RecordKind::BankTransactions => {
            bank_transactions(doc).map(NormalizedRecord::BankTransactions)
        }
        RecordKind::MutualFundTransactions => {
            fund_transactions(doc).map(NormalizedRecord::MutualFundTransactions)
        }
    }
}

/// Everything the planner needs to know about the user's finances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub snapshot: PortfolioSnapshot,
    pub income: IncomeEstimate,
    pub recurring_investment: Option<RecurringInvestment>,
}

impl FinancialProfile {
    /// Fetch every record kind once and normalize it.
    ///
    /// Net worth and bank transactions are required; mutual fund records are
    /// optional and only feed the recurring investment estimate.
    pub fn from_source<S: RecordSource + ?Sized>(
        source: &S,
        config: &IncomeConfig,
    ) -> Result<Self, RecordError> {
        let net_worth = source.fetch(RecordKind::NetWorth)?;
        let bank = source.fetch(RecordKind::BankTransactions)?;
        let funds = match source.fetch(RecordKind::MutualFundTransactions) {
            Ok(doc) => Some(doc),
            Err(SourceError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };

        Self::from_documents(&net_worth, &bank, funds.as_ref(), config)
    }

    pub fn from_documents(
        net_worth: &Value,
        bank: &Value,
        funds: Option<&Value>,
        config: &IncomeConfig,
    ) -> Result<Self, RecordError> {
        let snapshot = portfolio_snapshot(net_worth)?;
        let income = estimate_income(&bank_transactions(bank)?, config)?;
        let recurring_investment = match funds {
            Some(doc) => recurring_investment(&fund_transactions(doc)?),
            None => None,
        };

        tracing::debug!(
            net_worth = snapshot.total_net_worth,
            equity_pct = snapshot.equity_percentage,
            income = income.monthly_income,
            income_source = ?income.source,
            "normalized financial profile"
        );

        Ok(Self {
            snapshot,
            income,
            recurring_investment,
        })
    }
}

// ============================================================================
// Net worth
// ============================================================================

/// Parse a provider net-worth document into a [`PortfolioSnapshot`]
pub fn portfolio_snapshot(doc: &Value) -> Result<PortfolioSnapshot, RecordError> {
    let root = Cursor::root(RecordKind::NetWorth, doc).field("netWorthResponse")?;

    let assets = tagged_values(&root.field("assetValues")?)?;
    let liabilities = match root.optional("liabilityValues") {
        Some(list) => tagged_values(&list)?,
        None => BTreeMap::new(),
    };
    let total = root.field("totalNetWorthValue")?.money()?;

    Ok(PortfolioSnapshot::new(total, assets, liabilities))
}

fn tagged_values(list: &Cursor<'_>) -> Result<BTreeMap<String, f64>, RecordError> {
    let mut values = BTreeMap::new();
    for item in list.items()? {
        let tag = item.field("netWorthAttribute")?.string()?;
        let value = item.field("value")?.money()?;
        *values.entry(tag.to_string()).or_insert(0.0) += value;
    }
    Ok(values)
}

// ============================================================================
// Bank transactions and income
// ============================================================================

/// Flatten every account's transactions from a provider bank document
pub fn bank_transactions(doc: &Value) -> Result<Vec<BankTransaction>, RecordError> {
    let accounts = Cursor::root(RecordKind::BankTransactions, doc).field("bankTransactions")?;

    let mut transactions = Vec::new();
    for account in accounts.items()? {
        for txn in account.field("txns")?.items()? {
            let amount = txn.slot(&BANK_TXN_FIELDS, 0)?.number()?;
            let narration = txn.slot(&BANK_TXN_FIELDS, 1)?.string()?.to_string();
            let date = txn.slot(&BANK_TXN_FIELDS, 2)?.date()?;
            let direction = direction(&txn.slot(&BANK_TXN_FIELDS, 3)?)?;
            let balance = match txn.optional_slot(&BANK_TXN_FIELDS, 5) {
                Some(cursor) => Some(cursor.number()?),
                None => None,
            };

            transactions.push(BankTransaction {
                amount,
                narration,
                date,
                direction,
                balance,
            });
        }
    }
    Ok(transactions)
}

fn direction(cursor: &Cursor<'_>) -> Result<Direction, RecordError> {
    let code = match cursor.value {
        Value::String(s) if s.eq_ignore_ascii_case("credit") => return Ok(Direction::Credit),
        Value::String(s) if s.eq_ignore_ascii_case("debit") => return Ok(Direction::Debit),
        _ => cursor.integer()?,
    };
    Ok(match code {
        1 => Direction::Credit,
        2 => Direction::Debit,
        other => Direction::Other(other),
    })
}

/// Estimate recurring monthly income from bank credits.
///
/// 1. Mean of credits whose narration contains a salary keyword
///    (case-insensitive).
/// 2. Otherwise the largest credit above the materiality threshold.
/// 3. Otherwise the configured default, or [`RecordError::InsufficientData`]
///    when the default is disabled.
pub fn estimate_income(
    transactions: &[BankTransaction],
    config: &IncomeConfig,
) -> Result<IncomeEstimate, RecordError> {
    let keywords: Vec<String> = config
        .salary_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let credits = || {
        transactions
            .iter()
            .filter(|t| t.direction == Direction::Credit)
    };

    let salary: Vec<&BankTransaction> = credits()
        .filter(|t| {
            let narration = t.narration.to_lowercase();
            keywords.iter().any(|k| narration.contains(k.as_str()))
        })
        .collect();

    if !salary.is_empty() {
        let total: f64 = salary.iter().map(|t| t.amount).sum();
        return Ok(IncomeEstimate {
            monthly_income: total / salary.len() as f64,
            source: IncomeSource::SalaryCredits,
            salary_transactions: salary.len(),
            first_salary_date: salary.iter().map(|t| t.date).min(),
            last_salary_date: salary.iter().map(|t| t.date).max(),
        });
    }

    let largest = credits()
        .map(|t| t.amount)
        .filter(|amount| *amount > config.large_credit_threshold)
        .max_by(f64::total_cmp);

    let (monthly_income, source) = match (largest, config.default_income) {
        (Some(amount), _) => (amount, IncomeSource::LargestCredit),
        (None, Some(default)) => {
            tracing::warn!(
                default_income = default,
                "no salary or large credits found, using default income"
            );
            (default, IncomeSource::Default)
        }
        (None, None) => return Err(RecordError::InsufficientData),
    };

    Ok(IncomeEstimate {
        monthly_income,
        source,
        salary_transactions: 0,
        first_salary_date: None,
        last_salary_date: None,
    })
}

// ============================================================================
// Mutual fund transactions
// ============================================================================

/// Flatten every scheme's transactions from a provider mutual fund document
pub fn fund_transactions(doc: &Value) -> Result<Vec<FundTransaction>, RecordError> {
    let schemes =
        Cursor::root(RecordKind::MutualFundTransactions, doc).field("mfTransactions")?;

    let mut transactions = Vec::new();
    for scheme in schemes.items()? {
        let name = match scheme.optional("schemeName") {
            Some(cursor) => Some(cursor.string()?.to_string()),
            None => None,
        };
        for txn in scheme.field("txns")?.items()? {
            let order_type = match txn.slot(&FUND_TXN_FIELDS, 0)?.integer()? {
                1 => OrderType::Buy,
                2 => OrderType::Sell,
                other => OrderType::Other(other),
            };
            transactions.push(FundTransaction {
                scheme: name.clone(),
                order_type,
                date: txn.slot(&FUND_TXN_FIELDS, 1)?.date()?,
                amount: txn.slot(&FUND_TXN_FIELDS, 4)?.number()?,
            });
        }
    }
    Ok(transactions)
}

/// Average monthly purchase amount across months that saw a purchase
#[must_use]
pub fn recurring_investment(transactions: &[FundTransaction]) -> Option<RecurringInvestment> {
    let buys: Vec<&FundTransaction> = transactions
        .iter()
        .filter(|t| t.order_type == OrderType::Buy)
        .collect();
    if buys.is_empty() {
        return None;
    }

    let months: BTreeSet<(i16, i8)> = buys.iter().map(|t| (t.date.year(), t.date.month())).collect();
    let total: f64 = buys.iter().map(|t| t.amount).sum();

    Some(RecurringInvestment {
        monthly_average: total / months.len() as f64,
        purchases: buys.len(),
        active_months: months.len(),
    })
}

// ============================================================================
// JSON cursor
// ============================================================================

/// A JSON value together with the path that reached it, for error reporting
#[derive(Debug, Clone)]
struct Cursor<'a> {
    kind: RecordKind,
    path: String,
    value: &'a Value,
}

impl<'a> Cursor<'a> {
    fn root(kind: RecordKind, value: &'a Value) -> Self {
        Self {
            kind,
            path: String::new(),
            value,
        }
    }

    fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.path)
        }
    }

    fn error(&self) -> RecordError {
        let field = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };
        RecordError::data_format(self.kind, field)
    }

    fn optional(&self, name: &str) -> Option<Cursor<'a>> {
        match self.value.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(Cursor {
                kind: self.kind,
                path: self.child_path(name),
                value,
            }),
        }
    }

    fn field(&self, name: &str) -> Result<Cursor<'a>, RecordError> {
        self.optional(name).ok_or_else(|| Cursor {
            kind: self.kind,
            path: self.child_path(name),
            value: self.value,
        }
        .error())
    }

    fn items(&self) -> Result<Vec<Cursor<'a>>, RecordError> {
        let list = self.value.as_array().ok_or_else(|| self.error())?;
        Ok(list
            .iter()
            .enumerate()
            .map(|(i, value)| Cursor {
                kind: self.kind,
                path: format!("{}[{i}]", self.path),
                value,
            })
            .collect())
    }

    /// Element of a record that is either a positional array or an object
    fn optional_slot(&self, names: &[&str], index: usize) -> Option<Cursor<'a>> {
        let name = names[index];
        match self.value {
            Value::Array(list) => match list.get(index) {
                None | Some(Value::Null) => None,
                Some(value) => Some(Cursor {
                    kind: self.kind,
                    path: self.child_path(name),
                    value,
                }),
            },
            _ => self.optional(name),
        }
    }

    fn slot(&self, names: &[&str], index: usize) -> Result<Cursor<'a>, RecordError> {
        self.optional_slot(names, index).ok_or_else(|| Cursor {
            kind: self.kind,
            path: self.child_path(names[index]),
            value: self.value,
        }
        .error())
    }

    fn string(&self) -> Result<&'a str, RecordError> {
        self.value.as_str().ok_or_else(|| self.error())
    }

    /// A number, or a string holding one
    fn number(&self) -> Result<f64, RecordError> {
        let parsed = match self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite()).ok_or_else(|| self.error())
    }

    fn integer(&self) -> Result<i64, RecordError> {
        let parsed = match self.value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.error())
    }

    /// Provider money: `{ "units": "123", "nanos": 450000000 }`
    fn money(&self) -> Result<f64, RecordError> {
        let units = self.field("units")?.number()?;
        let nanos = match self.optional("nanos") {
            Some(cursor) => cursor.number()?,
            None => 0.0,
        };
        Ok(units + nanos / 1e9)
    }

    fn date(&self) -> Result<Date, RecordError> {
        let text = self.string()?;
        // Providers occasionally append a time component
        let day = text.get(..10).unwrap_or(text);
        day.parse::<Date>().map_err(|_| self.error())
    }
}
