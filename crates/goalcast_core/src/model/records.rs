//! Raw record kinds and the retrieval interface
//!
//! Records arrive as opaque JSON documents exactly as the external provider
//! produced them. The core never fetches anything itself: a caller supplies a
//! [`RecordSource`] and the normalizer dispatches on [`RecordKind`].

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// The kinds of financial records the normalizer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    NetWorth,
    BankTransactions,
    MutualFundTransactions,
}

impl RecordKind {
    /// Stable snake_case key, also used as the file stem by file-backed sources
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            RecordKind::NetWorth => "net_worth",
            RecordKind::BankTransactions => "bank_transactions",
            RecordKind::MutualFundTransactions => "mutual_fund_transactions",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::NetWorth => "net worth",
            RecordKind::BankTransactions => "bank transactions",
            RecordKind::MutualFundTransactions => "mutual fund transactions",
        };
        f.write_str(label)
    }
}

/// A capability that returns raw provider records for a given kind.
///
/// Implementations do all I/O; the core treats the returned document as
/// untrusted structured data and validates only the fields it needs.
pub trait RecordSource {
    fn fetch(&self, kind: RecordKind) -> Result<serde_json::Value, SourceError>;
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn fetch(&self, kind: RecordKind) -> Result<serde_json::Value, SourceError> {
        (**self).fetch(kind)
    }
}

/// Direction of a bank transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Credit,
    Debit,
    /// Provider codes that are neither (opening balance, interest, TDS, ...)
    Other(i64),
}

/// A single normalized bank transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    pub amount: f64,
    pub narration: String,
    pub date: Date,
    pub direction: Direction,
    pub balance: Option<f64>,
}

/// Buy or sell side of a mutual fund order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Buy,
    Sell,
    Other(i64),
}

/// A single normalized mutual fund transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundTransaction {
    pub scheme: Option<String>,
    pub order_type: OrderType,
    pub date: Date,
    pub amount: f64,
}
