use std::fmt;

use crate::model::RecordKind;

/// Errors raised by a [`RecordSource`](crate::model::RecordSource) fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The provider has no records of this kind
    NotFound(RecordKind),
    /// The fetch itself failed
    Unavailable { kind: RecordKind, reason: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NotFound(kind) => write!(f, "no {kind} records available"),
            SourceError::Unavailable { kind, reason } => {
                write!(f, "failed to fetch {kind} records: {reason}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Errors related to raw financial records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required field is missing or has the wrong shape
    DataFormat { kind: RecordKind, field: String },
    /// No income signal was found and the default fallback is disabled
    InsufficientData,
    Source(SourceError),
}

impl RecordError {
    pub(crate) fn data_format(kind: RecordKind, field: impl Into<String>) -> Self {
        RecordError::DataFormat {
            kind,
            field: field.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::DataFormat { kind, field } => {
                write!(f, "malformed {kind} record: missing or invalid field `{field}`")
            }
            RecordError::InsufficientData => {
                write!(f, "no income signal found and default income is disabled")
            }
            RecordError::Source(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for RecordError {
    fn from(e: SourceError) -> Self {
        RecordError::Source(e)
    }
}

/// Errors related to out-of-domain simulation inputs
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Target age must be strictly greater than current age
    InvalidHorizon { current_age: u32, target_age: u32 },
    /// Equity allocation must lie in 0..=100
    InvalidAllocation(f64),
    /// Any other negative, non-finite or empty input
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidHorizon {
                current_age,
                target_age,
            } => write!(
                f,
                "invalid horizon: target age {target_age} must be greater than current age {current_age}"
            ),
            SimulationError::InvalidAllocation(pct) => {
                write!(f, "invalid equity allocation {pct}%: must be between 0 and 100")
            }
            SimulationError::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Errors from the end-to-end goal planner
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    Record(RecordError),
    Simulation(SimulationError),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Record(e) => write!(f, "{e}"),
            PlanError::Simulation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Record(e) => Some(e),
            PlanError::Simulation(e) => Some(e),
        }
    }
}

impl From<RecordError> for PlanError {
    fn from(e: RecordError) -> Self {
        PlanError::Record(e)
    }
}

impl From<SimulationError> for PlanError {
    fn from(e: SimulationError) -> Self {
        PlanError::Simulation(e)
    }
}

impl From<SourceError> for PlanError {
    fn from(e: SourceError) -> Self {
        PlanError::Record(RecordError::Source(e))
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_format_names_field() {
        let err = RecordError::data_format(RecordKind::NetWorth, "netWorthResponse.assetValues");
        let msg = err.to_string();
        assert!(msg.contains("net worth"));
        assert!(msg.contains("netWorthResponse.assetValues"));
    }

    #[test]
    fn test_plan_error_source_chain() {
        let err = PlanError::from(SourceError::NotFound(RecordKind::BankTransactions));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("bank transactions"));
    }
}
