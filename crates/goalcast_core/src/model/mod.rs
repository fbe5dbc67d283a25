mod market;
mod params;
mod portfolio;
mod records;
mod results;

pub use market::{MarketAssumptions, ReturnAssumption};
pub use params::SimulationParameters;
pub(crate) use params::require_non_negative;
pub use portfolio::{
    AssetClass, IncomeEstimate, IncomeSource, PortfolioSnapshot, RecurringInvestment,
};
pub(crate) use portfolio::round_to;
pub use records::{
    BankTransaction, Direction, FundTransaction, OrderType, RecordKind, RecordSource,
};
pub use results::{
    Affordability, AllocationComparison, AllocationPoint, AllocationScenario, Recommendation,
    SimulationResult,
};
