mod ids;
mod results;
mod table;

pub use ids::AssetClass;
pub use results::{
    AssetEstimate, EstimateOutcome, ExpectedReturn, ExpectedReturnTable, round_percent,
};
pub use table::{PeriodReturnTable, ReturnColumn};
