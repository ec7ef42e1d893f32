//! Stats module - Funding aggregations

mod aggregator;

pub use aggregator::{
    format_amount, AmountStats, FundingAggregator, FundingSummary, ValueCount, YearTotal,
};
