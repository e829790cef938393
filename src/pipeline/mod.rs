pub mod aggregator;
pub mod classifier;
pub mod state;

pub use aggregator::{aggregate, aggregate_at, organization_from_repository};
pub use classifier::classify;
pub use state::AggregationContext;
