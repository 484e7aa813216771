// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AllocationResult, AverageStats, Dataset, LocationRecord, ScoredLocation};
pub use requests::PlacementRequest;
pub use responses::{PlacementReport, SpendingSummary};
