use serde::{Deserialize, Serialize};
use crate::core::{AllocationStatus, AverageOutcome};
use crate::models::domain::{AllocationResult, ScoredLocation};
use crate::models::requests::PlacementRequest;

/// Spent and remaining budget, reported and never enforced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub overridden_locations: usize,
}

/// Machine-readable placement report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub request: PlacementRequest,
    pub total_candidates: usize,
    pub filtered_locations: Vec<String>,
    pub ranked_locations: Vec<ScoredLocation>,
    pub averages: AverageOutcome,
    pub allocation_status: AllocationStatus,
    pub allocations: Vec<AllocationResult>,
    pub spending: SpendingSummary,
}
