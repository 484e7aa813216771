use thiserror::Error;
use validator::{Validate, ValidationErrors};
use crate::models::{Dataset, PlacementRequest, ScoredLocation};
use crate::core::{
    aggregation::{calculate_averages, AverageOutcome},
    allocation::{allocate_budget, AllocationStatus, BudgetAllocation},
    filters::filter_locations,
    ranking::rank_locations,
    scoring::{score_locations, ScoringError},
};

/// Ranked list size used when a request does not name one
pub const DEFAULT_TOP_N: usize = 24;

/// Errors that abort a planning run
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationErrors),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Result of the planning pipeline
#[derive(Debug, Clone)]
pub struct PlacementPlan {
    /// Locations passing the filters, in dataset order
    pub filtered: Vec<String>,
    /// Top locations by cost efficiency
    pub ranked: Vec<ScoredLocation>,
    pub allocation: BudgetAllocation,
    /// Averages over `filtered`, not `ranked`
    pub averages: AverageOutcome,
    pub total_candidates: usize,
}

/// Placement pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Request validation
/// 2. Filtering by age, income and employment
/// 3. Averages over the filtered set
/// 4. Scoring of the filtered set
/// 5. Ranking and top-N truncation
/// 6. Proportional budget allocation
#[derive(Debug, Clone)]
pub struct Planner {
    default_top_n: usize,
}

impl Planner {
    pub fn new(default_top_n: usize) -> Self {
        Self { default_top_n }
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Run the full pipeline for one request
    ///
    /// A zero efficiency total or an empty filtered set is reported on the
    /// plan, not returned as an error.
    pub fn plan(&self, dataset: &Dataset, request: &PlacementRequest) -> Result<PlacementPlan, PlanError> {
        request.validate()?;

        let total_candidates = dataset.len();
        let top_n = request.top_n.unwrap_or(self.default_top_n);

        let filtered = filter_locations(dataset, &request.criteria());
        let averages = calculate_averages(dataset, &filtered);

        if averages.is_empty() {
            tracing::warn!(
                "No locations match the filters ({} candidates)",
                total_candidates
            );
        }

        let scored = score_locations(dataset, &filtered)?;
        let ranked = rank_locations(scored, top_n);
        let allocation = allocate_budget(request.budget, ranked.clone());

        tracing::info!(
            "Planned {} of {} filtered locations (from {} candidates), allocation: {:?}",
            ranked.len(),
            filtered.len(),
            total_candidates,
            allocation.status()
        );

        if allocation.status() == AllocationStatus::ZeroEfficiency {
            tracing::warn!("Ranked locations have no cost efficiency, nothing was allocated");
        }

        Ok(PlacementPlan {
            filtered,
            ranked,
            allocation,
            averages,
            total_candidates,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}
