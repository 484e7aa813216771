// Core algorithm exports
pub mod aggregation;
pub mod allocation;
pub mod filters;
pub mod planner;
pub mod ranking;
pub mod scoring;

pub use aggregation::{calculate_averages, AverageOutcome};
pub use allocation::{allocate_budget, AllocationError, AllocationStatus, BudgetAllocation};
pub use filters::{filter_locations, matches_criteria, FilterCriteria, IntRange, RangeParseError};
pub use planner::{PlacementPlan, PlanError, Planner, DEFAULT_TOP_N};
pub use ranking::rank_locations;
pub use scoring::{calculate_audience_reach, calculate_cost_efficiency, score_location, score_locations, ScoringError};
