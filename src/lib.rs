//! Ad Placement - ranks candidate cities for advertising and splits a budget
//!
//! This library provides the placement pipeline: locations are filtered by
//! demographics, scored by audience reach per unit of ad cost, ranked, and
//! the budget is allocated across the top locations in proportion to score.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Planner, PlacementPlan, PlanError, IntRange, FilterCriteria, AllocationStatus, AverageOutcome};
pub use crate::models::{Dataset, LocationRecord, ScoredLocation, AllocationResult, AverageStats, PlacementRequest, PlacementReport};
