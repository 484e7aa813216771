use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use crate::models::{AllocationResult, ScoredLocation, SpendingSummary};

/// Errors from manual budget adjustments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("location '{0}' is not part of the allocation")]
    UnknownLocation(String),

    #[error("invalid budget {budget} for '{location}': must be a finite, non-negative amount")]
    InvalidBudget { location: String, budget: f64 },
}

/// How the proportional split ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Budget split in proportion to cost efficiency
    Allocated,
    /// Nothing was ranked, so there was nothing to fund
    NoCandidates,
    /// Ranked locations exist but their scores sum to zero
    ZeroEfficiency,
}

/// Budget split across ranked locations
///
/// The computed allocations always satisfy the conservation invariant:
/// when the status is `Allocated` they sum to the total budget up to
/// floating-point rounding. Manual overrides live in a separate map and are
/// only merged into the effective view; they are not re-normalized, so the
/// effective view can over- or under-spend the budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAllocation {
    total_budget: f64,
    total_efficiency_score: f64,
    status: AllocationStatus,
    allocations: Vec<AllocationResult>,
    overrides: BTreeMap<String, f64>,
}

/// Split `total_budget` across `ranked` in proportion to cost efficiency
///
/// allocated = (cost_efficiency_score / total_efficiency_score) * total_budget
///
/// No minimum floor is applied and rounding residue is not redistributed.
/// A zero score total leaves every allocation at zero and reports it in
/// the status instead of failing.
pub fn allocate_budget(total_budget: f64, ranked: Vec<ScoredLocation>) -> BudgetAllocation {
    let total_efficiency_score: f64 = ranked.iter().map(|s| s.cost_efficiency_score).sum();

    let status = if ranked.is_empty() {
        AllocationStatus::NoCandidates
    } else if !(total_efficiency_score > 0.0) {
        AllocationStatus::ZeroEfficiency
    } else {
        AllocationStatus::Allocated
    };

    let allocations = ranked
        .into_iter()
        .map(|location| {
            let allocated_budget = match status {
                AllocationStatus::Allocated => {
                    location.cost_efficiency_score / total_efficiency_score * total_budget
                }
                _ => 0.0,
            };
            AllocationResult {
                location,
                allocated_budget,
            }
        })
        .collect();

    match status {
        AllocationStatus::Allocated => tracing::debug!(
            "Allocated {:.2} across ranked locations (total efficiency {:.4})",
            total_budget,
            total_efficiency_score
        ),
        AllocationStatus::NoCandidates => {
            tracing::info!("No ranked locations, budget left unallocated")
        }
        AllocationStatus::ZeroEfficiency => {
            tracing::debug!("Total cost efficiency is zero, budget left unallocated")
        }
    }

    BudgetAllocation {
        total_budget,
        total_efficiency_score,
        status,
        allocations,
        overrides: BTreeMap::new(),
    }
}

impl BudgetAllocation {
    pub fn total_budget(&self) -> f64 {
        self.total_budget
    }

    pub fn total_efficiency_score(&self) -> f64 {
        self.total_efficiency_score
    }

    pub fn status(&self) -> AllocationStatus {
        self.status
    }

    pub fn is_allocated(&self) -> bool {
        self.status == AllocationStatus::Allocated
    }

    /// Proportional allocations, without manual overrides
    pub fn allocations(&self) -> &[AllocationResult] {
        &self.allocations
    }

    pub fn overrides(&self) -> &BTreeMap<String, f64> {
        &self.overrides
    }

    /// Allocations with manual overrides merged in, in rank order
    pub fn effective_allocations(&self) -> Vec<AllocationResult> {
        self.allocations
            .iter()
            .map(|allocation| AllocationResult {
                location: allocation.location.clone(),
                allocated_budget: self.effective_budget_of(allocation),
            })
            .collect()
    }

    /// Budget currently assigned to `name`, override first
    pub fn effective_budget(&self, name: &str) -> Option<f64> {
        self.allocations
            .iter()
            .find(|a| a.location.name == name)
            .map(|a| self.effective_budget_of(a))
    }

    fn effective_budget_of(&self, allocation: &AllocationResult) -> f64 {
        self.overrides
            .get(&allocation.location.name)
            .copied()
            .unwrap_or(allocation.allocated_budget)
    }

    /// Manually set the budget of one location.
    ///
    /// The other locations are left untouched, so after an adjustment the
    /// effective allocations no longer sum to the total budget. Returns the
    /// effective budget the location had before the adjustment.
    pub fn adjust_budget_allocation(&mut self, name: &str, new_budget: f64) -> Result<f64, AllocationError> {
        if !new_budget.is_finite() || new_budget < 0.0 {
            return Err(AllocationError::InvalidBudget {
                location: name.to_string(),
                budget: new_budget,
            });
        }

        let previous = self
            .effective_budget(name)
            .ok_or_else(|| AllocationError::UnknownLocation(name.to_string()))?;

        self.overrides.insert(name.to_string(), new_budget);

        tracing::info!(
            "Manual budget override for {}: {:.2} -> {:.2}",
            name,
            previous,
            new_budget
        );

        Ok(previous)
    }

    /// Drop a manual override, restoring the proportional amount
    pub fn clear_adjustment(&mut self, name: &str) -> Option<f64> {
        self.overrides.remove(name)
    }

    /// Spent and remaining budget over the effective allocations.
    ///
    /// Reported only; a negative remainder means overrides overspent.
    pub fn track_spending(&self) -> SpendingSummary {
        let total_spent: f64 = self
            .allocations
            .iter()
            .map(|a| self.effective_budget_of(a))
            .sum();

        SpendingSummary {
            total_budget: self.total_budget,
            total_spent,
            remaining_budget: self.total_budget - total_spent,
            overridden_locations: self.overrides.len(),
        }
    }
}
