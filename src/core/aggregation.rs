use serde::{Deserialize, Serialize};
use crate::models::{AverageStats, Dataset};

/// Result of averaging over the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AverageOutcome {
    Computed {
        stats: AverageStats,
        sample_size: usize,
    },
    /// Nothing passed the filters
    NoLocations,
}

impl AverageOutcome {
    /// The averages, all zero when there were no locations
    pub fn stats(&self) -> AverageStats {
        match self {
            AverageOutcome::Computed { stats, .. } => *stats,
            AverageOutcome::NoLocations => AverageStats::default(),
        }
    }

    pub fn sample_size(&self) -> usize {
        match self {
            AverageOutcome::Computed { sample_size, .. } => *sample_size,
            AverageOutcome::NoLocations => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AverageOutcome::NoLocations)
    }
}

/// Mean age, income and employed percentage of the filtered locations
///
/// Averages describe the whole addressable market, so callers pass the
/// filtered names, not the ranked top-N. Names missing from the dataset and
/// records without a positive population are skipped.
pub fn calculate_averages<S: AsRef<str>>(dataset: &Dataset, filtered_names: &[S]) -> AverageOutcome {
    let mut age_sum = 0.0;
    let mut income_sum = 0.0;
    let mut employed_sum = 0.0;
    let mut count = 0usize;

    for name in filtered_names {
        let name = name.as_ref();
        let Some(record) = dataset.get(name) else {
            tracing::debug!("Skipping unknown location in averages: {}", name);
            continue;
        };
        let Some(employed_pct) = record.employed_percentage() else {
            tracing::debug!("Skipping {} in averages: population is not positive", name);
            continue;
        };

        age_sum += record.age;
        income_sum += record.income;
        employed_sum += employed_pct;
        count += 1;
    }

    if count == 0 {
        return AverageOutcome::NoLocations;
    }

    let n = count as f64;
    AverageOutcome::Computed {
        stats: AverageStats {
            age: age_sum / n,
            income: income_sum / n,
            employed_percentage: employed_sum / n,
        },
        sample_size: count,
    }
}
