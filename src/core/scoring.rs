use thiserror::Error;
use crate::models::{Dataset, LocationRecord, ScoredLocation};

/// Data-integrity failures detected while scoring
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("cannot score '{location}': population is zero")]
    ZeroPopulation { location: String },

    #[error("cannot score '{location}': {reason}")]
    InvalidRecord { location: String, reason: String },

    #[error("cannot score '{0}': location is not in the dataset")]
    UnknownLocation(String),
}

/// Audience reach: foot traffic scaled by the employment ratio
///
/// reach = round(foottraffic * employedpopulation / population)
///
/// Halves round to the even neighbour, so `2.5` becomes `2`.
pub fn calculate_audience_reach(location: &str, record: &LocationRecord) -> Result<f64, ScoringError> {
    if record.population == 0.0 {
        return Err(ScoringError::ZeroPopulation {
            location: location.to_string(),
        });
    }
    record.check().map_err(|reason| ScoringError::InvalidRecord {
        location: location.to_string(),
        reason,
    })?;

    let employment_ratio = record.employed_population / record.population;
    Ok((record.foot_traffic * employment_ratio).round_ties_even())
}

/// Audience reach per unit of ad cost; a free placement scores zero
#[inline]
pub fn calculate_cost_efficiency(audience_reach: f64, ad_cost: f64) -> f64 {
    if ad_cost == 0.0 {
        0.0
    } else {
        audience_reach / ad_cost
    }
}

/// Score a single location
pub fn score_location(name: &str, record: &LocationRecord) -> Result<ScoredLocation, ScoringError> {
    let audience_reach = calculate_audience_reach(name, record)?;
    let cost_efficiency_score = calculate_cost_efficiency(audience_reach, record.ad_cost);
    if !cost_efficiency_score.is_finite() {
        return Err(ScoringError::InvalidRecord {
            location: name.to_string(),
            reason: format!("ad_cost {} is too small to divide by", record.ad_cost),
        });
    }

    Ok(ScoredLocation {
        name: name.to_string(),
        record: *record,
        audience_reach,
        cost_efficiency_score,
    })
}

/// Score the named locations in order, failing on the first bad record
pub fn score_locations<S: AsRef<str>>(
    dataset: &Dataset,
    names: &[S],
) -> Result<Vec<ScoredLocation>, ScoringError> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let record = dataset
                .get(name)
                .ok_or_else(|| ScoringError::UnknownLocation(name.to_string()))?;
            score_location(name, record)
        })
        .collect()
}
