use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use crate::models::{Dataset, LocationRecord};

/// Errors raised while parsing a `MIN-MAX` range argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("invalid range '{0}': expected MIN-MAX, e.g. 25-40")]
    Malformed(String),

    #[error("invalid range '{input}': bound '{bound}' is not an integer")]
    InvalidBound { input: String, bound: String },

    #[error("invalid range '{input}': minimum {min} is greater than maximum {max}")]
    Inverted { input: String, min: i64, max: i64 },
}

/// Inclusive integer range used for age and income filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Membership test on the truncated value.
    ///
    /// `35.9` is tested as `35`, so it matches `30-35`.
    #[inline]
    pub fn contains_truncated(&self, value: f64) -> bool {
        let truncated = value.trunc() as i64;
        truncated >= self.min && truncated <= self.max
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for IntRange {
    type Err = RangeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (min, max) = input
            .trim()
            .split_once('-')
            .ok_or_else(|| RangeParseError::Malformed(input.to_string()))?;

        let parse_bound = |bound: &str| {
            bound.trim().parse::<i64>().map_err(|_| RangeParseError::InvalidBound {
                input: input.to_string(),
                bound: bound.trim().to_string(),
            })
        };

        let min = parse_bound(min)?;
        let max = parse_bound(max)?;

        if min > max {
            return Err(RangeParseError::Inverted {
                input: input.to_string(),
                min,
                max,
            });
        }

        Ok(Self { min, max })
    }
}

/// Optional filter criteria; every supplied criterion must hold
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    pub age_range: Option<IntRange>,
    pub income_range: Option<IntRange>,
    pub min_employed_pct: Option<f64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.age_range.is_none() && self.income_range.is_none() && self.min_employed_pct.is_none()
    }
}

/// Check a single record against the criteria
#[inline]
pub fn matches_criteria(record: &LocationRecord, criteria: &FilterCriteria) -> bool {
    if let Some(range) = criteria.age_range {
        if !range.contains_truncated(record.age) {
            return false;
        }
    }

    if let Some(range) = criteria.income_range {
        if !range.contains_truncated(record.income) {
            return false;
        }
    }

    if let Some(threshold) = criteria.min_employed_pct {
        // Records without a positive population never meet a threshold
        match record.employed_percentage() {
            Some(pct) if pct >= threshold => {}
            _ => return false,
        }
    }

    true
}

/// Names of the locations that satisfy `criteria`, in dataset order
pub fn filter_locations(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<String> {
    let filtered: Vec<String> = dataset
        .iter()
        .filter(|(_, record)| matches_criteria(record, criteria))
        .map(|(name, _)| name.to_string())
        .collect();

    tracing::debug!(
        "Filter kept {} of {} locations (criteria: {:?})",
        filtered.len(),
        dataset.len(),
        criteria
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_record(age: f64, income: f64, population: f64, employed: f64) -> LocationRecord {
        LocationRecord {
            population,
            age,
            income,
            employed_population: employed,
            ad_cost: 500.0,
            foot_traffic: 10000.0,
        }
    }

    fn create_dataset() -> Dataset {
        vec![
            ("Denver".to_string(), create_record(34.5, 71000.0, 700000.0, 427000.0)),
            ("Miami".to_string(), create_record(40.2, 44000.0, 450000.0, 200000.0)),
            ("Boise".to_string(), create_record(36.9, 58000.0, 230000.0, 140000.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_parse_range() {
        assert_eq!("25-40".parse::<IntRange>(), Ok(IntRange::new(25, 40)));
        assert_eq!(" 30000 - 60000 ".parse::<IntRange>(), Ok(IntRange::new(30000, 60000)));
    }

    #[test]
    fn test_parse_range_errors() {
        assert!(matches!("25".parse::<IntRange>(), Err(RangeParseError::Malformed(_))));
        assert!(matches!("a-40".parse::<IntRange>(), Err(RangeParseError::InvalidBound { .. })));
        assert!(matches!("25-40.5".parse::<IntRange>(), Err(RangeParseError::InvalidBound { .. })));
        assert!(matches!("40-25".parse::<IntRange>(), Err(RangeParseError::Inverted { .. })));
    }

    #[test]
    fn test_truncated_membership() {
        let range = IntRange::new(30, 35);

        assert!(range.contains_truncated(35.9));
        assert!(range.contains_truncated(30.0));
        assert!(!range.contains_truncated(29.99));
        assert!(!range.contains_truncated(36.0));
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let dataset = create_dataset();
        let filtered = filter_locations(&dataset, &FilterCriteria::default());

        assert_eq!(filtered, vec!["Denver", "Miami", "Boise"]);
    }

    #[test]
    fn test_age_filter() {
        let dataset = create_dataset();
        let criteria = FilterCriteria {
            age_range: Some(IntRange::new(34, 36)),
            ..Default::default()
        };

        // Boise (36.9) truncates to 36 and stays in
        assert_eq!(filter_locations(&dataset, &criteria), vec!["Denver", "Boise"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let dataset = create_dataset();
        let criteria = FilterCriteria {
            age_range: Some(IntRange::new(30, 45)),
            income_range: Some(IntRange::new(50000, 80000)),
            min_employed_pct: Some(60.0),
        };

        // Denver 61.0%, Boise ~60.9%, Miami fails on income
        assert_eq!(filter_locations(&dataset, &criteria), vec!["Denver", "Boise"]);
    }

    #[test]
    fn test_employment_threshold() {
        let dataset = create_dataset();
        let criteria = FilterCriteria {
            min_employed_pct: Some(60.9),
            ..Default::default()
        };

        assert_eq!(filter_locations(&dataset, &criteria), vec!["Denver"]);
    }

    #[test]
    fn test_zero_population_never_meets_threshold() {
        let record = create_record(30.0, 50000.0, 0.0, 0.0);
        let criteria = FilterCriteria {
            min_employed_pct: Some(0.0),
            ..Default::default()
        };

        assert!(!matches_criteria(&record, &criteria));
    }

    #[test]
    fn test_no_match_returns_empty() {
        let dataset = create_dataset();
        let criteria = FilterCriteria {
            age_range: Some(IntRange::new(80, 90)),
            ..Default::default()
        };

        assert!(filter_locations(&dataset, &criteria).is_empty());
    }
}
