use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::core::filters::{FilterCriteria, IntRange};

/// Inputs for one placement planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_finite_inputs"))]
pub struct PlacementRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub budget: f64,
    #[serde(default)]
    pub age_range: Option<IntRange>,
    #[serde(default)]
    pub income_range: Option<IntRange>,
    #[serde(default)]
    pub min_employed_pct: Option<f64>,
    /// Falls back to the planner's default when absent
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl PlacementRequest {
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            age_range: None,
            income_range: None,
            min_employed_pct: None,
            top_n: None,
        }
    }

    pub fn with_age_range(mut self, range: IntRange) -> Self {
        self.age_range = Some(range);
        self
    }

    pub fn with_income_range(mut self, range: IntRange) -> Self {
        self.income_range = Some(range);
        self
    }

    pub fn with_min_employed_pct(mut self, pct: f64) -> Self {
        self.min_employed_pct = Some(pct);
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            age_range: self.age_range,
            income_range: self.income_range,
            min_employed_pct: self.min_employed_pct,
        }
    }
}

fn validate_finite_inputs(request: &PlacementRequest) -> Result<(), ValidationError> {
    if !request.budget.is_finite() {
        let mut err = ValidationError::new("budget_not_finite");
        err.message = Some("budget must be a finite number".into());
        return Err(err);
    }

    if let Some(pct) = request.min_employed_pct {
        if !pct.is_finite() {
            let mut err = ValidationError::new("employed_pct_not_finite");
            err.message = Some("employed percentage threshold must be a finite number".into());
            return Err(err);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_budget_is_valid() {
        let request = PlacementRequest::new(1000.0)
            .with_age_range(IntRange::new(20, 40))
            .with_top_n(5);

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_zero_and_negative_budget_rejected() {
        assert!(PlacementRequest::new(0.0).validate().is_err());
        assert!(PlacementRequest::new(-25.0).validate().is_err());
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(PlacementRequest::new(f64::NAN).validate().is_err());
        assert!(PlacementRequest::new(f64::INFINITY).validate().is_err());
        assert!(PlacementRequest::new(10.0)
            .with_min_employed_pct(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_criteria_carries_filters() {
        let request = PlacementRequest::new(10.0)
            .with_income_range(IntRange::new(30000, 60000))
            .with_min_employed_pct(45.5);
        let criteria = request.criteria();

        assert_eq!(criteria.age_range, None);
        assert_eq!(criteria.income_range, Some(IntRange::new(30000, 60000)));
        assert_eq!(criteria.min_employed_pct, Some(45.5));
    }
}
