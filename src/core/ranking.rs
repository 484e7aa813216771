use std::cmp::Ordering;
use crate::models::ScoredLocation;

/// Order locations by cost efficiency (descending) and keep the best `top_n`
///
/// The sort is stable: equally efficient locations keep their input order.
/// Asking for more locations than exist returns all of them.
pub fn rank_locations(mut scored: Vec<ScoredLocation>, top_n: usize) -> Vec<ScoredLocation> {
    scored.sort_by(|a, b| {
        b.cost_efficiency_score
            .partial_cmp(&a.cost_efficiency_score)
            .unwrap_or(Ordering::Equal)
    });

    scored.truncate(top_n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationRecord;

    fn create_scored(name: &str, score: f64) -> ScoredLocation {
        ScoredLocation {
            name: name.to_string(),
            record: LocationRecord {
                population: 1000.0,
                age: 30.0,
                income: 40000.0,
                employed_population: 600.0,
                ad_cost: 100.0,
                foot_traffic: 500.0,
            },
            audience_reach: score * 100.0,
            cost_efficiency_score: score,
        }
    }

    fn names(ranked: &[ScoredLocation]) -> Vec<&str> {
        ranked.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank_locations(
            vec![create_scored("low", 0.5), create_scored("high", 3.0), create_scored("mid", 1.2)],
            10,
        );

        assert_eq!(names(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_locations(
            vec![
                create_scored("first", 1.0),
                create_scored("top", 2.0),
                create_scored("second", 1.0),
                create_scored("third", 1.0),
            ],
            4,
        );

        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let ranked = rank_locations(
            vec![create_scored("a", 1.0), create_scored("b", 2.0), create_scored("c", 3.0)],
            2,
        );

        assert_eq!(names(&ranked), vec!["c", "b"]);
    }

    #[test]
    fn test_top_n_larger_than_candidates() {
        let ranked = rank_locations(vec![create_scored("a", 1.0)], 24);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_zero_top_n_is_empty() {
        let ranked = rank_locations(vec![create_scored("a", 1.0), create_scored("b", 2.0)], 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let input = vec![
            create_scored("a", 0.7),
            create_scored("b", 2.1),
            create_scored("c", 0.7),
            create_scored("d", 1.4),
        ];

        let once = rank_locations(input, 3);
        let twice = rank_locations(once.clone(), 3);

        assert_eq!(once, twice);
    }
}
