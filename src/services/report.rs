use std::collections::BTreeMap;
use std::fmt;
use crate::core::{AllocationStatus, AverageOutcome, PlacementPlan};
use crate::models::{PlacementReport, PlacementRequest, ScoredLocation};

/// Default width of the efficiency bar chart, in characters
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// Build the serializable report for a plan
pub fn build_report(plan: &PlacementPlan, request: &PlacementRequest) -> PlacementReport {
    PlacementReport {
        generated_at: chrono::Utc::now(),
        request: request.clone(),
        total_candidates: plan.total_candidates,
        filtered_locations: plan.filtered.clone(),
        ranked_locations: plan.ranked.clone(),
        averages: plan.averages,
        allocation_status: plan.allocation.status(),
        allocations: plan.allocation.effective_allocations(),
        spending: plan.allocation.track_spending(),
    }
}

/// Render the human-readable report followed by the efficiency chart
pub fn render_text_report(plan: &PlacementPlan, chart_width: usize) -> String {
    TextReport { plan, chart_width }.to_string()
}

/// Render a horizontal bar chart of cost efficiency, highest first
pub fn render_efficiency_chart(locations: &[ScoredLocation], width: usize) -> String {
    EfficiencyChart { locations, width }.to_string()
}

struct TextReport<'a> {
    plan: &'a PlacementPlan,
    chart_width: usize,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;

        writeln!(
            f,
            "Top {} locations by cost efficiency ({} of {} candidates passed the filters)",
            plan.ranked.len(),
            plan.filtered.len(),
            plan.total_candidates
        )?;
        if plan.ranked.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (i, location) in plan.ranked.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. {:<24} score {:>10.4}  reach {:>10.0}",
                i + 1,
                location.name,
                location.cost_efficiency_score,
                location.audience_reach
            )?;
        }

        writeln!(f)?;
        match plan.averages {
            AverageOutcome::NoLocations => writeln!(f, "Averages: no locations match the filters")?,
            AverageOutcome::Computed { stats, sample_size } => {
                writeln!(f, "Averages over {} filtered locations", sample_size)?;
                writeln!(f, "  Age:              {:.2}", stats.age)?;
                writeln!(f, "  Income:           {:.2}", stats.income)?;
                writeln!(f, "  Employed:         {:.2}%", stats.employed_percentage)?;
            }
        }

        writeln!(f)?;
        let allocation = &plan.allocation;
        writeln!(f, "Budget allocation (total {:.2})", allocation.total_budget())?;
        match allocation.status() {
            AllocationStatus::NoCandidates => {
                writeln!(f, "  No ranked locations, budget not allocated")?;
                write_overrides(f, allocation.overrides())?;
            }
            AllocationStatus::ZeroEfficiency => {
                writeln!(
                    f,
                    "  No valid efficiency scores (total is zero), budget not allocated"
                )?;
                write_overrides(f, allocation.overrides())?;
            }
            AllocationStatus::Allocated => {
                for result in allocation.effective_allocations() {
                    let marker = if allocation.overrides().contains_key(&result.location.name) {
                        " (manual)"
                    } else {
                        ""
                    };
                    writeln!(
                        f,
                        "  {:<24} {:>14.2}{}",
                        result.location.name, result.allocated_budget, marker
                    )?;
                }
            }
        }

        let spending = allocation.track_spending();
        writeln!(f, "Total spent:      {:.2}", spending.total_spent)?;
        writeln!(f, "Remaining budget: {:.2}", spending.remaining_budget)?;

        writeln!(f)?;
        writeln!(f, "Cost efficiency by location")?;
        write!(
            f,
            "{}",
            EfficiencyChart {
                locations: &plan.ranked,
                width: self.chart_width,
            }
        )
    }
}

/// Manual overrides still count as spent when nothing was allocated
fn write_overrides(f: &mut fmt::Formatter<'_>, overrides: &BTreeMap<String, f64>) -> fmt::Result {
    for (name, budget) in overrides {
        writeln!(f, "  {:<24} {:>14.2} (manual)", name, budget)?;
    }
    Ok(())
}

struct EfficiencyChart<'a> {
    locations: &'a [ScoredLocation],
    width: usize,
}

impl fmt::Display for EfficiencyChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<&ScoredLocation> = self.locations.iter().collect();
        sorted.sort_by(|a, b| {
            b.cost_efficiency_score
                .partial_cmp(&a.cost_efficiency_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let max = sorted.first().map(|s| s.cost_efficiency_score).unwrap_or(0.0);
        let label_width = sorted.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);

        for location in sorted {
            let bar_len = if max > 0.0 {
                (location.cost_efficiency_score / max * self.width as f64).round() as usize
            } else {
                0
            };
            writeln!(
                f,
                "{:<label_width$} | {} {:.4}",
                location.name,
                "#".repeat(bar_len),
                location.cost_efficiency_score,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Planner;
    use crate::models::{Dataset, LocationRecord};

    fn create_scored(name: &str, score: f64) -> ScoredLocation {
        ScoredLocation {
            name: name.to_string(),
            record: LocationRecord {
                population: 100.0,
                age: 30.0,
                income: 1000.0,
                employed_population: 50.0,
                ad_cost: 10.0,
                foot_traffic: 20.0,
            },
            audience_reach: score * 10.0,
            cost_efficiency_score: score,
        }
    }

    fn create_plan(budget: f64, ad_cost_a: f64, ad_cost_b: f64) -> PlacementPlan {
        let record = |foot_traffic: f64, ad_cost: f64| LocationRecord {
            population: 1000.0,
            age: 30.0,
            income: 40000.0,
            employed_population: 500.0,
            ad_cost,
            foot_traffic,
        };
        let dataset: Dataset = vec![
            ("Alpha".to_string(), record(200.0, ad_cost_a)),
            ("Beta".to_string(), record(100.0, ad_cost_b)),
        ]
        .into_iter()
        .collect();

        Planner::default()
            .plan(&dataset, &PlacementRequest::new(budget))
            .unwrap()
    }

    #[test]
    fn test_chart_sorted_and_scaled() {
        let chart = render_efficiency_chart(&[create_scored("b", 1.0), create_scored("a", 2.0)], 10);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines, vec!["a | ########## 2.0000", "b | ##### 1.0000"]);
    }

    #[test]
    fn test_chart_aligns_non_ascii_names() {
        let chart = render_efficiency_chart(&[create_scored("Bern", 1.0), create_scored("Zürich", 2.0)], 10);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines, vec!["Zürich | ########## 2.0000", "Bern   | ##### 1.0000"]);
    }

    #[test]
    fn test_chart_with_zero_scores() {
        let chart = render_efficiency_chart(&[create_scored("x", 0.0)], 10);
        assert_eq!(chart, "x |  0.0000\n");
    }

    #[test]
    fn test_text_report_lists_allocation() {
        let text = render_text_report(&create_plan(300.0, 100.0, 25.0), DEFAULT_CHART_WIDTH);

        assert!(text.contains("Top 2 locations"));
        assert!(text.contains("Averages over 2 filtered locations"));
        assert!(text.contains("Remaining budget: 0.00"));
        assert!(text.contains("Cost efficiency by location"));
    }

    #[test]
    fn test_text_report_zero_efficiency() {
        let plan = create_plan(300.0, 0.0, 0.0);
        assert_eq!(plan.allocation.status(), AllocationStatus::ZeroEfficiency);

        let text = render_text_report(&plan, DEFAULT_CHART_WIDTH);
        assert!(text.contains("No valid efficiency scores"));
        assert!(text.contains("Remaining budget: 300.00"));
    }

    #[test]
    fn test_zero_efficiency_report_lists_overrides() {
        let mut plan = create_plan(300.0, 0.0, 0.0);
        plan.allocation.adjust_budget_allocation("Alpha", 50.0).unwrap();

        let text = render_text_report(&plan, DEFAULT_CHART_WIDTH);
        let manual: Vec<&str> = text.lines().filter(|l| l.contains("(manual)")).collect();

        assert_eq!(manual.len(), 1);
        assert!(manual[0].trim_start().starts_with("Alpha"));
        assert!(manual[0].contains("50.00"));
        assert!(text.contains("Total spent:      50.00"));
        assert!(text.contains("Remaining budget: 250.00"));
    }

    #[test]
    fn test_report_marks_manual_override() {
        let mut plan = create_plan(300.0, 100.0, 25.0);
        plan.allocation.adjust_budget_allocation("Alpha", 10.0).unwrap();

        let text = render_text_report(&plan, DEFAULT_CHART_WIDTH);
        assert!(text.contains("(manual)"));

        let report = build_report(&plan, &PlacementRequest::new(300.0));
        assert_eq!(report.spending.overridden_locations, 1);
        assert_eq!(report.allocations[1].location.name, "Alpha");
        assert_eq!(report.allocations[1].allocated_budget, 10.0);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let plan = create_plan(300.0, 100.0, 25.0);
        let report = build_report(&plan, &PlacementRequest::new(300.0));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["allocation_status"], "allocated");
        assert_eq!(json["ranked_locations"][0]["name"], "Beta");
        assert_eq!(json["averages"]["outcome"], "computed");
    }
}
