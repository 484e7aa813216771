use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use crate::core::IntRange;
use crate::models::PlacementRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with an efficiency bar chart
    Text,
    /// JSON report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ad-placement")]
#[command(about = "Rank cities for ad placement and split a budget across the best ones", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Total advertising budget (must be positive)
    #[arg(long, allow_negative_numbers = true)]
    pub budget: f64,

    /// Inclusive age range, e.g. 25-40
    #[arg(long, value_name = "MIN-MAX")]
    pub age: Option<IntRange>,

    /// Inclusive income range, e.g. 30000-70000
    #[arg(long, value_name = "MIN-MAX")]
    pub income: Option<IntRange>,

    /// Minimum employed share of the population, in percent
    #[arg(long = "employedpercentage", visible_alias = "employed-percentage", value_name = "PCT")]
    pub employed_percentage: Option<f64>,

    /// Number of top locations to fund [default: 24]
    #[arg(long = "top_num", visible_alias = "top-num", allow_negative_numbers = true)]
    pub top_num: Option<i64>,

    /// Demographics dataset [default: demographics.json]
    #[arg(short, long, env = "ADPLACE_DATASET")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Extra configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build the planning request; a negative top-N means "fund nothing"
    pub fn to_request(&self) -> PlacementRequest {
        PlacementRequest {
            budget: self.budget,
            age_range: self.age,
            income_range: self.income,
            min_employed_pct: self.employed_percentage,
            top_n: self.top_num.map(|n| usize::try_from(n).unwrap_or(0)),
        }
    }
}
