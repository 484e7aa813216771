// Service exports
pub mod dataset;
pub mod report;

pub use dataset::{load_dataset, load_dataset_or_empty, parse_dataset, DatasetError};
pub use report::{build_report, render_efficiency_chart, render_text_report, DEFAULT_CHART_WIDTH};
