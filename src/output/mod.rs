pub mod formatter;
pub mod report;

pub use formatter::{format_failures, format_result_list, format_stats_summary, should_use_colors};
pub use report::ResultsReport;
