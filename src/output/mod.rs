//! Output module for link records and console reporting.
//!
//! Provides:
//! - Link record serialization (plain and JSONL)
//! - Colored console output on stderr
//! - Statistics reporting

pub mod console;
pub mod records;
pub mod stats;

pub use console::{print_banner, print_error, print_info, print_run_summary, print_warning};
pub use records::{RecordFormat, RecordWriter};
pub use stats::{print_crawl_stats, print_run_stats, CrawlStats, RunStats};
