//! Statistics reporting.

use console::style;

/// Results of crawling a single target.
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub target: String,
    pub links: u64,
    pub posts: u64,
    pub depth: u32,
}

/// Aggregate results across all targets in a run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub targets_processed: u64,
    pub targets_failed: u64,
    pub links: u64,
    pub posts: u64,
}

impl RunStats {
    /// Fold one finished crawl into the run totals.
    pub fn add_crawl(&mut self, stats: &CrawlStats) {
        self.targets_processed += 1;
        self.links += stats.links;
        self.posts += stats.posts;
    }

    pub fn mark_target_failed(&mut self) {
        self.targets_failed += 1;
    }
}

/// Print statistics for a single target.
pub fn print_crawl_stats(stats: &CrawlStats) {
    eprintln!();
    eprintln!(
        "{}",
        style(format!("Statistics for {}:", stats.target)).bold()
    );
    eprintln!("  Links:  {}", stats.links);
    eprintln!("  Posts:  {}", stats.posts);
    if stats.depth > 0 {
        eprintln!("  Depth:  {}", stats.depth);
    }
}

/// Print aggregate statistics across all targets.
pub fn print_run_stats(stats: &RunStats) {
    eprintln!();
    eprintln!("{}", style("═".repeat(50)).dim());
    eprintln!("{}", style("Run Statistics:").bold());
    eprintln!("  Targets processed: {}", stats.targets_processed);
    if stats.targets_failed > 0 {
        eprintln!(
            "  Targets failed:    {}",
            style(stats.targets_failed).red()
        );
    }
    eprintln!("  Posts:  {}", stats.posts);
    eprintln!("  Links:  {} collected", stats.links);
    eprintln!("{}", style("═".repeat(50)).dim());
}
