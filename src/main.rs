//! Reddit Harvester - CLI entry point.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use reddit_harvester::{
    api::RedditApi,
    cli::Args,
    config::{resolve_credentials, resolve_filters, resolve_refresh_token, Config},
    crawl::{CrawlEngine, CrawlSource},
    error::{exit_codes, Error, Result},
    filters::FilterSet,
    output::{
        print_banner, print_crawl_stats, print_error, print_info, print_run_stats,
        print_run_summary, CrawlStats, RecordFormat, RecordWriter, RunStats,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::UnsupportedUrl(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api(_)
                | Error::Authentication { .. }
                | Error::Authorization
                | Error::NotFound
                | Error::Http(_)
                | Error::Json(_) => ExitCode::from(exit_codes::API_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging on stderr; stdout carries the records
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    // Print banner
    print_banner();

    // Load configuration; without --config a missing default file just
    // means built-in defaults
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let default_path = Path::new("config.toml");
            if default_path.exists() {
                Config::load(default_path)?
            } else {
                tracing::debug!("no config file at {}, using defaults", default_path.display());
                Config::default()
            }
        }
    };

    // Merge CLI arguments into config
    let urls = args.urls.clone();
    let format = RecordFormat::from(args.format);
    args.merge_into_config(&mut config);

    // Resolve runtime values
    let credentials = resolve_credentials(&config.account);
    let refresh_token = resolve_refresh_token(&config.account);
    let filters = resolve_filters(&config.filters)?;

    print_run_summary(
        &urls,
        config.options.comments,
        config.options.recursion,
        &format.to_string(),
    );

    // Initialize API client
    print_info("Connecting to reddit...");
    let api = RedditApi::new(
        credentials,
        refresh_token,
        config.options.comments,
        config.options.morecomments,
    )?;

    let mut writer = RecordWriter::new(io::stdout().lock(), format);

    // Process each target
    let mut run_stats = RunStats::default();
    for url in &urls {
        print_info(&format!("Processing target: {}", url));

        match crawl_target(&api, url, filters, config.options.recursion, &mut writer).await {
            Ok(stats) => {
                print_crawl_stats(&stats);
                run_stats.add_crawl(&stats);
            }
            Err(e) => {
                print_error(&format!("Failed to process {}: {}", url, e));
                run_stats.mark_target_failed();
            }
        }
    }

    writer.flush()?;

    // Print run statistics
    print_run_stats(&run_stats);

    if run_stats.targets_failed > 0 {
        return Ok(exit_codes::SOME_TARGETS_FAILED);
    }

    Ok(exit_codes::SUCCESS)
}

/// Crawl a single target and write its records.
async fn crawl_target<W: Write>(
    api: &RedditApi,
    url: &str,
    filters: FilterSet,
    max_depth: u32,
    writer: &mut RecordWriter<W>,
) -> Result<CrawlStats> {
    let source = CrawlSource::from_target(api, url, filters)?;
    let mut engine = CrawlEngine::new(api, source, max_depth);

    // Each crawl opens its own record stream.
    writer.write_version()?;

    let mut links = 0u64;
    while let Some(record) = engine.next().await? {
        writer.write_record(&record)?;
        links += 1;
    }

    Ok(CrawlStats {
        target: url.to_string(),
        links,
        posts: engine.posts_seen() as u64,
        depth: engine.depth(),
    })
}
