//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, DateBound};
use crate::output::RecordFormat;

/// Reddit link harvester CLI.
#[derive(Parser, Debug)]
#[command(
    name = "reddit-harvester",
    version,
    about = "Collect outbound media links from reddit posts and comments",
    long_about = "A CLI tool that walks reddit submissions, subreddit listings, and user feeds,\n\
                  collecting every external link found in post bodies and comment trees."
)]
pub struct Args {
    /// Target URL(s): submission, subreddit, or user feed links.
    #[arg(required = true, num_args = 1..)]
    pub urls: Vec<String>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OAuth refresh token for acting as a logged-in account.
    #[arg(short = 't', long = "refresh-token", env = "REDDIT_REFRESH_TOKEN")]
    pub refresh_token: Option<String>,

    /// Installed-app client id (must be set together with --user-agent).
    #[arg(long = "client-id", env = "REDDIT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// User agent sent with every request (must be set together with --client-id).
    #[arg(short = 'a', long = "user-agent", env = "REDDIT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Maximum number of comments to fetch per post (0 disables comments).
    #[arg(long)]
    pub comments: Option<u32>,

    /// Resolve "more comments" stubs with additional API calls.
    #[arg(long)]
    pub morecomments: bool,

    /// Follow links to other posts up to this depth.
    #[arg(short = 'r', long)]
    pub recursion: Option<u32>,

    /// Smallest post id to accept (base-36, `t3_` prefix allowed).
    #[arg(long = "id-min")]
    pub id_min: Option<String>,

    /// Largest post id to accept.
    #[arg(long = "id-max")]
    pub id_max: Option<String>,

    /// Oldest creation date to accept (epoch seconds or YYYY-MM-DD).
    #[arg(long = "date-min")]
    pub date_min: Option<String>,

    /// Newest creation date to accept.
    #[arg(long = "date-max")]
    pub date_max: Option<String>,

    /// Output format for collected links.
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: FormatArg,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One URL per line.
    Plain,
    /// One JSON object per line, carrying each link's origin.
    Jsonl,
}

impl From<FormatArg> for RecordFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => RecordFormat::Plain,
            FormatArg::Jsonl => RecordFormat::Jsonl,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Override account settings if provided
        if let Some(token) = self.refresh_token {
            config.account.refresh_token = Some(token);
        }

        if let Some(client_id) = self.client_id {
            config.account.client_id = client_id;
        }

        if let Some(user_agent) = self.user_agent {
            config.account.user_agent = user_agent;
        }

        // Override crawl options if provided
        if let Some(comments) = self.comments {
            config.options.comments = comments;
        }

        if self.morecomments {
            config.options.morecomments = true;
        }

        if let Some(recursion) = self.recursion {
            config.options.recursion = recursion;
        }

        // Override listing filters if provided
        if let Some(id_min) = self.id_min {
            config.filters.id_min = Some(id_min);
        }

        if let Some(id_max) = self.id_max {
            config.filters.id_max = Some(id_max);
        }

        if let Some(date_min) = self.date_min {
            config.filters.date_min = Some(DateBound::Text(date_min));
        }

        if let Some(date_max) = self.date_max {
            config.filters.date_max = Some(DateBound::Text(date_max));
        }
    }
}
