use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feeder")]
#[command(about = "Aggregate the latest tech news from multiple RSS feeds")]
#[command(version)]
pub struct Cli {
    /// Load the source list from an OPML file instead of the built-in feeds
    #[arg(long, global = true, value_name = "FILE")]
    pub sources_opml: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// News source to include (repeatable, defaults to the first three sources)
    #[arg(short, long = "source", value_name = "NAME")]
    pub sources: Vec<String>,

    /// Number of articles to show
    #[arg(short = 'n', long, default_value_t = 25, value_parser = clap::value_parser!(u16).range(5..=50))]
    pub count: u16,

    /// Fetch all sources at the same time
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available news sources
    Sources,

    /// Fetch the selected sources and show the latest articles
    News {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print articles as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Keep showing the latest articles, refreshing on an interval
    Watch {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Seconds between redraws (fetches only happen once the cache expires)
        #[arg(short, long, default_value_t = 300)]
        interval: u64,

        /// Stop after this many redraws
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Export the source list to OPML format
    Export {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}
