use std::fs;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use feeder::cli::render::{render_report, NO_SELECTION_MESSAGE};
use feeder::cli::{Cli, Commands, SelectionArgs};
use feeder::config::Config;
use feeder::domain::FeedSource;
use feeder::errors::FeederResult;
use feeder::services::{IngestService, Normalizer, TracingNotifier};
use feeder::sources::{RssAtomParser, SourceRegistry};
use feeder::storage::ArticleCache;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feeder=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> FeederResult<()> {
    let cli = Cli::parse();

    // Load configuration, command-line flags win over the environment
    let mut config = Config::from_env()?;
    if cli.sources_opml.is_some() {
        config.sources_opml = cli.sources_opml.clone();
    }

    let registry = config.registry()?;

    match cli.command {
        Commands::Sources => cmd_sources(&registry, &config),
        Commands::News { selection, json } => cmd_news(&registry, &config, &selection, json),
        Commands::Watch {
            selection,
            interval,
            iterations,
        } => cmd_watch(&registry, &config, &selection, interval, iterations),
        Commands::Export { output } => cmd_export(&registry, output),
    }
}

fn resolve_selection(
    registry: &SourceRegistry,
    config: &Config,
    args: &SelectionArgs,
) -> FeederResult<Vec<FeedSource>> {
    if args.sources.is_empty() {
        config.selection(registry)
    } else {
        registry.select(args.sources.as_slice())
    }
}

fn build_service(
    config: &Config,
    args: &SelectionArgs,
) -> IngestService<RssAtomParser, TracingNotifier> {
    IngestService::new(
        RssAtomParser::with_timeout(config.request_timeout),
        TracingNotifier,
        Normalizer::new(config.summary_word_limit),
    )
    .with_parallel(config.parallel || args.parallel)
}

fn cmd_sources(registry: &SourceRegistry, config: &Config) -> FeederResult<()> {
    if registry.is_empty() {
        println!("No news sources configured.");
        return Ok(());
    }

    let selected: Vec<String> = config
        .selection(registry)?
        .into_iter()
        .map(|s| s.name)
        .collect();

    println!("Available news sources:\n");
    for source in registry.sources() {
        let marker = if selected.contains(&source.name) { "*" } else { " " };
        println!("  {} {}", marker, source.name);
        println!("      {}", source.endpoint);
    }
    println!("\n  * selected by default");

    Ok(())
}

fn cmd_news(
    registry: &SourceRegistry,
    config: &Config,
    args: &SelectionArgs,
    json: bool,
) -> FeederResult<()> {
    let sources = resolve_selection(registry, config, args)?;
    if sources.is_empty() {
        println!("{}", NO_SELECTION_MESSAGE);
        return Ok(());
    }

    let service = build_service(config, args);
    let report = service.ingest(&sources);
    let count = usize::from(args.count);

    if json {
        println!("{}", serde_json::to_string_pretty(report.top(count))?);
    } else {
        print!("{}", render_report(&report, count, Local::now()));
    }

    Ok(())
}

fn cmd_watch(
    registry: &SourceRegistry,
    config: &Config,
    args: &SelectionArgs,
    interval: u64,
    iterations: Option<u32>,
) -> FeederResult<()> {
    let sources = resolve_selection(registry, config, args)?;
    if sources.is_empty() {
        println!("{}", NO_SELECTION_MESSAGE);
        return Ok(());
    }

    let service = build_service(config, args);
    let mut cache = ArticleCache::new(config.cache_ttl);
    let interval = Duration::from_secs(interval);
    let count = usize::from(args.count);

    // Pressing Enter forces a refetch on the next redraw
    let (refresh_tx, refresh_rx) = mpsc::channel();
    thread::spawn(move || {
        for _ in io::stdin().lock().lines() {
            if refresh_tx.send(()).is_err() {
                break;
            }
        }
    });

    println!(
        "Articles are cached for {} minutes. Press Enter to refresh news, Ctrl+C to quit.\n",
        cache.ttl().as_secs() / 60
    );

    let mut drawn = 0u32;
    loop {
        let report = cache.get_or_ingest(&sources, |s| service.ingest(s));
        print!("{}", render_report(&report, count, Local::now()));
        println!();

        drawn += 1;
        if iterations.is_some_and(|max| drawn >= max) {
            break;
        }

        match refresh_rx.recv_timeout(interval) {
            Ok(()) => {
                cache.invalidate();
                println!("News feed refreshed!\n");
            }
            Err(RecvTimeoutError::Timeout) => {}
            // stdin closed, keep redrawing on the timer alone
            Err(RecvTimeoutError::Disconnected) => thread::sleep(interval),
        }
    }

    Ok(())
}

fn cmd_export(registry: &SourceRegistry, output: Option<String>) -> FeederResult<()> {
    let opml = registry.to_opml()?;

    match output {
        Some(path) => {
            fs::write(&path, &opml)?;
            println!("Exported sources to {}", path);
        }
        None => {
            println!("{}", opml);
        }
    }

    Ok(())
}
