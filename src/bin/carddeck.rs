//! CardDeck demo binary
//!
//! Seeds an in-memory record store and drives a console paginator from
//! stdin commands:
//!
//! ```bash
//! # 40 seeded cards, verbose logs
//! carddeck --seed 40 --log-level debug
//!
//! # custom paginator tunables
//! carddeck --config carddeck.toml
//! ```
//!
//! Commands: `next`, `prev`, `first`, `last`, `page N`, `search TEXT`,
//! `reload [force]`, `resize W H`, `right`, `left`, `quit`.

use anyhow::Context;
use carddeck::paginator::NavKey;
use carddeck::render::ConsoleSurface;
use carddeck::store::{MemoryStore, Record, RecordStore};
use carddeck::{Paginator, PaginatorConfig, Store};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// CardDeck - a windowed card paginator over a queryable record store
#[derive(Parser, Debug)]
#[command(name = "carddeck")]
#[command(version = carddeck::VERSION)]
#[command(about = "CardDeck - windowed card paginator demo", long_about = None)]
struct Cli {
    /// Number of demo records to seed
    #[arg(long, default_value = "23", env = "CARDDECK_SEED")]
    seed: usize,

    /// Optional TOML file with paginator tunables
    #[arg(long, env = "CARDDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log directory path
    #[arg(long, default_value = "logs", env = "CARDDECK_LOG_DIR")]
    log_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => PaginatorConfig::load(path)?,
        None => PaginatorConfig::default(),
    };

    // Seed the reference store.
    let memory = MemoryStore::new();
    for i in 0..cli.seed {
        memory
            .insert(Record::new(format!("Card {:02}", i + 1)))
            .await?;
    }
    let store = Arc::new(Store::new(Box::new(memory)));
    info!(records = cli.seed, "store seeded");

    let surface = ConsoleSurface::new(Arc::clone(&store));
    let paginator = Arc::new(Paginator::new(store, Box::new(surface), config)?);

    // Card notifications print as they arrive.
    if let Some(mut events) = paginator.take_events() {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                info!(?event, "card notification");
            }
        });
    }

    paginator.load(0).await?;

    let stdin = io::stdin();
    loop {
        print!("carddeck> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        match dispatch(&paginator, line.trim()).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {e:#}"),
        }
    }

    Ok(())
}

/// Run one command line; `Ok(false)` ends the loop.
async fn dispatch(paginator: &Paginator, line: &str) -> anyhow::Result<bool> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("next") => {
            paginator.next().await?;
        }
        Some("prev") => {
            paginator.prev().await?;
        }
        Some("first") => {
            paginator.first().await?;
        }
        Some("last") => {
            paginator.last().await?;
        }
        Some("page") => {
            // 1-based on the command line, 0-based inside.
            let number: usize = parts
                .next()
                .context("usage: page N")?
                .parse()
                .context("page number must be an integer")?;
            if number == 0 {
                anyhow::bail!("pages are numbered from 1");
            }
            paginator.select_page(number - 1).await?;
        }
        Some("search") => {
            let text = line.strip_prefix("search").unwrap_or("").trim();
            paginator.search(text).await?;
        }
        Some("reload") => {
            let force = parts.next() == Some("force");
            paginator.reload(force).await?;
        }
        Some("resize") => {
            let width: u32 = parts
                .next()
                .context("usage: resize W H")?
                .parse()
                .context("width must be an integer")?;
            let height: u32 = parts
                .next()
                .context("usage: resize W H")?
                .parse()
                .context("height must be an integer")?;
            paginator.resize(width, height).await?;
        }
        Some("right") => {
            paginator.handle_key(NavKey::ArrowRight).await?;
        }
        Some("left") => {
            paginator.handle_key(NavKey::ArrowLeft).await?;
        }
        Some("quit") | Some("exit") => return Ok(false),
        Some(other) => {
            println!("unknown command: {other}");
        }
    }
    Ok(true)
}

/// Setup logging with rolling files and console output
fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cli.log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &cli.log_dir, "carddeck.log");

    let log_level = cli
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color),
        )
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    Ok(())
}
