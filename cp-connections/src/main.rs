use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use askama::Template;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cp_connections::ScrapeError;
use cp_connections::cache::{CacheConfig, CachedCpClient, PageCache, PageCacheConfig};
use cp_connections::client::{CpClient, CpConfig};
use cp_connections::extract::{Extraction, Extractor, SkippedEntry};
use cp_connections::query::{ConnectionQuery, DEFAULT_BASE_URL, TransportMode};
use cp_connections::record::JourneyRecord;
use cp_connections::render::JourneyPage;
use cp_connections::scrape::Scraper;
use cp_connections::stations::{StationError, StationTable};
use cp_connections::web::{AppState, create_router};

#[derive(Parser)]
#[command(name = "cp-connections", version, about = "Scrape transit connections from cp.sk")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search connections between two stations
    Search(SearchArgs),
    /// Serve the scraper over HTTP
    Serve(ServeArgs),
    /// List known station names
    Stations(StationsArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Departure station
    from: String,
    /// Arrival station
    to: String,
    /// train, bus or train-bus
    #[arg(long, short, default_value = "train-bus")]
    mode: TransportMode,
    /// Reject station names missing from the station table
    #[arg(long)]
    strict_stations: bool,
    /// Parse a saved results page instead of fetching
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
    /// Write one standalone HTML page per journey into this directory
    #[arg(long, value_name = "DIR")]
    html_dir: Option<PathBuf>,
    /// Do not read or write the page cache
    #[arg(long)]
    no_cache: bool,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
    /// Seconds to keep fetched pages in memory
    #[arg(long, default_value_t = 60)]
    cache_ttl: u64,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct StationsArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Site root
    #[arg(long, env = "CP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Extra station names, as a JSON object of name -> identifier
    #[arg(long, env = "CP_STATIONS", value_name = "FILE")]
    stations: Option<PathBuf>,
    /// Page cache directory
    #[arg(long, env = "CP_CACHE_DIR", default_value = ".cp-cache")]
    cache_dir: PathBuf,
}

impl CommonArgs {
    fn station_table(&self) -> Result<StationTable, StationError> {
        match &self.stations {
            Some(path) => StationTable::load(path),
            None => Ok(StationTable::builtin()),
        }
    }

    fn client(&self) -> Result<CpClient, ScrapeError> {
        Ok(CpClient::new(CpConfig::new().with_base_url(&self.base_url))?)
    }
}

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no readable connections: {skipped} entries did not match the expected page layout")]
    Unreadable { skipped: usize },
}

impl From<StationError> for CliError {
    fn from(e: StationError) -> Self {
        CliError::Scrape(e.into())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Search(args) => search(args).await,
        Command::Serve(args) => serve(args).await,
        Command::Stations(args) => stations(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn search(args: SearchArgs) -> Result<(), CliError> {
    let table = args.common.station_table()?;
    let (from, to) = if args.strict_stations {
        (table.resolve(&args.from)?, table.resolve(&args.to)?)
    } else {
        (
            table.resolve_or_verbatim(&args.from),
            table.resolve_or_verbatim(&args.to),
        )
    };
    let query = ConnectionQuery::new(from, to, args.mode).map_err(ScrapeError::from)?;

    let mut scraper = Scraper::new(args.common.client()?, Extractor::default());
    if !args.no_cache {
        scraper = scraper.with_cache(PageCache::new(PageCacheConfig::new(&args.common.cache_dir)));
    }

    let page = match &args.input {
        Some(path) => read_file(path)?,
        None => scraper.page(&query).await?,
    };
    let extraction = scraper.extract(&page)?;

    if let Some(dir) = &args.html_dir {
        write_pages(dir, &extraction.journeys)?;
    }

    if args.json {
        print_json(&query, &extraction)?;
    } else {
        print_text(&extraction);
    }

    outcome(&extraction)
}

/// A page whose every entry was skipped is a failure, not an empty result.
fn outcome(extraction: &Extraction) -> Result<(), CliError> {
    if extraction.is_empty() && !extraction.skipped.is_empty() {
        return Err(CliError::Unreadable {
            skipped: extraction.skipped.len(),
        });
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn print_text(extraction: &Extraction) {
    if extraction.is_empty() && extraction.skipped.is_empty() {
        println!("No connections found.");
    }

    for journey in &extraction.journeys {
        println!("{journey}");
        println!();
    }

    if !extraction.skipped.is_empty() {
        warn!(
            skipped = extraction.skipped.len(),
            "Some journey entries could not be read"
        );
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a ConnectionQuery,
    journeys: &'a [JourneyRecord],
    skipped: &'a [SkippedEntry],
}

fn print_json(query: &ConnectionQuery, extraction: &Extraction) -> Result<(), CliError> {
    let output = JsonOutput {
        query,
        journeys: &extraction.journeys,
        skipped: &extraction.skipped,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One standalone page per journey, named `{index}-{id}.html`.
fn write_pages(dir: &Path, journeys: &[JourneyRecord]) -> Result<(), CliError> {
    std::fs::create_dir_all(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for (i, journey) in journeys.iter().enumerate() {
        let slug: String = journey
            .id()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let path = dir.join(format!("{i:02}-{slug}.html"));
        let html = JourneyPage::new(journey).render()?;
        std::fs::write(&path, html).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
    }

    info!(count = journeys.len(), dir = %dir.display(), "Wrote journey pages");
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let table = args.common.station_table()?;
    let cache_config = CacheConfig {
        ttl: Duration::from_secs(args.cache_ttl),
        ..CacheConfig::default()
    };
    let client = CachedCpClient::new(args.common.client()?, &cache_config);

    let state = AppState::new(client, table, Extractor::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|source| CliError::Io {
            path: PathBuf::from(args.addr.to_string()),
            source,
        })?;
    info!(addr = %args.addr, "Listening");
    info!("  GET /health");
    info!("  GET /connections?from=..&to=..&mode=..");

    axum::serve(listener, app).await.map_err(|source| CliError::Io {
        path: PathBuf::from(args.addr.to_string()),
        source,
    })?;
    Ok(())
}

fn stations(args: StationsArgs) -> Result<(), CliError> {
    let table = args.common.station_table()?;
    for (name, id) in table.iter() {
        if name == id {
            println!("{name}");
        } else {
            println!("{name} -> {id}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_connections::extract::{LayoutMismatch, MismatchKind};

    fn skipped(index: usize) -> SkippedEntry {
        SkippedEntry {
            index,
            entry_id: format!("connectionBox-{index}"),
            error: LayoutMismatch {
                kind: MismatchKind::MissingNode,
                path: "entry[1][0][0][2]",
            },
        }
    }

    #[test]
    fn empty_page_is_success() {
        assert!(outcome(&Extraction::default()).is_ok());
    }

    #[test]
    fn every_entry_skipped_is_an_error() {
        let extraction = Extraction {
            journeys: Vec::new(),
            skipped: vec![skipped(0), skipped(1)],
        };
        let err = outcome(&extraction).unwrap_err();
        assert!(matches!(err, CliError::Unreadable { skipped: 2 }));
        assert!(err.to_string().starts_with("no readable connections: 2 entries"));
    }
}
