use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pokedex::app::{cmd_cache_clear, cmd_cache_status};
use pokedex::catalog::api::DEFAULT_API_BASE;
use pokedex::catalog::{
    load_or_fetch, refresh, Catalog, CatalogCache, CatalogFetcher, FetchOptions, PokeApiClient,
};
use pokedex::config::Paths;
use pokedex::sprite::SpriteLoader;
use pokedex::{App, Config};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(
    author,
    version,
    about = "A terminal Pokedex backed by PokeAPI with a local catalog cache"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Catalog (pokedex) id to browse
    #[arg(long, global = true, default_value = "2")]
    catalog: String,

    /// Keep config, cache and logs under this directory instead of the XDG dirs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pause between per-entry requests while fetching
    #[arg(long, global = true, default_value_t = 100)]
    request_delay_ms: u64,

    /// API base URL
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Do not download sprites in the TUI
    #[arg(long, global = true)]
    no_sprites: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    Tui,

    /// Download the catalog into the cache
    Fetch {
        /// Re-download even if a cache exists
        #[arg(long)]
        force: bool,
    },

    /// Print one entry
    Show { id: u32 },

    /// List entries whose name or number contains the query
    Search { query: String },

    /// List favorited entries
    Favorites,

    /// Inspect or clear the catalog cache
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache location and contents
    Status,
    /// Delete the cached catalog
    Clear,
}

fn setup_logging(log_file: &Path, verbosity: u8, also_stderr: bool) -> Result<()> {
    let filter = match verbosity {
        0 => "pokedex=info",
        1 => "pokedex=debug",
        2 => "pokedex=trace",
        _ => "trace",
    };

    // Write logs to a file to avoid corrupting TUI
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Arc::new(file));

    let stderr_layer = also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

/// Load the catalog from cache or the network, with a progress bar on a tty.
///
/// With `force` the network is always used and the cache is replaced only
/// after a complete fetch.
async fn load_catalog(
    cache: &CatalogCache,
    fetcher: &CatalogFetcher<PokeApiClient>,
    catalog_id: &str,
    force: bool,
) -> Result<Catalog> {
    let bar = if std::io::stderr().is_terminal() {
        ProgressBar::new(0)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(
        ProgressStyle::with_template("{spinner} Fetching [{bar:30}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let progress = |done: usize, total: usize, name: &str| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
        bar.set_message(name.to_string());
    };
    let result = if force {
        refresh(cache, fetcher, catalog_id, progress).await
    } else {
        load_or_fetch(cache, fetcher, catalog_id, progress).await
    };
    bar.finish_and_clear();

    result.with_context(|| format!("Failed to load catalog '{}' from PokeAPI", catalog_id))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let paths = match &cli.data_dir {
        Some(dir) => Paths::with_root(dir),
        None => Paths::new(),
    };
    paths
        .ensure_dirs()
        .context("Failed to create data directories")?;

    setup_logging(
        &paths.log_file(),
        cli.verbose,
        !matches!(command, Commands::Tui),
    )?;
    tracing::info!("pokedex v{} starting", pokedex::APP_VERSION);

    let cache = CatalogCache::new(paths.catalog_cache_file(&cli.catalog));

    // Cache commands never touch the network
    if let Commands::Cache { action } = &command {
        return match action {
            CacheCommands::Status => cmd_cache_status(&cache),
            CacheCommands::Clear => cmd_cache_clear(&cache),
        };
    }

    let client = PokeApiClient::with_base_url(&cli.api_base)?;
    let fetcher = CatalogFetcher::new(
        client.clone(),
        FetchOptions {
            request_delay: Duration::from_millis(cli.request_delay_ms),
        },
    );
    let force = matches!(command, Commands::Fetch { force: true });
    let catalog = load_catalog(&cache, &fetcher, &cli.catalog, force).await?;

    let config = Config::load(paths).await;
    let sprites = (!cli.no_sprites).then(|| SpriteLoader::new(client.http().clone()));
    let mut app = App::new(config, catalog, cache, sprites);

    match command {
        Commands::Tui => app.run_tui().await?,
        Commands::Fetch { .. } => {
            println!(
                "Catalog '{}': {} entries cached at {}",
                cli.catalog,
                app.catalog.len(),
                app.cache.path().display()
            );
        }
        Commands::Show { id } => app.cmd_show(id)?,
        Commands::Search { query } => app.cmd_search(&query)?,
        Commands::Favorites => app.cmd_favorites()?,
        // Handled before the catalog is loaded
        Commands::Cache { .. } => {}
    }

    Ok(())
}
