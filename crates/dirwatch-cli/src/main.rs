//! CLI entry point for dirwatch.
//!
//! This binary watches a directory and prints one line per debounced change,
//! and exposes the file helpers from `dirwatch-fs` as subcommands.
//!
//! # Usage
//!
//! ```bash
//! dirwatch [OPTIONS] <COMMAND>
//!
//! # Print the directory each time a burst of changes settles
//! dirwatch watch /srv/inbox --min-interval-ms 250 --trailing-delay-ms 500
//!
//! # Also count the CSV files present after each change, stop after 10
//! dirwatch watch /srv/inbox --ext csv --count 10
//!
//! # List text files
//! dirwatch list ./docs --text
//!
//! # Bundle files into a flat archive
//! dirwatch zip logs.zip /var/log/app/a.log /var/log/app/b.log
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::future::Future;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};
use dirwatch_core::{Config, LogConfig, WatchConfig};
use dirwatch_fs::{AcceptAllFilter, ExtensionFilter, FileFilter, TextFileFilter};
use dirwatch_watcher::DebouncedWatcher;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Debounced directory change notifications.
#[derive(Parser, Debug)]
#[command(name = "dirwatch", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "DIRWATCH_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch a directory and print a line per debounced change.
    Watch(WatchArgs),

    /// Write a flat zip archive of the given files.
    Zip {
        /// Archive to create (overwritten if present).
        archive: Utf8PathBuf,

        /// Files to add, stored under their base names.
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,
    },

    /// List files under a directory, recursively and sorted.
    List {
        /// Directory to list.
        dir: Utf8PathBuf,

        /// Only list files with these extensions (comma separated).
        #[arg(short, long, value_delimiter = ',', conflicts_with = "text")]
        ext: Vec<String>,

        /// Only list files with a known text extension.
        #[arg(short, long)]
        text: bool,
    },
}

/// Arguments for `dirwatch watch`.
#[derive(Args, Debug)]
struct WatchArgs {
    /// Directory to watch.
    dir: Utf8PathBuf,

    /// Minimum time between debounce windows, in milliseconds.
    #[arg(long)]
    min_interval_ms: Option<u64>,

    /// Delay between a window opening and its notification, in milliseconds.
    #[arg(long)]
    trailing_delay_ms: Option<u64>,

    /// Watch only the directory itself, not its subtree.
    #[arg(long)]
    non_recursive: bool,

    /// Count files with these extensions after each change (comma separated).
    #[arg(short, long, value_delimiter = ',')]
    ext: Vec<String>,

    /// Exit after this many notifications.
    #[arg(short = 'n', long)]
    count: Option<u64>,
}

impl WatchArgs {
    /// Applies command-line overrides on top of the loaded watch settings.
    fn apply(&self, mut config: WatchConfig) -> WatchConfig {
        if let Some(ms) = self.min_interval_ms {
            config.min_interval_ms = ms;
        }
        if let Some(ms) = self.trailing_delay_ms {
            config.trailing_delay_ms = ms;
        }
        if self.non_recursive {
            config.recursive = false;
        }
        config
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or the configured level.
/// The `notify` backend is filtered to `warn` level.
fn init_tracing(log: &LogConfig, verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { log.level.as_str() };
        EnvFilter::new(format!("{level},mio=warn,notify=warn"))
    });

    // Check if colors should be disabled (flag, config or NO_COLOR env var)
    let use_ansi = log.ansi && !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Loads the configuration file if one was given, or the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
fn load_config(path: Option<&Utf8Path>) -> color_eyre::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("Failed to load configuration from {path}")),
        None => Ok(Config::default()),
    }
}

/// Builds the file filter for a listing.
fn build_filter(ext: &[String], text: bool) -> Box<dyn FileFilter> {
    if text {
        Box::new(TextFileFilter::default())
    } else if ext.is_empty() {
        Box::new(AcceptAllFilter)
    } else {
        Box::new(ExtensionFilter::new(ext))
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Watches a directory until interrupted, the count is reached, or the
/// watcher dies.
///
/// # Errors
///
/// Returns an error if the watcher cannot start, stops on its own, or output
/// fails.
async fn run_watch(config: &Config, args: &WatchArgs) -> color_eyre::Result<()> {
    let watch = args.apply(config.watch);
    let counter = (!args.ext.is_empty()).then(|| ExtensionFilter::new(&args.ext));

    let watcher = DebouncedWatcher::new(&args.dir, &watch)
        .await
        .wrap_err_with(|| format!("Failed to watch {}", args.dir))?;

    info!(
        path = %watcher.watch_path(),
        min_interval_ms = watch.min_interval_ms,
        trailing_delay_ms = watch.trailing_delay_ms,
        recursive = watch.recursive,
        "Watching"
    );

    let delivered = pump_notifications(
        watcher,
        counter.as_ref(),
        args.count,
        shutdown_signal(),
        &mut std::io::stdout(),
    )
    .await?;

    info!(delivered, "Stopped watching");
    Ok(())
}

/// Writes one line per notification until `shutdown` resolves, `limit`
/// lines have been written, or the watcher dies, then shuts the watcher down.
///
/// Returns the number of lines written.
///
/// # Errors
///
/// Returns an error if the watcher stopped on its own, counting fails, or
/// `out` cannot be written.
async fn pump_notifications(
    mut watcher: DebouncedWatcher,
    counter: Option<&ExtensionFilter>,
    limit: Option<u64>,
    shutdown: impl Future<Output = color_eyre::Result<()>>,
    out: &mut impl Write,
) -> color_eyre::Result<u64> {
    tokio::pin!(shutdown);
    let mut delivered = 0_u64;

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                break;
            }
            maybe = watcher.recv() => {
                let Some(notification) = maybe else {
                    // Channel closed: the watcher died on its own.
                    watcher.shutdown().await.wrap_err("Directory watcher stopped")?;
                    bail!("Directory watcher stopped unexpectedly");
                };

                let line = match counter {
                    Some(filter) => {
                        let count = count_matching(notification.path(), filter).await?;
                        format!("{} ({count} matching files)", notification.path)
                    }
                    None => notification.path.to_string(),
                };
                writeln!(out, "{line}")?;

                delivered += 1;
                if limit.is_some_and(|limit| delivered >= limit) {
                    debug!(delivered, "Notification count reached");
                    break;
                }
            }
        }
    }

    watcher.shutdown().await?;
    Ok(delivered)
}

/// Counts files under `dir` that `filter` accepts, off the async runtime.
async fn count_matching(dir: &Utf8Path, filter: &ExtensionFilter) -> color_eyre::Result<usize> {
    let dir = dir.to_owned();
    let filter = filter.clone();
    let paths =
        tokio::task::spawn_blocking(move || dirwatch_fs::collect_file_paths(&dir, &filter))
            .await??;
    Ok(paths.len())
}

/// Resolves when Ctrl-C or, on Unix, SIGTERM is received.
async fn shutdown_signal() -> color_eyre::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Received Ctrl-C, shutting down");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl-C, shutting down");
    }

    Ok(())
}

/// Writes a flat zip archive.
fn run_zip(archive: &Utf8Path, files: &[Utf8PathBuf]) -> color_eyre::Result<()> {
    dirwatch_fs::flat_zip(archive, files)?;
    info!(archive = %archive, files = files.len(), "Archive written");
    Ok(())
}

/// Prints every file under `dir` accepted by `filter`, one per line.
fn run_list(
    dir: &Utf8Path,
    filter: &dyn FileFilter,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let paths = dirwatch_fs::collect_file_paths(dir, filter)?;
    for path in &paths {
        writeln!(out, "{path}")?;
    }
    debug!(dir = %dir, count = paths.len(), "Listed files");
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Load configuration (logging settings live there)
    let config = load_config(cli.config.as_deref())?;

    // 4. Initialize tracing
    init_tracing(&config.log, cli.verbose, cli.no_color);

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Watch(args) => run_watch(&config, args).await,
        Commands::Zip { archive, files } => run_zip(archive, files),
        Commands::List { dir, ext, text } => {
            let filter = build_filter(ext, *text);
            run_list(dir, &*filter, &mut std::io::stdout().lock())
        }
    }
}
