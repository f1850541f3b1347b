//! omdb - command-line front end for the OMDb query builder.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use omdb_api::{LookupRequest, OmdbClient, OmdbResponse};
use serde_json::Value;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};

/// Environment variable overriding the configured base URL.
const BASE_URL_ENV: &str = "OMDB_BASE_URL";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Print the response body verbatim.
    #[arg(long, global = true)]
    raw: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Look up a title by IMDb identifier.
    Id(IdArgs),
    /// Look up a title by its exact name.
    Title(TitleArgs),
    /// Search titles.
    Search(SearchArgs),
    /// Show or edit the config file.
    Config(ConfigCommand),
}

/// Filters shared by lookups and searches.
#[derive(clap::Args)]
struct FilterArgs {
    /// Result type: movie, series or episode.
    #[arg(long)]
    category: Option<String>,
    /// Release year.
    #[arg(long)]
    year: Option<String>,
    /// Response format: json or xml.
    #[arg(long)]
    format: Option<String>,
}

/// Options only offered by lookups.
#[derive(clap::Args)]
struct LookupOptions {
    /// Shared filters.
    #[command(flatten)]
    filters: FilterArgs,
    /// Plot length: short or full.
    #[arg(long)]
    plot: Option<String>,
    /// Include Rotten Tomatoes ratings.
    #[arg(long)]
    ratings: bool,
}

/// Arguments for the `id` subcommand.
#[derive(clap::Args)]
struct IdArgs {
    /// IMDb identifier (e.g. "tt0396269").
    id: String,
    /// Lookup options.
    #[command(flatten)]
    options: LookupOptions,
}

/// Arguments for the `title` subcommand.
#[derive(clap::Args)]
struct TitleArgs {
    /// Exact title (e.g. "Wedding Crashers").
    title: String,
    /// Lookup options.
    #[command(flatten)]
    options: LookupOptions,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (e.g. "dogs").
    query: String,
    /// Search filters.
    #[command(flatten)]
    filters: FilterArgs,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file path and contents.
    Show,
    /// Update config values.
    Set(ConfigSetArgs),
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// API base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// User-Agent header.
    #[arg(long)]
    user_agent: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Builds the client from the config file and `OMDB_BASE_URL`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_client(dir: Option<&PathBuf>) -> Result<OmdbClient> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;

    let env_url = std::env::var(BASE_URL_ENV).ok();
    let base_url = config.api.resolve_base_url(env_url.as_deref())?;
    tracing::debug!(%base_url, "resolved OMDb base URL");

    let mut builder = OmdbClient::builder().base_url(base_url);
    if let Some(ref ua) = config.api.user_agent {
        builder = builder.user_agent(ua);
    } else {
        builder = builder.user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    }
    if let Some(timeout) = config.api.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build OMDb client")
}

/// Numeric input becomes a JSON number; anything else stays a string so the
/// validator can reject it.
fn year_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .map_or_else(|_| Value::from(raw), Value::from)
}

/// Applies lookup flags to the builder.
///
/// # Errors
///
/// Returns the first validation error.
fn apply_lookup_options(lookup: &mut LookupRequest<'_>, options: &LookupOptions) -> Result<()> {
    let filters = &options.filters;
    if let Some(ref category) = filters.category {
        lookup.category(category.as_str())?;
    }
    if let Some(ref year) = filters.year {
        lookup.year(year_value(year))?;
    }
    if let Some(ref format) = filters.format {
        lookup.format(format.as_str())?;
    }
    if let Some(ref plot) = options.plot {
        lookup.plot(plot.as_str())?;
    }
    if options.ratings {
        lookup.include_ratings(true)?;
    }
    Ok(())
}

/// Returns `true` if the body should be printed without decoding.
fn wants_raw(raw: bool, filters: &FilterArgs) -> bool {
    raw || filters.format.as_deref() == Some("xml")
}

/// Fails on a non-2xx status.
fn ensure_success(response: &OmdbResponse) -> Result<()> {
    if !response.is_success() {
        bail!(
            "OMDb API error (HTTP {}): {}",
            response.status,
            response.body
        );
    }
    Ok(())
}

/// Prints a single-title response.
///
/// # Errors
///
/// Returns an error on a non-2xx status or an undecodable body.
fn print_title(response: OmdbResponse, raw: bool) -> Result<()> {
    ensure_success(&response)?;
    if raw {
        tracing::info!("{}", response.body);
        return Ok(());
    }

    let title = response.into_title()?;
    tracing::info!("{} ({})\t{}\t{}", title.title, title.year, title.kind, title.imdb_id);
    if let Some(ref genre) = title.genre {
        tracing::info!("Genre:\t\t{genre}");
    }
    if let Some(ref director) = title.director {
        tracing::info!("Director:\t{director}");
    }
    if let Some(ref runtime) = title.runtime {
        tracing::info!("Runtime:\t{runtime}");
    }
    for rating in &title.ratings {
        tracing::info!("Rating:\t\t{}\t{}", rating.value, rating.source);
    }
    if let Some(ref plot) = title.plot {
        tracing::info!("Plot:\t\t{plot}");
    }
    Ok(())
}

/// Runs the `id` subcommand.
///
/// # Errors
///
/// Returns an error if a value is rejected or the request fails.
#[instrument(skip_all)]
async fn run_id(args: &IdArgs, dir: Option<&PathBuf>, raw: bool) -> Result<()> {
    let client = build_client(dir)?;

    let mut lookup = client.by_id(args.id.as_str())?;
    apply_lookup_options(&mut lookup, &args.options)?;

    let response = lookup.request().await.context("OMDb lookup failed")?;
    print_title(response, wants_raw(raw, &args.options.filters))
}

/// Runs the `title` subcommand.
///
/// # Errors
///
/// Returns an error if a value is rejected or the request fails.
#[instrument(skip_all)]
async fn run_title(args: &TitleArgs, dir: Option<&PathBuf>, raw: bool) -> Result<()> {
    let client = build_client(dir)?;

    let mut lookup = client.by_title(args.title.as_str())?;
    apply_lookup_options(&mut lookup, &args.options)?;

    let response = lookup.request().await.context("OMDb lookup failed")?;
    print_title(response, wants_raw(raw, &args.options.filters))
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if a value is rejected or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>, raw: bool) -> Result<()> {
    let client = build_client(dir)?;

    let mut search = client.by_search(args.query.as_str())?;
    if let Some(ref category) = args.filters.category {
        search.category(category.as_str())?;
    }
    if let Some(ref year) = args.filters.year {
        search.year(year_value(year))?;
    }
    if let Some(ref format) = args.filters.format {
        search.format(format.as_str())?;
    }

    let response = search.request().await.context("OMDb search failed")?;
    ensure_success(&response)?;
    if wants_raw(raw, &args.filters) {
        tracing::info!("{}", response.body);
        return Ok(());
    }

    let results = response.into_search()?;
    tracing::info!("imdbID\t\tYear\tType\tTitle");
    for item in &results.items {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            item.imdb_id,
            item.year,
            item.kind,
            item.title
        );
    }
    tracing::info!(
        "Total: {} results",
        results.total_results.as_deref().unwrap_or("0")
    );

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;
    let base_url = config.api.resolve_base_url(None)?;

    tracing::info!("Config: {}", path.display());
    tracing::info!("Base URL: {base_url}");
    let content = toml::to_string_pretty(&config).context("failed to serialize config")?;
    if !content.trim().is_empty() {
        tracing::info!("{}", content.trim_end());
    }
    Ok(())
}

/// Runs the `config set` subcommand.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the config cannot be saved.
fn run_config_set(args: &ConfigSetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;

    if let Some(ref url) = args.base_url {
        config.api.base_url = Some(url.clone());
        config.api.resolve_base_url(None)?;
    }
    if let Some(ref ua) = args.user_agent {
        config.api.user_agent = Some(ua.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.api.timeout_secs = Some(secs);
    }

    config.save(&path)?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Id(args) => run_id(&args, dir, cli.raw).await,
        Commands::Title(args) => run_title(&args, dir, cli.raw).await,
        Commands::Search(args) => run_search(&args, dir, cli.raw).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::Set(args) => run_config_set(&args, dir),
        },
    }
}
