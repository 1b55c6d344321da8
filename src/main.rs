//! `sourcer` CLI - Resolve a movie or episode through one source

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sourcer::stream::providers;
use sourcer::{
    load_config, ClientPlatform, HttpFetcher, M3u8Proxy, MediaQuery, ScrapeContext, SourcerConfig,
};

#[derive(Parser)]
#[command(name = "sourcer")]
#[command(about = "Resolve movies and show episodes into playable HLS streams")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.config/sourcer/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available sources
    Sources,

    /// Scrape one source for a movie or a show episode
    Scrape {
        /// Source id (see `sourcer sources`)
        source: String,

        /// Title to search for
        #[arg(short, long)]
        title: String,

        /// TMDB id of the movie or show
        #[arg(long)]
        tmdb: String,

        /// Release year
        #[arg(short, long)]
        year: Option<u32>,

        /// Season number (show episodes only)
        #[arg(short, long, requires = "episode")]
        season: Option<u32>,

        /// Episode number (show episodes only)
        #[arg(short, long, requires = "season")]
        episode: Option<u32>,

        /// Player platform: desktop, ios or android
        #[arg(short, long)]
        platform: Option<ClientPlatform>,

        /// M3U8 proxy base URL
        #[arg(long)]
        proxy_url: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "sourcer=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stderr keeps stdout clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sources => cmd_sources(),
        Commands::Scrape {
            source,
            title,
            tmdb,
            year,
            season,
            episode,
            platform,
            proxy_url,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let media = match (season, episode) {
                (Some(season), Some(episode)) => {
                    MediaQuery::show(title, year, tmdb, season, episode)
                }
                _ => MediaQuery::movie(title, year, tmdb),
            };
            cmd_scrape(&source, media, platform, proxy_url, config).await?;
        }
    }

    Ok(())
}

fn cmd_sources() {
    for source in providers::all() {
        let state = if source.disabled() { " (disabled)" } else { "" };
        println!(
            "{:<10} {:<8} rank {}{state}",
            source.id(),
            source.name(),
            source.rank()
        );
    }
}

async fn cmd_scrape(
    source_id: &str,
    media: MediaQuery,
    platform: Option<ClientPlatform>,
    proxy_url: Option<String>,
    config: SourcerConfig,
) -> Result<()> {
    let source = providers::find(source_id).ok_or_else(|| {
        anyhow!("Unknown source: {source_id}. Run `sourcer sources` to list them.")
    })?;
    if source.disabled() {
        eprintln!("⚠️  {} is disabled, running anyway", source.id());
    }

    let fetcher = HttpFetcher::with_settings(&config.fetcher_settings())?;
    let platform = platform.unwrap_or(config.platform);
    let proxy = M3u8Proxy::new(proxy_url.unwrap_or(config.proxy_url));

    eprintln!("🎬 Source: {} ({})", source.name(), source.id());
    eprintln!("📱 Platform: {platform}");

    let ctx = ScrapeContext::new(media, Arc::new(fetcher))
        .with_platform(platform)
        .with_proxy(Arc::new(proxy))
        .on_progress(Box::new(|percent| eprintln!("⏳ {percent}%")));

    let output = source.scrape(&ctx).await?;
    eprintln!(
        "✅ {} streams, {} embeds",
        output.stream.len(),
        output.embeds.len()
    );
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
