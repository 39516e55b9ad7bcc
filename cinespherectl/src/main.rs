//! # cinespherectl
//!
//! Headless host for the movie galaxy. It drives the same layout, camera rig
//! and browse session a renderer would, and prints what a frame loop would
//! have drawn.

mod commands;

use std::path::PathBuf;

use cinesphere_model::{Genre, MovieId};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinespherectl", version)]
#[command(about = "Lay out, fly through and browse the Cinesphere movie galaxy")]
struct Cli {
    /// Config file (TOML or JSON). Defaults to $CINESPHERE_CONFIG_PATH,
    /// $CINESPHERE_CONFIG_JSON, then ./cinesphere.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print sphere positions for a number of posters
    Layout {
        /// Number of posters to place
        #[arg(long)]
        count: usize,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Focus a poster at a world position and report when the camera arrives
    Fly {
        #[arg(long, allow_negative_numbers = true)]
        x: f32,
        #[arg(long, allow_negative_numbers = true)]
        y: f32,
        #[arg(long, allow_negative_numbers = true)]
        z: f32,
        /// Give up after this many frames
        #[arg(long, default_value_t = 600)]
        frames: u32,
        /// Simulated frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
    },
    /// Fetch movies from TMDB while the frame loop keeps running
    Browse {
        /// Search titles instead of listing popular movies
        #[arg(long, conflicts_with = "genre")]
        search: Option<String>,
        /// Genre name or TMDB id, e.g. "sci-fi" or 878
        #[arg(long)]
        genre: Option<Genre>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Simulated frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
    },
    /// Print the trailer URL of a movie
    Trailer {
        /// TMDB movie id
        #[arg(long)]
        movie: MovieId,
    },
    /// List the genres the galaxy can filter by
    Genres,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load configuration and report guard-rail warnings
    Check,
    /// Print the effective configuration as TOML (API key masked)
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Override via RUST_LOG.
                "warn,cinesphere_core=info,cinesphere_config=info,cinespherectl=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Command::Layout { count, json } => commands::layout::run(config, count, json),
        Command::Fly {
            x,
            y,
            z,
            frames,
            fps,
        } => commands::fly::run(config, glam::Vec3::new(x, y, z), frames, fps),
        Command::Browse {
            search,
            genre,
            pages,
            fps,
        } => commands::browse::run(config, search, genre, pages, fps).await,
        Command::Trailer { movie } => commands::trailer::run(config, movie).await,
        Command::Genres => {
            commands::genres::run();
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigCommand::Check => commands::config::check(config),
            ConfigCommand::Show => commands::config::show(config),
        },
    }
}
