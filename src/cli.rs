use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] sprawl_world::ConfigError),
    #[error(transparent)]
    Overview(#[from] sprawl_chunk::overview::OverviewError),
    #[error("failed to encode chunk: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("{0}")]
    Usage(String),
}

/// Seam-consistent procedural chunk generator.
#[derive(Parser, Debug)]
#[command(name = "sprawl", about = "Procedural 2D chunk generator")]
pub struct Cli {
    #[command(flatten)]
    pub world: WorldArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct WorldArgs {
    /// World seed.
    #[arg(long, global = true, default_value_t = 42, allow_negative_numbers = true)]
    pub seed: i64,

    /// Worldgen TOML; built-in defaults when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one chunk and print it.
    Chunk {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        cx: i32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        cy: i32,
        /// Print the full chunk as JSON instead of the ASCII map.
        #[arg(long)]
        json: bool,
    },
    /// Render a region around a chunk to PNG.
    Overview {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        cx: i32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        cy: i32,
        /// Chunks around the centre on each side.
        #[arg(long, default_value_t = 2)]
        radius: i32,
        #[arg(long, value_enum, default_value_t = ModeArg::Chunks)]
        mode: ModeArg,
        #[arg(long, default_value = "overview.png")]
        out: PathBuf,
    },
    /// Measure decoration density over an N x N block of chunks.
    Density {
        #[arg(long, default_value_t = 8)]
        chunks: i32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Biome,
    Chunks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_chunk_coords() {
        let cli = Cli::try_parse_from([
            "sprawl", "--seed", "-7", "chunk", "--cx", "-3", "--cy", "2", "--json",
        ])
        .unwrap();
        assert_eq!(cli.world.seed, -7);
        match cli.command {
            Command::Chunk { cx, cy, json } => assert_eq!((cx, cy, json), (-3, 2, true)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn accepts_seeds_past_i32() {
        let cli = Cli::try_parse_from(["sprawl", "density", "--seed", "-9000000000000"]).unwrap();
        assert_eq!(cli.world.seed, -9_000_000_000_000);
    }

    #[test]
    fn overview_defaults() {
        let cli = Cli::try_parse_from(["sprawl", "overview"]).unwrap();
        assert_eq!(cli.world.seed, 42);
        assert!(cli.world.config.is_none());
        match cli.command {
            Command::Overview { radius, mode, out, .. } => {
                assert_eq!((radius, mode), (2, ModeArg::Chunks));
                assert_eq!(out, PathBuf::from("overview.png"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
