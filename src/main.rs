//! `sprawl`: generate, inspect and render chunks from the command line.
#![forbid(unsafe_code)]

mod ascii;
mod cli;

use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;
use sprawl_chunk::generate_chunk;
use sprawl_chunk::overview::{OverviewMode, OverviewRegion, render_overview, save_png};
use sprawl_world::{ChunkCoord, ChunkTiming, GenStage, ObjectKind, World, WorldGenParams, load_params_from_path};

use crate::cli::{Cli, CliError, Command, ModeArg, WorldArgs};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_world(args: &WorldArgs) -> Result<World, CliError> {
    let params = match &args.config {
        Some(path) => load_params_from_path(path)?,
        None => WorldGenParams::default(),
    };
    log::info!(
        target: "worldgen",
        "world seed={} chunk_tiles={} road_density={} config={}",
        args.seed,
        params.chunk_tiles(),
        params.road_density,
        args.config
            .as_ref()
            .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string())
    );
    Ok(World::new(args.seed, params))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let world = load_world(&cli.world)?;
    match cli.command {
        Command::Chunk { cx, cy, json } => cmd_chunk(&world, ChunkCoord::new(cx, cy), json),
        Command::Overview {
            cx,
            cy,
            radius,
            mode,
            out,
        } => {
            let region = OverviewRegion::new(ChunkCoord::new(cx, cy), radius)?;
            let mode = match mode {
                ModeArg::Biome => OverviewMode::BiomeMap,
                ModeArg::Chunks => OverviewMode::Chunks,
            };
            let image = render_overview(&world, region, mode);
            save_png(&image, &out)?;
            log::info!("wrote {}x{} overview to {}", image.width(), image.height(), out.display());
            Ok(())
        }
        Command::Density { chunks } => cmd_density(&world, chunks),
    }
}

fn cmd_chunk(world: &World, coord: ChunkCoord, json: bool) -> Result<(), CliError> {
    let res = generate_chunk(world, coord);
    if json {
        println!("{}", serde_json::to_string_pretty(&res.data)?);
        return Ok(());
    }
    print!("{}", ascii::render_ascii(&res.data, &world.tiles));
    println!("chunk {coord}");
    for kind in ObjectKind::ALL {
        println!("  {:<16} {}", kind.tag(), res.data.count_of_kind(kind));
    }
    let s = res.data.road_stats;
    println!(
        "  roads: seeded={} collapsed={} blocked={} unreached={} contradictions={}",
        s.seeded, s.collapsed, s.blocked, s.unreached, s.contradictions
    );
    let stages: Vec<String> = GenStage::ALL
        .iter()
        .map(|st| format!("{}={}us", st.label(), res.timing.stage_us[st.index()]))
        .collect();
    println!("  timing: {} total={}us", stages.join(" "), res.timing.total_us);
    Ok(())
}

fn cmd_density(world: &World, chunks: i32) -> Result<(), CliError> {
    if chunks <= 0 {
        return Err(CliError::Usage(format!("chunks must be > 0, got {chunks}")));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if world.params.workers > 0 {
        builder = builder.num_threads(world.params.workers);
    }
    let pool = builder.build()?;
    let params = &world.params;
    let (placed, expected, empty, timing) = pool.install(|| {
        (0..chunks * chunks)
            .into_par_iter()
            .map(|i| {
                let coord = ChunkCoord::new(i % chunks, i / chunks);
                let res = generate_chunk(world, coord);
                let data = res.data;
                let placed = data.count_of_kind(ObjectKind::Decoration);
                // tiles that were still empty when decorations ran
                let mut expected = 0.0f64;
                let mut empty = 0usize;
                for (x, y, biome) in data.biome_layer.iter() {
                    let t = data.terrain_layer.value(x, y);
                    let decorated = t.is_some_and(|id| matches!(world.tiles.kind(id), sprawl_tiles::TileKind::Decoration { .. }));
                    if t.is_none() || decorated {
                        expected += params.decoration_density * params.decoration_multiplier.get(*biome);
                        empty += 1;
                    }
                }
                (placed, expected, empty, res.timing)
            })
            .reduce(
                || (0, 0.0, 0, ChunkTiming::default()),
                |mut a, b| {
                    a.3.accumulate(&b.3);
                    (a.0 + b.0, a.1 + b.1, a.2 + b.2, a.3)
                },
            )
    });
    let ratio = if expected > 0.0 { placed as f64 / expected } else { 0.0 };
    println!(
        "chunks={} empty_tiles={} decorations={} expected={:.1} ratio={:.3}",
        chunks * chunks,
        empty,
        placed,
        expected,
        ratio
    );
    let n = (chunks * chunks) as u64;
    let stages: Vec<String> = GenStage::ALL
        .iter()
        .map(|st| format!("{}={}us", st.label(), timing.stage_us[st.index()] / n))
        .collect();
    println!("mean timing: {} total={}us", stages.join(" "), timing.total_us / n);
    Ok(())
}
