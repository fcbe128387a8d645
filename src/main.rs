use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use delve_blocks::BlockRegistry;
use delve_world::WorldGenConfig;

mod session;

use session::GameSession;

#[derive(Parser, Debug)]
#[command(name = "delve", about = "Headless voxel world session")]
struct Args {
    /// Directory holding blocks.toml and worldgen.toml.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Chunk grid width (must be even).
    #[arg(long, default_value_t = 8)]
    grid: usize,
    /// Terrain seed; overrides the one in worldgen.toml.
    #[arg(long)]
    seed: Option<i32>,
    /// Ticks to simulate before exiting.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Use a flat slab this many layers tall instead of the noise terrain.
    #[arg(long)]
    flat: Option<i32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let reg = BlockRegistry::load_from_path(args.assets.join("blocks.toml"))?;
    let mut gen_cfg = match args.flat {
        Some(layers) => WorldGenConfig::flat(layers),
        None => WorldGenConfig::load_from_path(args.assets.join("worldgen.toml"))?,
    };
    if let Some(seed) = args.seed {
        gen_cfg.seed = seed;
    }

    let mut session = GameSession::new(reg, &gen_cfg, args.grid)?;
    for _ in 0..args.ticks {
        session.step();
    }

    let p = session.player().pos;
    let quads: usize = session.meshes.values().map(|m| m.quad_count()).sum();
    log::info!(
        "ran {} ticks; player at ({:.2}, {:.2}, {:.2}); {} chunk meshes, {} quads",
        session.tick(),
        p.x,
        p.y,
        p.z,
        session.meshes.len(),
        quads
    );
    Ok(())
}
