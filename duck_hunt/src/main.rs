//! duck_hunt: interactive entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use duck_core::config::{HIT_RADIUS, PINCH_THRESHOLD, SHOT_COOLDOWN};
use duck_core::GameConfig;
use duck_hunt::app::{run, run_demo, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "duck_hunt", about = "Pinch your fingers to shoot the duck")]
struct Cli {
    /// Duck sprite image (PNG/JPEG); resized to 80×80.  Built-in duck if omitted.
    #[arg(long)]
    sprite: Option<PathBuf>,

    /// Seed for duck spawns, for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds between counted hits
    #[arg(long, default_value_t = SHOT_COOLDOWN)]
    cooldown: f64,

    /// Thumb–index distance (px) that presses the trigger
    #[arg(long, default_value_t = PINCH_THRESHOLD)]
    pinch_threshold: f32,

    /// Distance (px) at which a held trigger releases; defaults to the pinch threshold
    #[arg(long)]
    release_threshold: Option<f32>,

    /// Max distance (px) from the duck's center that still counts as a hit
    #[arg(long, default_value_t = HIT_RADIUS)]
    hit_radius: f32,

    /// Stop after N frames
    #[arg(long)]
    frames: Option<u64>,

    /// Headless run with a self-aiming hand
    #[arg(long)]
    demo: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let game = GameConfig {
            seed:              self.seed,
            cooldown:          self.cooldown,
            pinch_threshold:   self.pinch_threshold,
            release_threshold: self.release_threshold.unwrap_or(self.pinch_threshold),
            hit_radius:        self.hit_radius,
            ..GameConfig::default()
        };
        AppConfig { game, sprite: self.sprite, max_frames: self.frames }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duck_hunt=info,duck_core=info".into()),
        )
        .init();

    let demo = cli.demo;
    let cfg  = cli.into_config();
    info!(
        cooldown = cfg.game.cooldown,
        pinch = cfg.game.pinch_threshold,
        hit_radius = cfg.game.hit_radius,
        seed = ?cfg.game.seed,
        "duck_hunt v{} starting", env!("CARGO_PKG_VERSION")
    );

    let summary = if demo {
        run_demo(cfg)?
    } else {
        println!();
        println!("  Duck Hunt: move the mouse to aim, hold the left button or Space to pinch.");
        println!("  Escape quits.");
        println!();
        run(cfg)?
    };

    info!(frames = summary.frames, reason = ?summary.reason, "game over");
    println!("Final score: {}", summary.score);
    Ok(())
}
