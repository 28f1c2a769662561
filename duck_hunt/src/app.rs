//! Top-level game loop.
//!
//! [`run_loop`] pulls one frame, finds the hand, ticks the [`GameSession`]
//! and presents the result, once per frame until the frame source runs dry
//! or the display asks to stop.  [`run`] wires it to the window and the
//! mouse simulator; [`run_demo`] runs it headless with a self-aiming hand.

use std::path::PathBuf;
use std::sync::mpsc;

use thiserror::Error;
use tracing::{info, warn};

use duck_core::{GameConfig, GameSession, Sprite};

use crate::frames::{BackdropFrameSource, Clock, FixedStepClock, FrameSource, Mirrored, SystemClock};
use crate::pose::{PoseSource, SimPoseSource};
use crate::sprite::{builtin_duck, load_sprite};
use crate::visualizer::{AutoAimSink, DisplaySink, Hud, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub game:       GameConfig,
    /// Sprite image; the built-in duck is drawn when `None`.
    pub sprite:     Option<PathBuf>,
    /// Stop after this many frames (the frame source ends there).
    pub max_frames: Option<u64>,
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load sprite {}: {source}", .path.display())]
    SpriteLoad {
        path:   PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to open window: {0}")]
    Window(#[from] minifb::Error),
    #[error("frame source delivered no frames")]
    FrameSourceUnavailable,
    #[error(transparent)]
    Core(#[from] duck_core::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// Run summary
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The frame source ran out of frames.
    EndOfStream,
    /// The display asked to stop (Escape, window closed, frame limit).
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub score:  u32,
    pub reason: StopReason,
}

// ════════════════════════════════════════════════════════════════════════════
// run_loop
// ════════════════════════════════════════════════════════════════════════════

/// Drive `session` until the frames end or the display asks to stop.
///
/// A source that yields no frame at all is a startup failure; running out
/// later is a normal end of stream.
pub fn run_loop(
    session: &mut GameSession,
    frames:  &mut dyn FrameSource,
    pose:    &mut dyn PoseSource,
    display: &mut dyn DisplaySink,
    clock:   &mut dyn Clock,
) -> Result<RunSummary, AppError> {
    let mut count = 0u64;

    loop {
        display.poll();

        let Some(mut frame) = frames.next_frame() else {
            if count == 0 {
                return Err(AppError::FrameSourceUnavailable);
            }
            info!(frames = count, "end of frame stream");
            return Ok(summary(session, count, StopReason::EndOfStream));
        };
        count += 1;

        let hands = pose.detect(&frame);
        let now   = clock.now();
        session.tick(&mut frame, &hands, now);

        display.present(&frame, &Hud::from_session(session));
        if display.stop_requested() {
            return Ok(summary(session, count, StopReason::StopRequested));
        }
    }
}

fn summary(session: &GameSession, frames: u64, reason: StopReason) -> RunSummary {
    RunSummary { frames, score: session.score(), reason }
}

fn prepare_sprite(cfg: &AppConfig) -> Result<Sprite, AppError> {
    let (w, h) = (cfg.game.sprite_w, cfg.game.sprite_h);
    match &cfg.sprite {
        Some(path) => load_sprite(path, w, h),
        None => {
            info!("no sprite file given, drawing the built-in duck");
            Ok(builtin_duck(w, h)?)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): windowed game
// ════════════════════════════════════════════════════════════════════════════

/// Run the game in a window, with the mouse standing in for the hand.
pub fn run(cfg: AppConfig) -> Result<RunSummary, AppError> {
    let sprite      = prepare_sprite(&cfg)?;
    let mut session = GameSession::new(cfg.game.clone(), sprite)?;

    // ── Sim pose channel ──────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel();
    let mut pose = SimPoseSource::new(sim_rx);

    // ── Window (owns the sim input sender) ───────────────────────────────
    let (w, h) = (cfg.game.screen_w, cfg.game.screen_h);
    let mut display = Visualizer::new(w as usize, h as usize, sim_tx)?;

    let mut frames = Mirrored::new(BackdropFrameSource::new(w, h, cfg.max_frames));
    let mut clock  = SystemClock::new();

    info!(width = w, height = h, "window open");
    run_loop(&mut session, &mut frames, &mut pose, &mut display, &mut clock)
}

// ════════════════════════════════════════════════════════════════════════════
// run_demo(): headless attract mode
// ════════════════════════════════════════════════════════════════════════════

/// Frames played by `run_demo` when no limit is configured.
pub const DEMO_FRAMES: u64 = 600;

/// Pinch cadence of the demo hand: 3 frames pinched out of every 16, so
/// presses at 30 fps land just outside the default half-second cooldown.
const DEMO_PINCH_EVERY: u64 = 16;
const DEMO_PINCH_HOLD:  u64 = 3;

/// Run without a window at a simulated 30 fps.  An [`AutoAimSink`] points
/// the simulated hand at wherever the current duck is and pinches on a
/// fixed cadence.
pub fn run_demo(cfg: AppConfig) -> Result<RunSummary, AppError> {
    let sprite      = prepare_sprite(&cfg)?;
    let mut session = GameSession::new(cfg.game.clone(), sprite)?;

    let (w, h) = (cfg.game.screen_w, cfg.game.screen_h);
    let limit  = cfg.max_frames.unwrap_or(DEMO_FRAMES);

    let (sim_tx, sim_rx) = mpsc::channel();
    let mut pose    = SimPoseSource::new(sim_rx);
    let mut display = AutoAimSink::new(sim_tx, DEMO_PINCH_EVERY, DEMO_PINCH_HOLD);
    let mut frames  = Mirrored::new(BackdropFrameSource::new(w, h, Some(limit)));
    let mut clock   = FixedStepClock::per_second(30);

    let result = run_loop(&mut session, &mut frames, &mut pose, &mut display, &mut clock)?;
    if result.score == 0 {
        warn!(frames = result.frames, "demo hand never connected");
    }
    Ok(result)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::ScriptedPoseSource;
    use crate::visualizer::HeadlessSink;
    use duck_core::{Channels, FrameBuffer, HandLandmarks, Point, Target, TargetState};

    fn cfg() -> GameConfig {
        GameConfig { seed: Some(11), ..GameConfig::default() }
    }

    fn sprite() -> Sprite {
        Sprite::new(80, 80, Channels::Rgb, vec![255; 80 * 80 * 3]).unwrap()
    }

    /// Serves `n` blank frames.
    struct Frames(u64);
    impl FrameSource for Frames {
        fn next_frame(&mut self) -> Option<FrameBuffer> {
            if self.0 == 0 { return None; }
            self.0 -= 1;
            Some(FrameBuffer::filled(960, 720, [0, 0, 0]))
        }
    }

    /// Pinches exactly on the duck's center on frame `at`, open hand elsewhere.
    struct Sniper { frame: u64, at: u64, aim: Point }
    impl PoseSource for Sniper {
        fn detect(&mut self, _f: &FrameBuffer) -> Vec<HandLandmarks> {
            self.frame += 1;
            let gap = if self.frame == self.at { 5.0 } else { 150.0 };
            vec![HandLandmarks::new(self.aim, Point::new(self.aim.x + gap, self.aim.y))]
        }
    }

    fn new_session() -> GameSession {
        let cfg = cfg();
        GameSession::with_target(&cfg, sprite(), Target::new(&cfg))
    }

    #[test]
    fn scripted_pinch_on_duck_scores() {
        let mut session = new_session();
        let speed = session.target().speed();
        let y     = session.target().position().y;
        // Duck's center after 20 ticks.
        let aim   = Point::new(-80.0 + 20.0 * speed + 40.0, y + 40.0);

        let mut pose    = Sniper { frame: 0, at: 20, aim };
        let mut display = HeadlessSink::new(None);
        let summary = run_loop(
            &mut session, &mut Frames(25), &mut pose, &mut display,
            &mut FixedStepClock::per_second(30),
        ).unwrap();

        assert_eq!(summary, RunSummary { frames: 25, score: 1, reason: StopReason::EndOfStream });
        assert_eq!(session.target().state(), TargetState::Falling);
        assert_eq!(display.last_hud.unwrap().score, 1);
    }

    #[test]
    fn empty_source_is_fatal() {
        let mut session = new_session();
        let err = run_loop(
            &mut session, &mut Frames(0), &mut ScriptedPoseSource::new(vec![]),
            &mut HeadlessSink::new(None), &mut FixedStepClock::new(0.1),
        ).unwrap_err();
        assert!(matches!(err, AppError::FrameSourceUnavailable));
    }

    #[test]
    fn stop_request_ends_loop_after_present() {
        let mut session = new_session();
        let mut display = HeadlessSink::new(Some(3));
        let summary = run_loop(
            &mut session, &mut Frames(100), &mut ScriptedPoseSource::new(vec![]),
            &mut display, &mut FixedStepClock::new(0.1),
        ).unwrap();
        assert_eq!(summary.reason, StopReason::StopRequested);
        assert_eq!(summary.frames, 3);
        assert_eq!(display.presented, 3);
    }

    #[test]
    fn demo_runs_headless_to_its_limit() {
        let app = AppConfig { game: cfg(), sprite: None, max_frames: Some(120) };
        let summary = run_demo(app).unwrap();
        assert_eq!(summary.frames, 120);
        assert_eq!(summary.reason, StopReason::EndOfStream);
        assert!(summary.score >= 2, "score = {}", summary.score);
    }

    #[test]
    fn demo_hand_follows_respawned_ducks() {
        for seed in 0..8 {
            let game = GameConfig { seed: Some(seed), ..GameConfig::default() };
            let app  = AppConfig { game, sprite: None, max_frames: None };
            let summary = run_demo(app).unwrap();
            assert_eq!(summary.frames, DEMO_FRAMES);
            assert!(summary.score >= 8, "seed {}: score = {}", seed, summary.score);
        }
    }

    #[test]
    fn missing_sprite_file_stops_startup() {
        let app = AppConfig {
            game:       cfg(),
            sprite:     Some(PathBuf::from("/nonexistent/bird.png")),
            max_frames: Some(1),
        };
        assert!(matches!(run_demo(app), Err(AppError::SpriteLoad { .. })));
    }

    #[test]
    fn invalid_config_stops_startup() {
        let game = GameConfig { pinch_threshold: -1.0, ..cfg() };
        let app  = AppConfig { game, sprite: None, max_frames: Some(1) };
        assert!(matches!(run_demo(app), Err(AppError::Core(_))));
    }
}
