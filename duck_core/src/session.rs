//! Per-frame orchestration.
//!
//! `GameSession` owns the [`SessionState`], the gesture memory and the duck
//! sprite.  [`GameSession::tick`] runs once per video frame in a fixed
//! order:
//!
//! 1. interpret the hand landmarks
//! 2. move the duck
//! 3. draw the duck into the frame
//! 4. resolve a shot if a fingertip is visible
//! 5. publish score and trigger state for the HUD

use crate::compositor::{self, FrameBuffer, Sprite};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::gesture::{GestureInterpreter, GestureState, HandLandmarks};
use crate::hit::{HitResolver, SessionState, ShotOutcome};
use crate::target::Target;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub gesture: GestureState,
    pub outcome: ShotOutcome,
    /// Whether the duck was inside the frame and got drawn.
    pub drawn:   bool,
    pub score:   u32,
}

// ════════════════════════════════════════════════════════════════════════════
// GameSession
// ════════════════════════════════════════════════════════════════════════════

pub struct GameSession {
    state:       SessionState,
    interpreter: GestureInterpreter,
    resolver:    HitResolver,
    sprite:      Sprite,
    last:        GestureState,
}

impl GameSession {
    /// Validate `cfg` and spawn the first duck.
    ///
    /// The sprite must have the configured size: spawn and exit positions
    /// come from the config, the hit center from the sprite.
    pub fn new(cfg: GameConfig, sprite: Sprite) -> Result<Self> {
        cfg.validate()?;
        if (sprite.width(), sprite.height()) != (cfg.sprite_w, cfg.sprite_h) {
            return Err(Error::InvalidConfig(format!(
                "sprite is {}×{}, config expects {}×{}",
                sprite.width(), sprite.height(), cfg.sprite_w, cfg.sprite_h
            )));
        }
        let target = Target::new(&cfg);
        Ok(Self::with_target(&cfg, sprite, target))
    }

    /// Start from an existing duck (used to replay a known spawn).
    pub fn with_target(cfg: &GameConfig, sprite: Sprite, target: Target) -> Self {
        GameSession {
            state:       SessionState::new(target),
            interpreter: GestureInterpreter::with_hysteresis(
                cfg.pinch_threshold, cfg.release_threshold,
            ),
            resolver:    HitResolver {
                hit_radius: cfg.hit_radius,
                cooldown:   cfg.cooldown,
                sprite_w:   sprite.width(),
                sprite_h:   sprite.height(),
            },
            sprite,
            last:        GestureState::default(),
        }
    }

    /// Run one frame.  `now` is wall-clock seconds on any monotonic base.
    pub fn tick(&mut self, frame: &mut FrameBuffer, hands: &[HandLandmarks], now: f64) -> TickReport {
        let gesture = self.interpreter.interpret(hands);

        self.state.target.move_once();

        let pos   = self.state.target.position();
        let drawn = compositor::blit(frame, &self.sprite, pos.x as i32, pos.y as i32);

        let outcome = self.resolver.try_shoot(
            &mut self.state, gesture.fingertip, gesture.trigger_edge, now,
        );

        self.last = gesture;
        TickReport { gesture, outcome, drawn, score: self.state.score }
    }

    // ── Read-only view for the HUD ────────────────────────────────────────

    pub fn score(&self)       -> u32              { self.state.score }
    /// Trigger held on the last tick; drives the "SHOOT" indicator.
    pub fn is_shooting(&self) -> bool             { self.last.trigger_active }
    pub fn fingertip(&self)   -> Option<Point>    { self.last.fingertip }
    pub fn target(&self)      -> &Target          { &self.state.target }
    pub fn state(&self)       -> &SessionState    { &self.state }
    pub fn sprite(&self)      -> &Sprite          { &self.sprite }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Channels;
    use crate::target::TargetState;

    fn duck_sprite() -> Sprite {
        Sprite::new(80, 80, Channels::Rgba, [200u8, 120, 20, 255].repeat(80 * 80)).unwrap()
    }

    fn blank_frame() -> FrameBuffer { FrameBuffer::filled(960, 720, [90, 160, 220]) }

    fn pinch_at(p: Point) -> HandLandmarks {
        HandLandmarks::new(p, Point::new(p.x + 10.0, p.y + 10.0))
    }

    fn open_at(p: Point) -> HandLandmarks {
        HandLandmarks::new(p, Point::new(p.x + 100.0, p.y + 100.0))
    }

    /// A session whose first duck flies at 9 px/tick from x = −80.
    fn fast_session() -> GameSession {
        let cfg = GameConfig { seed: Some(1), ..GameConfig::default() };
        let mut target = Target::new(&cfg);
        target.speed = 9.0;
        GameSession::with_target(&cfg, duck_sprite(), target)
    }

    #[test]
    fn new_rejects_bad_config() {
        let cfg = GameConfig { hit_radius: 0.0, ..GameConfig::default() };
        assert!(GameSession::new(cfg, duck_sprite()).is_err());
    }

    #[test]
    fn new_rejects_nan_hit_radius() {
        let cfg = GameConfig { hit_radius: f32::NAN, ..GameConfig::default() };
        assert!(matches!(GameSession::new(cfg, duck_sprite()), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn new_rejects_sprite_of_wrong_size() {
        let small = Sprite::new(40, 40, Channels::Rgb, vec![0; 40 * 40 * 3]).unwrap();
        let err = GameSession::new(GameConfig::default(), small).err();
        assert!(matches!(err, Some(Error::InvalidConfig(_))));

        let cfg = GameConfig { sprite_w: 40, sprite_h: 40, ..GameConfig::default() };
        let small = Sprite::new(40, 40, Channels::Rgb, vec![0; 40 * 40 * 3]).unwrap();
        assert!(GameSession::new(cfg, small).is_ok());
    }

    #[test]
    fn end_to_end_shot() {
        let mut game  = fast_session();
        let mut frame = blank_frame();

        for t in 0..19 {
            game.tick(&mut frame, &[], t as f64 / 30.0);
        }
        assert_eq!(game.target().position().x, 91.0);

        // Tick 20 moves the duck to x = 100, then the pinch lands on its center.
        let y = game.target().position().y;
        let center = Point::new(140.0, y + 40.0);
        let report = game.tick(&mut frame, &[pinch_at(center)], 20.0 / 30.0);

        assert_eq!(game.target().position().x, 100.0);
        assert_eq!(report.outcome, ShotOutcome::Hit);
        assert_eq!(game.score(), 1);
        assert_eq!(game.target().state(), TargetState::Falling);
        assert_eq!(game.target().fall_speed(), 2.0);
        assert!(game.is_shooting());
    }

    #[test]
    fn held_pinch_fires_once() {
        let mut game  = fast_session();
        let mut frame = blank_frame();
        for t in 0..30 { game.tick(&mut frame, &[], t as f64); }

        let mut hits = 0;
        for t in 30..40 {
            let c = game.target().center(80, 80);
            // aim where the duck will be after this tick's move
            let aim = Point::new(c.x + game.target().speed(), c.y);
            if game.tick(&mut frame, &[pinch_at(aim)], t as f64).outcome == ShotOutcome::Hit {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn duck_is_drawn_once_on_screen() {
        let mut game  = fast_session();
        let mut frame = blank_frame();
        // x = −71: off the left edge
        assert!(!game.tick(&mut frame, &[], 0.0).drawn);
        assert_eq!(frame, blank_frame());
        for t in 1..8 { game.tick(&mut frame, &[], t as f64); }
        // x = 1
        let report = game.tick(&mut frame, &[], 8.0);
        assert!(report.drawn);
        let y = game.target().position().y as u32;
        assert_eq!(frame.pixel(1, y), Some([200, 120, 20]));
    }

    #[test]
    fn hud_state_follows_last_tick() {
        let mut game  = fast_session();
        let mut frame = blank_frame();
        let p = Point::new(500.0, 500.0);

        game.tick(&mut frame, &[open_at(p)], 0.0);
        assert!(!game.is_shooting());
        assert_eq!(game.fingertip(), Some(p));

        game.tick(&mut frame, &[pinch_at(p)], 0.1);
        assert!(game.is_shooting());

        game.tick(&mut frame, &[], 0.2);
        assert!(!game.is_shooting());
        assert_eq!(game.fingertip(), None);
    }

    #[test]
    fn miss_reports_and_keeps_score() {
        let mut game  = fast_session();
        let mut frame = blank_frame();
        let report = game.tick(&mut frame, &[pinch_at(Point::new(900.0, 700.0))], 1.0);
        assert_eq!(report.outcome, ShotOutcome::Miss);
        assert_eq!(report.score, 0);
        assert!(report.gesture.trigger_edge);
    }
}
