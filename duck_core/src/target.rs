//! The duck: a two-state kinematic machine.
//!
//! ```text
//!            start_falling()
//!   Flying ──────────────────▶ Falling
//!     ▲  x += speed               fall_speed += 1, y += fall_speed
//!     │                              │
//!     └──── reset() ◀── exits right ─┴─ exits bottom
//! ```
//!
//! Every exit respawns the duck off-screen left with a fresh height and
//! speed, so it always re-enters from the same side.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::GameConfig;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState { Flying, Falling }

// ════════════════════════════════════════════════════════════════════════════
// Target
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct Target {
    pub(crate) x:          f32,
    pub(crate) y:          f32,
    pub(crate) speed:      f32,
    pub(crate) fall_speed: f32,
    pub(crate) state:      TargetState,
    cfg: GameConfig,
    rng: StdRng,
}

impl Target {
    /// Create a freshly spawned duck.  Uses `cfg.seed` when set.
    pub fn new(cfg: &GameConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }

    pub fn with_rng(cfg: &GameConfig, rng: StdRng) -> Self {
        let mut target = Target {
            x:          0.0,
            y:          0.0,
            speed:      0.0,
            fall_speed: 0.0,
            state:      TargetState::Flying,
            cfg:        cfg.clone(),
            rng,
        };
        target.reset();
        target
    }

    /// Respawn off-screen left with a random height and flight speed.
    pub fn reset(&mut self) {
        self.x          = self.cfg.spawn_x();
        self.y          = self.rng.gen_range(self.cfg.spawn_y_range()) as f32;
        self.speed      = self.rng.gen_range(self.cfg.speed_range.clone()) as f32;
        self.state      = TargetState::Flying;
        self.fall_speed = 0.0;
        debug!(y = self.y, speed = self.speed, "duck respawned");
    }

    /// Advance one tick.
    pub fn move_once(&mut self) {
        match self.state {
            TargetState::Flying => {
                self.x += self.speed;
                if self.x > self.cfg.screen_w as f32 {
                    self.reset();
                }
            }
            TargetState::Falling => {
                self.fall_speed += 1.0;
                self.y += self.fall_speed;
                if self.y > self.cfg.screen_h as f32 {
                    self.reset();
                }
            }
        }
    }

    /// Knock the duck out of the sky.  A falling duck stays as it is.
    pub fn start_falling(&mut self) {
        if self.state == TargetState::Falling { return; }
        self.state      = TargetState::Falling;
        self.fall_speed = self.cfg.fall_seed;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Top-left corner of the sprite.
    pub fn position(&self)   -> Point       { Point::new(self.x, self.y) }
    pub fn speed(&self)      -> f32         { self.speed }
    pub fn fall_speed(&self) -> f32         { self.fall_speed }
    pub fn state(&self)      -> TargetState { self.state }
    pub fn is_flying(&self)  -> bool        { self.state == TargetState::Flying }

    /// Visual center for a sprite of the given size anchored at the
    /// top-left corner.
    pub fn center(&self, sprite_w: u32, sprite_h: u32) -> Point {
        Point::new(self.x + sprite_w as f32 / 2.0, self.y + sprite_h as f32 / 2.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Target {
        Target::new(&GameConfig { seed: Some(seed), ..GameConfig::default() })
    }

    fn assert_fresh(t: &Target) {
        assert_eq!(t.state(), TargetState::Flying);
        assert_eq!(t.fall_speed(), 0.0);
        assert_eq!(t.position().x, -80.0);
        assert!((80.0..=360.0).contains(&t.position().y), "y = {}", t.position().y);
        assert!((5.0..=9.0).contains(&t.speed()), "speed = {}", t.speed());
        assert_eq!(t.position().y.fract(), 0.0);
        assert_eq!(t.speed().fract(), 0.0);
    }

    #[test]
    fn reset_invariant_holds_across_seeds() {
        for seed in 0..200 {
            let mut t = seeded(seed);
            assert_fresh(&t);
            t.start_falling();
            for _ in 0..5 { t.move_once(); }
            t.reset();
            assert_fresh(&t);
        }
    }

    #[test]
    fn flying_keeps_height() {
        let mut t = seeded(1);
        let y = t.position().y;
        for _ in 0..50 {
            t.move_once();
            assert_eq!(t.position().y, y);
            assert_eq!(t.fall_speed(), 0.0);
        }
    }

    #[test]
    fn flying_past_right_edge_respawns() {
        let mut t = seeded(2);
        t.x = 955.0;
        t.speed = 9.0;
        t.move_once();
        assert_eq!(t.position().x, -80.0);
        assert_eq!(t.state(), TargetState::Flying);
    }

    #[test]
    fn landing_exactly_on_right_edge_does_not_respawn() {
        let mut t = seeded(3);
        t.x = 951.0;
        t.speed = 9.0;
        t.move_once();
        assert_eq!(t.position().x, 960.0);
    }

    #[test]
    fn falling_accelerates_and_freezes_x() {
        let mut t = seeded(4);
        t.x = 300.0;
        t.y = 100.0;
        t.start_falling();
        let mut prev_fall = t.fall_speed();
        let mut prev_y    = t.position().y;
        for _ in 0..20 {
            t.move_once();
            if t.state() != TargetState::Falling { break; }
            assert!(t.fall_speed() > prev_fall);
            assert!(t.position().y - prev_y >= prev_fall);
            assert_eq!(t.position().x, 300.0);
            prev_fall = t.fall_speed();
            prev_y    = t.position().y;
        }
    }

    #[test]
    fn falling_past_bottom_respawns() {
        let mut t = seeded(5);
        t.y = 700.0;
        t.start_falling();
        t.move_once(); // fall 3 → 703
        assert_eq!(t.state(), TargetState::Falling);
        // 707, 712, 718, then 725 leaves the frame
        for _ in 0..3 { t.move_once(); }
        assert_eq!(t.position().y, 718.0);
        t.move_once();
        assert_fresh(&t);
    }

    #[test]
    fn start_falling_seeds_speed_once() {
        let mut t = seeded(6);
        t.start_falling();
        assert_eq!(t.fall_speed(), 2.0);
        t.move_once();
        assert_eq!(t.fall_speed(), 3.0);
        t.start_falling();
        assert_eq!(t.fall_speed(), 3.0);
        assert_eq!(t.state(), TargetState::Falling);
    }

    #[test]
    fn same_seed_same_spawns() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..10 {
            assert_eq!(a.position(), b.position());
            assert_eq!(a.speed(), b.speed());
            a.reset();
            b.reset();
        }
    }

    #[test]
    fn center_offsets_half_sprite() {
        let mut t = seeded(7);
        t.x = 100.0;
        t.y = 200.0;
        assert_eq!(t.center(80, 80), Point::new(140.0, 240.0));
    }
}
