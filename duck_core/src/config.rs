//! Gameplay tuning.
//!
//! `GameConfig::default()` reproduces the calibrated constants of the game:
//! a 960×720 feed, an 80×80 duck, 65 px pinch, 50 px hit radius and a half
//! second between hits.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

// ════════════════════════════════════════════════════════════════════════════
// Defaults
// ════════════════════════════════════════════════════════════════════════════

pub const SCREEN_W:        u32 = 960;
pub const SCREEN_H:        u32 = 720;
pub const SPRITE_SIZE:     u32 = 80;
/// Minimum spawn height; the duck never spawns under the score line.
pub const SPAWN_MIN_Y:     i32 = 80;
pub const SPEED_MIN:       i32 = 5;
pub const SPEED_MAX:       i32 = 9;
/// Initial fall speed when a duck is hit.
pub const FALL_SEED:       f32 = 2.0;
pub const PINCH_THRESHOLD: f32 = 65.0;
pub const HIT_RADIUS:      f32 = 50.0;
pub const SHOT_COOLDOWN:   f64 = 0.5;

// ════════════════════════════════════════════════════════════════════════════
// GameConfig
// ════════════════════════════════════════════════════════════════════════════

/// Everything the session needs to know about the playfield and the input
/// calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_w:          u32,
    pub screen_h:          u32,
    pub sprite_w:          u32,
    pub sprite_h:          u32,
    pub spawn_min_y:       i32,
    pub speed_range:       RangeInclusive<i32>,
    pub fall_seed:         f32,
    /// Pinch distance (px) below which the trigger is pressed.
    pub pinch_threshold:   f32,
    /// Pinch distance (px) at or above which a held trigger releases.
    /// Equal to `pinch_threshold` means no hysteresis.
    pub release_threshold: f32,
    pub hit_radius:        f32,
    /// Seconds that must elapse after a hit before the next hit counts.
    pub cooldown:          f64,
    /// Fixed rng seed for reproducible spawns; `None` seeds from entropy.
    pub seed:              Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_w:          SCREEN_W,
            screen_h:          SCREEN_H,
            sprite_w:          SPRITE_SIZE,
            sprite_h:          SPRITE_SIZE,
            spawn_min_y:       SPAWN_MIN_Y,
            speed_range:       SPEED_MIN..=SPEED_MAX,
            fall_seed:         FALL_SEED,
            pinch_threshold:   PINCH_THRESHOLD,
            release_threshold: PINCH_THRESHOLD,
            hit_radius:        HIT_RADIUS,
            cooldown:          SHOT_COOLDOWN,
            seed:              None,
        }
    }
}

impl GameConfig {
    /// Off-screen-left spawn sentinel: the duck starts one sprite width
    /// left of the frame.
    pub fn spawn_x(&self) -> f32 { -(self.sprite_w as f32) }

    /// Inclusive band of spawn heights: `[spawn_min_y, screen_h / 2]`.
    pub fn spawn_y_range(&self) -> RangeInclusive<i32> {
        self.spawn_min_y..=(self.screen_h / 2) as i32
    }

    pub fn validate(&self) -> Result<()> {
        if self.screen_w == 0 || self.screen_h == 0 {
            return Err(Error::InvalidConfig("screen size must be non-zero".into()));
        }
        if self.sprite_w == 0 || self.sprite_h == 0 {
            return Err(Error::InvalidConfig("sprite size must be non-zero".into()));
        }
        if self.spawn_y_range().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "spawn band {}..={} is empty", self.spawn_min_y, self.screen_h / 2
            )));
        }
        if self.speed_range.is_empty() || *self.speed_range.start() <= 0 {
            return Err(Error::InvalidConfig(format!(
                "speed range {:?} must be non-empty and positive", self.speed_range
            )));
        }
        if !positive_finite(self.fall_seed) {
            return Err(Error::InvalidConfig(format!(
                "fall seed {} must be positive and finite", self.fall_seed
            )));
        }
        if !positive_finite(self.pinch_threshold) || !positive_finite(self.hit_radius) {
            return Err(Error::InvalidConfig(format!(
                "pinch threshold {} and hit radius {} must be positive and finite",
                self.pinch_threshold, self.hit_radius
            )));
        }
        if !self.release_threshold.is_finite() || self.release_threshold < self.pinch_threshold {
            return Err(Error::InvalidConfig(format!(
                "release threshold {} must be finite and not below pinch threshold {}",
                self.release_threshold, self.pinch_threshold
            )));
        }
        if !self.cooldown.is_finite() || self.cooldown < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "cooldown {} must be finite and not negative", self.cooldown
            )));
        }
        Ok(())
    }
}

/// Finite and strictly positive; false for NaN.
fn positive_finite(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_spawn_band() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.spawn_x(), -80.0);
        assert_eq!(cfg.spawn_y_range(), 80..=360);
    }

    #[test]
    fn release_below_pinch_rejected() {
        let cfg = GameConfig { release_threshold: 40.0, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn empty_speed_range_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let cfg = GameConfig { speed_range: 9..=5, ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_thresholds_rejected() {
        let base = GameConfig::default();
        let bad = [
            GameConfig { hit_radius: f32::NAN, ..base.clone() },
            GameConfig { pinch_threshold: f32::NAN, ..base.clone() },
            GameConfig { release_threshold: f32::NAN, ..base.clone() },
            GameConfig { fall_seed: f32::NAN, ..base.clone() },
            GameConfig { cooldown: f64::NAN, ..base.clone() },
        ];
        for cfg in &bad {
            assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))), "{:?}", cfg);
        }
    }

    #[test]
    fn infinite_values_rejected() {
        let base = GameConfig::default();
        assert!(GameConfig { hit_radius: f32::INFINITY, ..base.clone() }.validate().is_err());
        assert!(GameConfig { release_threshold: f32::INFINITY, ..base.clone() }.validate().is_err());
        assert!(GameConfig { cooldown: f64::INFINITY, ..base.clone() }.validate().is_err());
        assert!(GameConfig { cooldown: -0.1, ..base }.validate().is_err());
    }

    #[test]
    fn tiny_screen_has_no_spawn_band() {
        let cfg = GameConfig { screen_h: 100, ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
