//! Shot resolution: trigger edge + cooldown + distance to the duck.

use tracing::{info, trace};

use crate::geometry::Point;
use crate::target::Target;

// ════════════════════════════════════════════════════════════════════════════
// SessionState
// ════════════════════════════════════════════════════════════════════════════

/// Mutable state of one running game.
#[derive(Debug)]
pub struct SessionState {
    pub(crate) score:          u32,
    /// Time of the last shot that connected; `-inf` before the first hit.
    pub(crate) last_shot_time: f64,
    pub(crate) target:         Target,
}

impl SessionState {
    pub fn new(target: Target) -> Self {
        SessionState { score: 0, last_shot_time: f64::NEG_INFINITY, target }
    }

    pub fn score(&self)          -> u32     { self.score }
    pub fn last_shot_time(&self) -> f64     { self.last_shot_time }
    pub fn target(&self)         -> &Target { &self.target }
    pub fn target_mut(&mut self) -> &mut Target { &mut self.target }
}

// ════════════════════════════════════════════════════════════════════════════
// ShotOutcome
// ════════════════════════════════════════════════════════════════════════════

/// Why a tick did or did not score.  None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// No fingertip, or no fresh trigger press this tick.
    NoAttempt,
    /// Trigger pressed within the cooldown of the previous hit.
    CoolingDown,
    Hit,
    Miss,
    /// Shot landed on a duck that is already going down.
    AlreadyFalling,
}

// ════════════════════════════════════════════════════════════════════════════
// HitResolver
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResolver {
    pub hit_radius: f32,
    /// Seconds; only connecting shots restart it.
    pub cooldown:   f64,
    pub sprite_w:   u32,
    pub sprite_h:   u32,
}

impl HitResolver {
    /// Resolve a possible shot at time `now` (seconds).
    ///
    /// A hit needs a trigger edge, more than `cooldown` seconds since the
    /// last hit, a fingertip strictly inside `hit_radius` of the duck's
    /// center, and a flying duck.  Misses leave the cooldown clock alone,
    /// so only successive hits are spaced out.
    pub fn try_shoot(
        &self,
        state:        &mut SessionState,
        fingertip:    Option<Point>,
        trigger_edge: bool,
        now:          f64,
    ) -> ShotOutcome {
        let Some(tip) = fingertip else { return ShotOutcome::NoAttempt };
        if !trigger_edge {
            return ShotOutcome::NoAttempt;
        }
        if now - state.last_shot_time <= self.cooldown {
            trace!(since = now - state.last_shot_time, "shot rejected: cooling down");
            return ShotOutcome::CoolingDown;
        }

        let center   = state.target.center(self.sprite_w, self.sprite_h);
        let distance = tip.distance(center);
        if distance >= self.hit_radius {
            trace!(distance, "shot missed");
            return ShotOutcome::Miss;
        }
        if !state.target.is_flying() {
            trace!("shot hit a falling duck");
            return ShotOutcome::AlreadyFalling;
        }

        state.score += 1;
        state.target.start_falling();
        state.last_shot_time = now;
        info!(score = state.score, distance, "duck hit");
        ShotOutcome::Hit
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
