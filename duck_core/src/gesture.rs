//! Pinch-trigger recognition.
//!
//! The landmark source hands us thumb and index fingertips in frame pixels.
//! [`GestureInterpreter`] turns the continuous pinch distance into a held
//! `trigger_active` flag and a one-tick `trigger_edge` pulse, so a pinch
//! fires once no matter how long it is held.

use tracing::trace;

use crate::geometry::Point;

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks: the two points the game cares about
// ════════════════════════════════════════════════════════════════════════════

/// Fingertips of one detected hand, in frame-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    pub index_tip: Point,
    pub thumb_tip: Point,
}

impl HandLandmarks {
    pub fn new(index_tip: Point, thumb_tip: Point) -> Self {
        HandLandmarks { index_tip, thumb_tip }
    }

    /// Convert normalised `[0, 1]` estimator coordinates to whole frame
    /// pixels.  Fractions are truncated, as the landmark source reports
    /// integer pixels.
    pub fn from_normalized(index: (f32, f32), thumb: (f32, f32), width: u32, height: u32) -> Self {
        let px = |(nx, ny): (f32, f32)| {
            Point::new((nx * width as f32).trunc(), (ny * height as f32).trunc())
        };
        HandLandmarks { index_tip: px(index), thumb_tip: px(thumb) }
    }

    pub fn pinch_distance(&self) -> f32 {
        self.index_tip.distance(self.thumb_tip)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureState: per-frame summary
// ════════════════════════════════════════════════════════════════════════════

/// What the interpreter made of one frame.
///
/// `trigger_edge` implies `trigger_active`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureState {
    /// Index fingertip, absent when no hand was detected.
    pub fingertip:      Option<Point>,
    pub pinch_distance: Option<f32>,
    pub trigger_active: bool,
    /// True only on the frame the trigger goes from released to pressed.
    pub trigger_edge:   bool,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureInterpreter
// ════════════════════════════════════════════════════════════════════════════

/// Pinch threshold with one tick of memory for edge detection.
///
/// Only the first detected hand is considered; further hands in the same
/// frame are ignored.  The game is played with one hand.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    pinch_threshold:   f32,
    release_threshold: f32,
    previous_active:   bool,
}

impl GestureInterpreter {
    /// Plain threshold: pressed iff `distance < pinch_threshold`.
    pub fn new(pinch_threshold: f32) -> Self {
        Self::with_hysteresis(pinch_threshold, pinch_threshold)
    }

    /// A held trigger stays pressed until the distance reaches
    /// `release_threshold`.  Clamped so it never sits below the pinch
    /// threshold.
    pub fn with_hysteresis(pinch_threshold: f32, release_threshold: f32) -> Self {
        GestureInterpreter {
            pinch_threshold,
            release_threshold: release_threshold.max(pinch_threshold),
            previous_active:   false,
        }
    }

    /// Interpret one frame's detections.
    pub fn interpret(&mut self, hands: &[HandLandmarks]) -> GestureState {
        let state = match hands.first() {
            None => GestureState::default(),
            Some(hand) => {
                let distance = hand.pinch_distance();
                let limit = if self.previous_active {
                    self.release_threshold
                } else {
                    self.pinch_threshold
                };
                let active = distance < limit;
                GestureState {
                    fingertip:      Some(hand.index_tip),
                    pinch_distance: Some(distance),
                    trigger_active: active,
                    trigger_edge:   active && !self.previous_active,
                }
            }
        };

        if state.trigger_edge {
            trace!(distance = ?state.pinch_distance, "trigger pressed");
        }
        self.previous_active = state.trigger_active;
        state
    }

    /// Whether the trigger was held on the last interpreted frame.
    pub fn previous_active(&self) -> bool { self.previous_active }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
