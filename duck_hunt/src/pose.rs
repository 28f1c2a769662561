//! Hand pose sources.
//!
//! The game only needs two landmarks per frame: the index fingertip and the
//! thumb tip.  [`PoseSource`] hides where they come from, so the main loop
//! does not care whether a hand estimator, the mouse simulator, or a canned
//! script produced them.

use std::sync::mpsc::{Receiver, TryRecvError};

use duck_core::{FrameBuffer, HandLandmarks, Point};

// ════════════════════════════════════════════════════════════════════════════
// PoseSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can find hands in a frame.
///
/// Returns zero or more hands; the game reads only the first.
pub trait PoseSource {
    fn detect(&mut self, frame: &FrameBuffer) -> Vec<HandLandmarks>;
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource: mouse simulation
// ════════════════════════════════════════════════════════════════════════════

/// Thumb offset from the index tip with the hand open (~98 px apart).
const OPEN_GAP:    (f32, f32) = (90.0, 40.0);
/// Thumb offset while pinching (~13 px apart).
const PINCHED_GAP: (f32, f32) = (12.0, 6.0);

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer moved inside the window (frame pixels).
    Pointer { x: f32, y: f32 },
    /// Pointer left the window: the "hand" is out of view.
    PointerLost,
    /// Left button / Space held (`true`) or released.
    Pinch(bool),
}

/// Pose source driven by [`SimInput`] events sent by the visualizer.
///
/// The pointer stands in for the index fingertip; the thumb is placed
/// beside it, close when pinching and far otherwise, so the real pinch
/// distance logic runs on the result.
pub struct SimPoseSource {
    rx:      Receiver<SimInput>,
    pointer: Option<Point>,
    pinched: bool,
}

impl SimPoseSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimPoseSource { rx, pointer: None, pinched: false }
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(SimInput::Pointer { x, y }) => self.pointer = Some(Point::new(x, y)),
                Ok(SimInput::PointerLost)      => self.pointer = None,
                Ok(SimInput::Pinch(down))      => self.pinched = down,
                Err(TryRecvError::Empty)
                | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl PoseSource for SimPoseSource {
    fn detect(&mut self, _frame: &FrameBuffer) -> Vec<HandLandmarks> {
        self.drain();
        match self.pointer {
            Some(tip) => {
                let gap = if self.pinched { PINCHED_GAP } else { OPEN_GAP };
                vec![HandLandmarks::new(tip, Point::new(tip.x + gap.0, tip.y + gap.1))]
            }
            None => Vec::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedPoseSource: canned per-frame hands
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed list of per-frame hands, looping at the end.
#[derive(Debug, Clone)]
pub struct ScriptedPoseSource {
    script: Vec<Option<HandLandmarks>>,
    cursor: usize,
}

impl ScriptedPoseSource {
    pub fn new(script: Vec<Option<HandLandmarks>>) -> Self {
        ScriptedPoseSource { script, cursor: 0 }
    }
}

impl PoseSource for ScriptedPoseSource {
    fn detect(&mut self, _frame: &FrameBuffer) -> Vec<HandLandmarks> {
        if self.script.is_empty() { return Vec::new(); }
        let hand = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        hand.into_iter().collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
