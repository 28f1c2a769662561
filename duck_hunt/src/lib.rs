//! # duck_hunt
//!
//! Hand-gun duck hunt built on [`duck_core`]: a duck flies across the
//! screen and the player pinches thumb and index finger to shoot it.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Move index finger | Aim (red crosshair follows the fingertip) |
//! | Pinch thumb to index | Shoot once; hold does not auto-fire |
//! | Release and pinch again | Next shot (hits are at least 0.5 s apart) |
//!
//! ## Simulation controls
//!
//! Without a hand tracker the mouse plays the hand:
//!
//! | Input | Gesture |
//! |---|---|
//! | Mouse position | Index fingertip |
//! | Left button / `Space` held | Pinch |
//! | `Escape` or closing the window | Quit |
//!
//! `--demo` runs headless with a hand that aims itself and reports the score.

pub mod app;
pub mod frames;
pub mod pose;
pub mod sprite;
pub mod visualizer;
