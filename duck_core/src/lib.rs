//! # duck_core
//!
//! Gameplay core of a hand-gun duck hunt.  One duck crosses the screen,
//! the player pinches thumb and index finger to shoot at it, and the score
//! counts hits.  Everything here is driven by [`GameSession::tick`], called
//! once per video frame; there is no timer or thread of its own.
//!
//! | Module | Role |
//! |---|---|
//! | [`target`] | Duck kinematics: flying, falling, respawn |
//! | [`gesture`] | Pinch distance → held trigger + one-tick edge |
//! | [`hit`] | Cooldown-gated hit test, score bookkeeping |
//! | [`compositor`] | RGB frames, RGB/RGBA sprites, alpha blit |
//! | [`session`] | The per-frame sequence tying it together |
//!
//! ## Quick start
//!
//! ```rust
//! use duck_core::{Channels, FrameBuffer, GameConfig, GameSession, Sprite};
//!
//! let sprite = Sprite::new(80, 80, Channels::Rgb, vec![255; 80 * 80 * 3]).unwrap();
//! let cfg    = GameConfig { seed: Some(7), ..GameConfig::default() };
//! let mut game  = GameSession::new(cfg, sprite).unwrap();
//! let mut frame = FrameBuffer::filled(960, 720, [0, 0, 0]);
//!
//! let report = game.tick(&mut frame, &[], 0.0);
//! assert_eq!(report.score, 0);
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod session;
pub mod target;

pub use compositor::{blit, Channels, FrameBuffer, Sprite};
pub use config::GameConfig;
pub use error::{Error, Result};
pub use geometry::Point;
pub use gesture::{GestureInterpreter, GestureState, HandLandmarks};
pub use hit::{HitResolver, SessionState, ShotOutcome};
pub use session::{GameSession, TickReport};
pub use target::{Target, TargetState};
