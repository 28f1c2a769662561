//! Frame sources and clocks.
//!
//! A frame source paces the game: one frame in, one tick out.  Returning
//! `None` means the stream ended and the loop stops.

use std::time::Instant;

use duck_core::FrameBuffer;

// ════════════════════════════════════════════════════════════════════════════
// FrameSource
// ════════════════════════════════════════════════════════════════════════════

pub trait FrameSource {
    /// Block until the next frame is available; `None` at end of stream.
    fn next_frame(&mut self) -> Option<FrameBuffer>;
}

/// Mirrors every frame of the inner source left–right, so the picture
/// moves the way the player's hand does.
pub struct Mirrored<S> {
    inner: S,
}

impl<S: FrameSource> Mirrored<S> {
    pub fn new(inner: S) -> Self { Mirrored { inner } }
}

impl<S: FrameSource> FrameSource for Mirrored<S> {
    fn next_frame(&mut self) -> Option<FrameBuffer> {
        let mut frame = self.inner.next_frame()?;
        frame.flip_horizontal();
        Some(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// BackdropFrameSource: synthetic scenery instead of a camera
// ════════════════════════════════════════════════════════════════════════════

const SKY_TOP:    [u8; 3] = [ 70, 130, 210];
const SKY_BOTTOM: [u8; 3] = [170, 210, 240];
const GRASS:      [u8; 3] = [ 60, 140,  60];
const REED:       [u8; 3] = [ 40,  95,  40];

/// Serves the same painted backdrop every tick, optionally for a limited
/// number of frames.
pub struct BackdropFrameSource {
    template:  FrameBuffer,
    remaining: Option<u64>,
}

impl BackdropFrameSource {
    pub fn new(width: u32, height: u32, limit: Option<u64>) -> Self {
        BackdropFrameSource { template: paint_backdrop(width, height), remaining: limit }
    }
}

impl FrameSource for BackdropFrameSource {
    fn next_frame(&mut self) -> Option<FrameBuffer> {
        if let Some(n) = self.remaining.as_mut() {
            if *n == 0 { return None; }
            *n -= 1;
        }
        Some(self.template.clone())
    }
}

/// Sky gradient over a strip of grass with a few reeds on the left.
fn paint_backdrop(width: u32, height: u32) -> FrameBuffer {
    let mut frame = FrameBuffer::filled(width, height, GRASS);
    let horizon = height * 4 / 5;

    for y in 0..horizon {
        let t = y as f32 / horizon.max(1) as f32;
        let mut rgb = [0u8; 3];
        for c in 0..3 {
            rgb[c] = (SKY_TOP[c] as f32 * (1.0 - t) + SKY_BOTTOM[c] as f32 * t) as u8;
        }
        for x in 0..width {
            frame.set_pixel(x, y, rgb);
        }
    }

    for i in 0..6u32 {
        let x0  = 20 + i * 23;
        let top = horizon.saturating_sub(40 + (i * 37) % 50);
        for y in top..horizon {
            for x in x0..x0 + 4 {
                frame.set_pixel(x, y, REED);
            }
        }
    }
    frame
}

// ════════════════════════════════════════════════════════════════════════════
// Clock
// ════════════════════════════════════════════════════════════════════════════

/// Seconds on a monotonic base, sampled once per tick.
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall clock measured from construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self { SystemClock { start: Instant::now() } }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 { self.start.elapsed().as_secs_f64() }
}

/// Advances by `dt` seconds each time it is read; first read returns 0.
pub struct FixedStepClock {
    next: f64,
    dt:   f64,
}

impl FixedStepClock {
    pub fn new(dt: f64) -> Self { FixedStepClock { next: 0.0, dt } }

    /// A clock ticking at `fps` frames per second.
    pub fn per_second(fps: u32) -> Self { Self::new(1.0 / fps.max(1) as f64) }
}

impl Clock for FixedStepClock {
    fn now(&mut self) -> f64 {
        let t = self.next;
        self.next += self.dt;
        t
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_respects_limit() {
        let mut src = BackdropFrameSource::new(32, 24, Some(2));
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn backdrop_has_requested_size() {
        let mut src = BackdropFrameSource::new(960, 720, None);
        let f = src.next_frame().unwrap();
        assert_eq!((f.width(), f.height()), (960, 720));
        assert_eq!(f.pixel(500, 719), Some(GRASS));
        assert_eq!(f.pixel(500, 0), Some(SKY_TOP));
    }

    #[test]
    fn mirrored_flips_each_frame() {
        let mut plain    = BackdropFrameSource::new(200, 100, Some(1));
        let mut mirrored = Mirrored::new(BackdropFrameSource::new(200, 100, Some(1)));
        let a = plain.next_frame().unwrap();
        let b = mirrored.next_frame().unwrap();
        // A reed near the left edge ends up near the right edge.
        assert_eq!(a.pixel(21, 79), Some(REED));
        assert_eq!(b.pixel(200 - 1 - 21, 79), Some(REED));
        assert!(mirrored.next_frame().is_none());
    }

    #[test]
    fn fixed_step_clock_advances() {
        let mut c = FixedStepClock::new(0.25);
        assert_eq!(c.now(), 0.0);
        assert_eq!(c.now(), 0.25);
        assert_eq!(c.now(), 0.5);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut c = SystemClock::new();
        let a = c.now();
        let b = c.now();
        assert!(b >= a);
    }
}
