//! Software-rendered display using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ SCORE: 3                                                 │
//! │                       [duck] →                           │
//! │             ● SHOOT        (crosshair at fingertip)      │
//! │                                                          │
//! │ PINCH FINGERS TO SHOOT                                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The game frame arrives as RGB bytes; the HUD is drawn on top of it in
//! the window's packed `0RGB` buffer, so the frame itself is never
//! touched by text or crosshair pixels.

use std::sync::mpsc::Sender;

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use duck_core::{FrameBuffer, GameSession, Point};

use crate::app::AppError;
use crate::pose::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const SCORE_COLOR:     u32   = 0xFFFFFFFF;
const CAPTION_COLOR:   u32   = 0xFFC8C8C8;
const CROSSHAIR_COLOR: u32   = 0xFFFF0000;
const SHOOT_COLOR:     u32   = 0xFFFF0000;
const CROSSHAIR_R:     i32   = 10;
const SCORE_SCALE:     usize = 5;
const CAPTION_SCALE:   usize = 3;
const SHOOT_SCALE:     usize = 3;
pub const CAPTION:     &str  = "Pinch fingers to shoot";

// ════════════════════════════════════════════════════════════════════════════
// Hud: what the display shows besides the frame
// ════════════════════════════════════════════════════════════════════════════

/// Read-only snapshot of the session for the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score:     u32,
    /// Trigger held this tick: shows the "SHOOT" tag.
    pub shooting:  bool,
    pub fingertip: Option<Point>,
    /// Center of the duck while it is flying; `None` once it is hit.
    pub duck:      Option<Point>,
}

impl Hud {
    pub fn from_session(session: &GameSession) -> Self {
        let target = session.target();
        let sprite = session.sprite();
        Hud {
            score:     session.score(),
            shooting:  session.is_shooting(),
            fingertip: session.fingertip(),
            duck:      target.is_flying()
                .then(|| target.center(sprite.width(), sprite.height())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DisplaySink
// ════════════════════════════════════════════════════════════════════════════

/// Where finished frames go.
pub trait DisplaySink {
    /// Pump pending input.  Called at the start of every tick.
    fn poll(&mut self) {}

    fn present(&mut self, frame: &FrameBuffer, hud: &Hud);

    /// Checked once per tick after `present`.
    fn stop_requested(&self) -> bool;
}

/// Display that shows nothing; remembers the last HUD and can stop the
/// loop after a number of frames.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    pub presented:  u64,
    pub last_hud:   Option<Hud>,
    pub stop_after: Option<u64>,
}

impl HeadlessSink {
    pub fn new(stop_after: Option<u64>) -> Self {
        HeadlessSink { stop_after, ..Self::default() }
    }
}

impl DisplaySink for HeadlessSink {
    fn present(&mut self, _frame: &FrameBuffer, hud: &Hud) {
        self.presented += 1;
        self.last_hud = Some(hud.clone());
    }

    fn stop_requested(&self) -> bool {
        self.stop_after.is_some_and(|n| self.presented >= n)
    }
}

/// Headless display that plays by itself: after each frame it points the
/// simulated hand at the flying duck and pinches for `hold` frames out of
/// every `every`.  Drives a [`SimPoseSource`](crate::pose::SimPoseSource)
/// through the same channel the window uses.
pub struct AutoAimSink {
    sim_tx:        Sender<SimInput>,
    every:         u64,
    hold:          u64,
    pub presented: u64,
    pub last_hud:  Option<Hud>,
}

impl AutoAimSink {
    pub fn new(sim_tx: Sender<SimInput>, every: u64, hold: u64) -> Self {
        AutoAimSink { sim_tx, every: every.max(1), hold, presented: 0, last_hud: None }
    }
}

impl DisplaySink for AutoAimSink {
    fn present(&mut self, _frame: &FrameBuffer, hud: &Hud) {
        let aim = match hud.duck {
            Some(p) => SimInput::Pointer { x: p.x, y: p.y },
            None    => SimInput::PointerLost,
        };
        let pinch = self.presented % self.every < self.hold;
        let _ = self.sim_tx.send(aim);
        let _ = self.sim_tx.send(SimInput::Pinch(pinch));

        self.presented += 1;
        self.last_hud = Some(hud.clone());
    }

    fn stop_requested(&self) -> bool { false }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas: packed 0RGB buffer with drawing helpers
// ════════════════════════════════════════════════════════════════════════════

pub struct Canvas {
    pub buf: Vec<u32>,
    width:   usize,
    height:  usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { buf: vec![0; width * height], width, height }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Copy an RGB frame in; sizes must match or the canvas is resized.
    pub fn load_frame(&mut self, frame: &FrameBuffer) {
        self.width  = frame.width() as usize;
        self.height = frame.height() as usize;
        self.buf.clear();
        self.buf.extend(frame.as_bytes().chunks_exact(3).map(|px| {
            0xFF000000 | (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32
        }));
    }

    /// Frame plus score, caption, crosshair and shoot tag.
    pub fn draw_hud(&mut self, hud: &Hud) {
        let score = format!("Score: {}", hud.score);
        self.draw_label(&score, 20, 20, SCORE_SCALE, SCORE_COLOR);

        let caption_y = self.height.saturating_sub(20 + 5 * CAPTION_SCALE);
        self.draw_label(CAPTION, 20, caption_y, CAPTION_SCALE, CAPTION_COLOR);

        if let Some(tip) = hud.fingertip {
            let (cx, cy) = (tip.x as i32, tip.y as i32);
            self.fill_circle(cx, cy, CROSSHAIR_R, CROSSHAIR_COLOR);
            if hud.shooting {
                let tx = cx + 10;
                let ty = cy - 10 - 5 * SHOOT_SCALE as i32;
                if tx >= 0 && ty >= 0 {
                    self.draw_label("SHOOT", tx as usize, ty as usize, SHOOT_SCALE, SHOOT_COLOR);
                }
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.buf[y * self.width + x] = color;
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(self.height) {
            for col in x..(x+w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx*dx + dy*dy > r*r { continue; }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 {
                    self.set_pixel(x as usize, y as usize, color);
                }
            }
        }
    }

    /// Minimal bitmap font, 3×5 glyphs, each pixel drawn as a
    /// `scale`×`scale` block.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let advance = 4 * scale; // 3 wide + 1 gap
        let mut cx = x;
        for ch in text.chars() {
            if cx + advance > self.width { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += advance;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer: the game window
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    canvas: Canvas,
    sim_tx: Sender<SimInput>,
    /// Last pointer state sent, to avoid flooding the channel.
    last_pointer: Option<(f32, f32)>,
    last_pinch:   bool,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Duck Hunt - Hand Gun",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.set_target_fps(30);

        Ok(Visualizer {
            window,
            canvas: Canvas::new(width, height),
            sim_tx,
            last_pointer: None,
            last_pinch:   false,
        })
    }
}

impl DisplaySink for Visualizer {
    /// Translate mouse and keyboard state into [`SimInput`] events.
    fn poll(&mut self) {
        let pointer = self.window.get_mouse_pos(MouseMode::Discard);
        if pointer != self.last_pointer {
            let event = match pointer {
                Some((x, y)) => SimInput::Pointer { x, y },
                None         => SimInput::PointerLost,
            };
            let _ = self.sim_tx.send(event);
            self.last_pointer = pointer;
        }

        let pinch = self.window.get_mouse_down(MouseButton::Left)
                 || self.window.is_key_down(Key::Space);
        if pinch != self.last_pinch {
            let _ = self.sim_tx.send(SimInput::Pinch(pinch));
            self.last_pinch = pinch;
        }
    }

    fn present(&mut self, frame: &FrameBuffer, hud: &Hud) {
        self.canvas.load_frame(frame);
        self.canvas.draw_hud(hud);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window.update_with_buffer(&self.canvas.buf, w, h).ok();
    }

    fn stop_requested(&self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
