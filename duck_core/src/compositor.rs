//! Pixel buffers and sprite compositing.
//!
//! Frames are 3-channel RGB.  Sprites are RGB or RGBA; RGBA sprites are
//! alpha-blended, RGB sprites overwrite.  A sprite that would stick out of
//! the frame on any side is not drawn at all.  The duck enters and leaves
//! the screen every few seconds, so this is routine rather than an error.

use crate::error::{Error, Result};

// ════════════════════════════════════════════════════════════════════════════
// FrameBuffer
// ════════════════════════════════════════════════════════════════════════════

/// Row-major, interleaved RGB frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width:  u32,
    height: u32,
    data:   Vec<u8>,
}

impl FrameBuffer {
    pub const CHANNELS: usize = 3;

    /// A frame filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb.iter().copied().cycle()
            .take(width as usize * height as usize * Self::CHANNELS)
            .collect();
        FrameBuffer { width, height, data }
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferSize { expected, actual: data.len() });
        }
        Ok(FrameBuffer { width, height, data })
    }

    pub fn width(&self)  -> u32     { self.width }
    pub fn height(&self) -> u32     { self.height }
    pub fn as_bytes(&self) -> &[u8] { &self.data }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height { return None; }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }

    /// Mirror left–right, as a selfie camera preview does.
    pub fn flip_horizontal(&mut self) {
        let row_len = self.width as usize * Self::CHANNELS;
        if row_len == 0 { return; }
        for row in self.data.chunks_exact_mut(row_len) {
            let w = row.len() / Self::CHANNELS;
            for col in 0..w / 2 {
                let a = col * Self::CHANNELS;
                let b = (w - 1 - col) * Self::CHANNELS;
                for c in 0..Self::CHANNELS {
                    row.swap(a + c, b + c);
                }
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sprite
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels { Rgb, Rgba }

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb  => 3,
            Channels::Rgba => 4,
        }
    }

    pub fn from_count(n: usize) -> Result<Self> {
        match n {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(Error::UnsupportedChannels(n)),
        }
    }
}

/// Small fixed-size image with optional per-pixel alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    width:    u32,
    height:   u32,
    channels: Channels,
    data:     Vec<u8>,
}

impl Sprite {
    pub fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(Error::BufferSize { expected, actual: data.len() });
        }
        Ok(Sprite { width, height, channels, data })
    }

    pub fn width(&self)      -> u32      { self.width }
    pub fn height(&self)     -> u32      { self.height }
    pub fn channels(&self)   -> Channels { self.channels }
    pub fn has_alpha(&self)  -> bool     { self.channels == Channels::Rgba }
}

// ════════════════════════════════════════════════════════════════════════════
// blit
// ════════════════════════════════════════════════════════════════════════════

/// Draw `sprite` with its top-left corner at `(x, y)`.
///
/// Returns `false` and leaves `dest` untouched when the sprite does not fit
/// entirely inside the frame.
pub fn blit(dest: &mut FrameBuffer, sprite: &Sprite, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    let (x, y) = (x as u32, y as u32);
    if x as u64 + sprite.width as u64 > dest.width as u64
        || y as u64 + sprite.height as u64 > dest.height as u64
    {
        return false;
    }

    let src_stride = sprite.channels.count();
    let row_px     = sprite.width as usize;

    for row in 0..sprite.height {
        let src_row = &sprite.data[row as usize * row_px * src_stride..][..row_px * src_stride];
        let dst_start = dest.offset(x, y + row);
        let dst_row = &mut dest.data[dst_start..dst_start + row_px * FrameBuffer::CHANNELS];

        match sprite.channels {
            Channels::Rgb => dst_row.copy_from_slice(src_row),
            Channels::Rgba => {
                for (src, dst) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(3)) {
                    let alpha = src[3] as f32 / 255.0;
                    for c in 0..3 {
                        let blended = alpha * src[c] as f32 + (1.0 - alpha) * dst[c] as f32;
                        // truncate, as a float → u8 store does
                        dst[c] = blended as u8;
                    }
                }
            }
        }
    }
    true
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
