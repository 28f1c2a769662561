//! Duck sprite: decoded from an image file, or drawn procedurally.

use std::path::Path;

use image::imageops::FilterType;
use tracing::info;

use duck_core::{Channels, Sprite};

use crate::app::AppError;

/// Load and resize a sprite, keeping its alpha channel when it has one.
///
/// Any decode failure is fatal for the caller: the game does not start
/// without its duck.
pub fn load_sprite(path: &Path, width: u32, height: u32) -> Result<Sprite, AppError> {
    let img = image::open(path).map_err(|source| AppError::SpriteLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let (src_w, src_h) = (img.width(), img.height());
    let img = img.resize_exact(width, height, FilterType::Triangle);

    let sprite = if img.color().has_alpha() {
        Sprite::new(width, height, Channels::Rgba, img.to_rgba8().into_raw())?
    } else {
        Sprite::new(width, height, Channels::Rgb, img.to_rgb8().into_raw())?
    };
    info!(
        path = %path.display(), src_w, src_h, alpha = sprite.has_alpha(),
        "sprite loaded"
    );
    Ok(sprite)
}

// ════════════════════════════════════════════════════════════════════════════
// Built-in duck
// ════════════════════════════════════════════════════════════════════════════

const BODY: [u8; 4] = [120,  80,  40, 255];
const WING: [u8; 4] = [ 90,  60,  30, 255];
const HEAD: [u8; 4] = [ 30, 110,  50, 255];
const BEAK: [u8; 4] = [240, 170,  30, 255];
const EYE:  [u8; 4] = [ 10,  10,  10, 255];
const CLEAR:[u8; 4] = [  0,   0,   0,   0];

/// A flat-shaded duck facing right on a transparent background, used when
/// no sprite file is given.
pub fn builtin_duck(width: u32, height: u32) -> duck_core::Result<Sprite> {
    let (w, h) = (width as f32, height as f32);
    let inside = |x: f32, y: f32, cx: f32, cy: f32, rx: f32, ry: f32| {
        let dx = (x - cx) / rx;
        let dy = (y - cy) / ry;
        dx*dx + dy*dy <= 1.0
    };

    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for py in 0..height {
        for px in 0..width {
            let (x, y) = (px as f32 + 0.5, py as f32 + 0.5);
            let color =
                if inside(x, y, 0.78*w, 0.30*h, 0.04*w, 0.04*h)      { EYE  }
                else if x > 0.84*w && x < 0.98*w
                     && y > 0.30*h && y < 0.40*h                      { BEAK }
                else if inside(x, y, 0.72*w, 0.33*h, 0.14*w, 0.14*h) { HEAD }
                else if inside(x, y, 0.40*w, 0.50*h, 0.20*w, 0.12*h) { WING }
                else if inside(x, y, 0.42*w, 0.58*h, 0.36*w, 0.22*h) { BODY }
                else                                                   { CLEAR };
            data.extend_from_slice(&color);
        }
    }
    Sprite::new(width, height, Channels::Rgba, data)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
