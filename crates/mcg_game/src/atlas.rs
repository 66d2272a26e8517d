//! Sprite atlas: sprite name → source region in a loaded image plus the
//! destination rectangle of its next draw.
//!
//! Sheets are described by a plain-text manifest with one sprite per line:
//!
//! ```text
//! bird 0 0 34 24
//! pipe 34 0 52 320
//! ```
//!
//! Each name owns exactly one [`SpriteFrame`]. Its `dst` rectangle is scratch
//! storage: every placement call (`place_at`, `place_centered`,
//! `place_full_screen`) rewrites it in place and returns that same frame. Two
//! placements of one name alias the same storage, so draw the returned frame
//! before placing the name again.

use std::collections::HashMap;

use mcg_core::{Rect, Size};
use mcg_platform::ImageRef;

use crate::error::GameError;

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub image: ImageRef,
    pub src: Rect,
    pub dst: Rect,
}

#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    canvas: Size,
    frames: HashMap<String, SpriteFrame>,
}

impl SpriteAtlas {
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            frames: HashMap::new(),
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Register an image as a single sprite covering its full bounds. The
    /// destination size is the natural size multiplied by `scale`.
    pub fn register_whole_image(
        &mut self,
        name: &str,
        image: &ImageRef,
        scale: Option<f32>,
    ) -> &SpriteFrame {
        let (w, h) = (image.width as f32, image.height as f32);
        let scale = scale.unwrap_or(1.0);
        let frame = SpriteFrame {
            image: image.clone(),
            src: Rect::new(0.0, 0.0, w, h),
            dst: Rect::new(0.0, 0.0, w * scale, h * scale),
        };
        self.frames.insert(name.to_string(), frame);
        &self.frames[name]
    }

    /// Parse a `name x y w h` manifest against `image` and register every
    /// sprite it lists, overwriting existing names. Nothing is registered if
    /// any line is malformed. Returns the number of sprites registered.
    pub fn parse_manifest(&mut self, image: &ImageRef, manifest: &str) -> Result<usize, GameError> {
        let text = manifest.trim();
        if text.is_empty() {
            return Ok(0);
        }

        let entries = text
            .split('\n')
            .enumerate()
            .map(|(index, line)| parse_manifest_line(index + 1, line.trim_end_matches('\r')))
            .collect::<Result<Vec<_>, _>>()?;

        let count = entries.len();
        for (name, src) in entries {
            self.frames.insert(
                name,
                SpriteFrame {
                    image: image.clone(),
                    src,
                    dst: Rect::new(0.0, 0.0, src.w, src.h),
                },
            );
        }
        Ok(count)
    }

    pub fn resolve(&self, name: &str) -> Result<&SpriteFrame, GameError> {
        self.frames
            .get(name)
            .ok_or_else(|| GameError::SpriteNotFound(name.to_string()))
    }

    /// Move the sprite's destination to `(x, y)`. Width and height change only
    /// when given; otherwise the previous destination size is kept.
    pub fn place_at(
        &mut self,
        name: &str,
        x: f32,
        y: f32,
        w: Option<f32>,
        h: Option<f32>,
    ) -> Result<&SpriteFrame, GameError> {
        let frame = self.frame_mut(name)?;
        frame.dst.x = x;
        frame.dst.y = y;
        apply_size(&mut frame.dst, w, h);
        Ok(&*frame)
    }

    /// Like [`place_at`](Self::place_at) with `x` chosen to center the sprite
    /// horizontally on the canvas, rounded down.
    pub fn place_centered(
        &mut self,
        name: &str,
        y: f32,
        w: Option<f32>,
        h: Option<f32>,
    ) -> Result<&SpriteFrame, GameError> {
        let canvas_w = self.canvas.w as f32;
        let frame = self.frame_mut(name)?;
        apply_size(&mut frame.dst, w, h);
        frame.dst.x = ((canvas_w - frame.dst.w) / 2.0).floor();
        frame.dst.y = y;
        Ok(&*frame)
    }

    pub fn place_full_screen(&mut self, name: &str) -> Result<&SpriteFrame, GameError> {
        let canvas = self.canvas.as_rect();
        let frame = self.frame_mut(name)?;
        frame.dst = canvas;
        Ok(&*frame)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn frame_mut(&mut self, name: &str) -> Result<&mut SpriteFrame, GameError> {
        self.frames
            .get_mut(name)
            .ok_or_else(|| GameError::SpriteNotFound(name.to_string()))
    }
}

fn apply_size(dst: &mut Rect, w: Option<f32>, h: Option<f32>) {
    if let Some(w) = w {
        dst.w = w.max(0.0);
    }
    if let Some(h) = h {
        dst.h = h.max(0.0);
    }
}

fn parse_manifest_line(line_no: usize, line: &str) -> Result<(String, Rect), GameError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let [name, x, y, w, h] = tokens.as_slice() else {
        return Err(GameError::Parse {
            line: line_no,
            reason: format!("expected 5 fields 'name x y w h', found {}", tokens.len()),
        });
    };
    if name.is_empty() {
        return Err(GameError::Parse {
            line: line_no,
            reason: "sprite name is empty".to_string(),
        });
    }

    let field = |label: &str, raw: &str| -> Result<i32, GameError> {
        raw.parse::<i32>().map_err(|e| GameError::Parse {
            line: line_no,
            reason: format!("{label} '{raw}' is not an integer: {e}"),
        })
    };
    let x = field("x", *x)?;
    let y = field("y", *y)?;
    let w = field("w", *w)?;
    let h = field("h", *h)?;
    if w < 0 || h < 0 {
        return Err(GameError::Parse {
            line: line_no,
            reason: format!("sprite '{name}' has negative size {w}x{h}"),
        });
    }

    Ok((
        name.to_string(),
        Rect::new(x as f32, y as f32, w as f32, h as f32),
    ))
}
