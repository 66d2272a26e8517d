//! Software surface over an RGBA canvas.
//!
//! `draw_image` samples the source region nearest-neighbour into the
//! destination rectangle, so a sprite placed with a different destination size
//! is scaled. Pixels are composited source-over and clipped to the canvas.
//! Text is not rasterized; `fill_text` calls are only counted and traced.

use std::path::Path;

use image::{Rgba, RgbaImage};
use mcg_core::{Rect, Size};
use mcg_platform::{ImageRef, Surface, TextAlign};

#[derive(Debug, Clone)]
struct TextState {
    font: String,
    fill: String,
    align: TextAlign,
}

pub struct PixelSurface {
    canvas: RgbaImage,
    state: TextState,
    saved: Vec<TextState>,
    text_calls: usize,
    skipped_images: usize,
}

impl PixelSurface {
    pub fn new(size: Size) -> Self {
        Self {
            canvas: RgbaImage::new(size.w, size.h),
            state: TextState {
                font: "10px sans-serif".to_string(),
                fill: "black".to_string(),
                align: TextAlign::Start,
            },
            saved: Vec::new(),
            text_calls: 0,
            skipped_images: 0,
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls
    }

    pub fn skipped_images(&self) -> usize {
        self.skipped_images
    }

    pub fn save_png(&self, path: &Path) -> Result<(), String> {
        self.canvas
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| format!("Failed to write '{}': {e}", path.display()))
    }

    /// Canvas pixel span covered by `[start, start + len)`, clipped.
    fn span(start: f32, len: f32, limit: u32) -> (u32, u32) {
        let lo = start.floor().max(0.0).min(limit as f32) as u32;
        let hi = (start + len).ceil().max(0.0).min(limit as f32) as u32;
        (lo, hi)
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = src;
        return;
    }
    let da = u32::from(dst[3]);
    let out_a = sa + da * (255 - sa) / 255;
    if out_a == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let s = u32::from(src[c]) * sa;
        let d = u32::from(dst[c]) * da * (255 - sa) / 255;
        dst[c] = ((s + d) / out_a).min(255) as u8;
    }
    dst[3] = out_a.min(255) as u8;
}

impl Surface for PixelSurface {
    fn clear_rect(&mut self, rect: Rect) {
        let (x0, x1) = Self::span(rect.x, rect.w, self.canvas.width());
        let (y0, y1) = Self::span(rect.y, rect.h, self.canvas.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.canvas.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn draw_image(&mut self, image: &ImageRef, src: Rect, dst: Rect) {
        let Some(pixels) = image.pixels.as_ref() else {
            self.skipped_images += 1;
            log::warn!("Image '{}' has no pixel data; draw skipped", image.key);
            return;
        };
        if dst.w <= 0.0 || dst.h <= 0.0 || src.w <= 0.0 || src.h <= 0.0 {
            return;
        }

        let (x0, x1) = Self::span(dst.x, dst.w, self.canvas.width());
        let (y0, y1) = Self::span(dst.y, dst.h, self.canvas.height());
        let scale_x = src.w / dst.w;
        let scale_y = src.h / dst.h;

        for y in y0..y1 {
            let v = y as f32 + 0.5 - dst.y;
            if v < 0.0 || v >= dst.h {
                continue;
            }
            let sy = (src.y + v * scale_y).floor();
            if sy < 0.0 || sy >= pixels.height() as f32 {
                continue;
            }
            for x in x0..x1 {
                let u = x as f32 + 0.5 - dst.x;
                if u < 0.0 || u >= dst.w {
                    continue;
                }
                let sx = (src.x + u * scale_x).floor();
                if sx < 0.0 || sx >= pixels.width() as f32 {
                    continue;
                }
                let texel = *pixels.get_pixel(sx as u32, sy as u32);
                blend(self.canvas.get_pixel_mut(x, y), texel);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.text_calls += 1;
        log::trace!(
            "fill_text '{}' at ({}, {}) font='{}' fill='{}' align={:?}",
            text,
            x,
            y,
            self.state.font,
            self.state.fill,
            self.state.align
        );
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_string();
    }

    fn set_fill_style(&mut self, style: &str) {
        self.state.fill = style.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}
