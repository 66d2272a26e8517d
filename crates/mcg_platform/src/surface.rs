use std::sync::Arc;

use image::RgbaImage;
use mcg_core::Rect;

/// A loaded image as seen by the game: a stable key, its natural size and,
/// when the host decoded it, the RGBA pixels. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ImageRef {
    pub key: Arc<str>,
    pub width: u32,
    pub height: u32,
    pub pixels: Option<Arc<RgbaImage>>,
}

impl ImageRef {
    /// An image known only by its dimensions.
    pub fn new(key: &str, width: u32, height: u32) -> Self {
        Self {
            key: Arc::from(key),
            width,
            height,
            pixels: None,
        }
    }

    pub fn with_pixels(key: &str, pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            key: Arc::from(key),
            width,
            height,
            pixels: Some(Arc::new(pixels)),
        }
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.width == other.width && self.height == other.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// The 2D drawing context the game renders into.
pub trait Surface {
    fn clear_rect(&mut self, rect: Rect);
    fn draw_image(&mut self, image: &ImageRef, src: Rect, dst: Rect);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn set_font(&mut self, font: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_text_align(&mut self, align: TextAlign);
    /// Push the current text style.
    fn save(&mut self);
    /// Pop the text style pushed by the matching `save`.
    fn restore(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub fill: String,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "10px sans-serif".to_string(),
            fill: "black".to_string(),
            align: TextAlign::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rect),
    Image {
        key: Arc<str>,
        src: Rect,
        dst: Rect,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// Surface that remembers every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    style: TextStyle,
    saved: Vec<TextStyle>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }

    fn draw_image(&mut self, image: &ImageRef, src: Rect, dst: Rect) {
        self.ops.push(DrawOp::Image {
            key: image.key.clone(),
            src,
            dst,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style: self.style.clone(),
        });
    }

    fn set_font(&mut self, font: &str) {
        self.style.font = font.to_string();
    }

    fn set_fill_style(&mut self, style: &str) {
        self.style.fill = style.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.style.align = align;
    }

    fn save(&mut self) {
        self.saved.push(self.style.clone());
    }

    fn restore(&mut self) {
        if let Some(style) = self.saved.pop() {
            self.style = style;
        }
    }
}
