//! Drawing seam shared by the two canvas compositors.
//!
//! Compositors describe a frame as calls on [`Surface`]; the wasm side
//! implements it on top of `CanvasRenderingContext2d`, tests record the calls.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }
}

/// Anything with natural pixel dimensions that a surface can draw.
pub trait Bitmap {
    fn natural_size(&self) -> Size;
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub line_width: f64,
}

pub trait Surface {
    type Image: Bitmap;

    fn size(&self) -> Size;
    fn clear(&mut self);
    fn fill_rect(&mut self, color: &str, rect: Rect);
    /// Strokes then fills `text` with its baseline starting at (`x`, `y`).
    fn outlined_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
}

#[derive(Debug, Error, PartialEq)]
pub enum WidgetError {
    #[error("layer slot {slot} out of range (0..{slots})")]
    SlotOutOfRange { slot: usize, slots: usize },
    #[error("invalid layer slot attribute {0:?}")]
    InvalidSlot(String),
    #[error("image has no pixels")]
    EmptyImage,
}

/// Largest aspect-preserving rect that fits `image` inside `bounds`,
/// centered on both axes.
pub fn fit_centered(image: Size, bounds: Size) -> Option<Rect> {
    if image.is_empty() || bounds.is_empty() {
        return None;
    }
    let scale = (bounds.width / image.width).min(bounds.height / image.height);
    let width = image.width * scale;
    let height = image.height * scale;
    Some(Rect {
        x: (bounds.width - width) / 2.0,
        y: (bounds.height - height) / 2.0,
        width,
        height,
    })
}

/// Caps `image` at `max_width` (never upscales) and anchors it to the
/// bottom-right corner of `bounds`, `margin` pixels in from both edges.
pub fn anchor_bottom_right(image: Size, bounds: Size, max_width: f64, margin: f64) -> Option<Rect> {
    if image.is_empty() {
        return None;
    }
    let width = max_width.min(image.width);
    let height = image.height * (width / image.width);
    Some(Rect {
        x: bounds.width - width - margin,
        y: bounds.height - height - margin,
        width,
        height,
    })
}

/// Newest-upload bookkeeping for one image target. File decodes finish in
/// any order; only the ticket handed out last may land.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadSequence {
    latest: u64,
}

impl UploadSequence {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct FakeImage {
        pub(crate) id: u32,
        pub(crate) size: Size,
    }

    impl FakeImage {
        pub(crate) fn new(id: u32, width: f64, height: f64) -> Self {
            Self {
                id,
                size: Size::new(width, height),
            }
        }
    }

    impl Bitmap for FakeImage {
        fn natural_size(&self) -> Size {
            self.size
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Op {
        Clear,
        Fill(String, Rect),
        Text(String, f64, f64),
        Image(u32, Rect),
    }

    pub(crate) struct Recorder {
        pub(crate) size: Size,
        pub(crate) ops: Vec<Op>,
    }

    impl Recorder {
        pub(crate) fn new(width: f64, height: f64) -> Self {
            Self {
                size: Size::new(width, height),
                ops: Vec::new(),
            }
        }
    }

    impl Surface for Recorder {
        type Image = FakeImage;

        fn size(&self) -> Size {
            self.size
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, color: &str, rect: Rect) {
            self.ops.push(Op::Fill(color.to_string(), rect));
        }

        fn outlined_text(&mut self, text: &str, x: f64, y: f64, _style: &TextStyle) {
            self.ops.push(Op::Text(text.to_string(), x, y));
        }

        fn draw_image(&mut self, image: &FakeImage, rect: Rect) {
            self.ops.push(Op::Image(image.id, rect));
        }
    }
}
