//! The drawing surface: a fixed-size RGBA pixel buffer.
//!
//! Strokes are baked into the buffer as they arrive; there is no vector
//! history and no undo.  A GPU texture mirrors the buffer for display and
//! is re-uploaded whenever the pixels change.  The exporter never touches
//! the buffer directly; it works from a `snapshot()`.

use eframe::egui;
use egui::{Color32, ColorImage, Pos2, Rect, TextureHandle, TextureOptions};
use image::{Rgba, RgbaImage, imageops};

/// Surface dimensions, fixed for the life of the app.
pub const SURFACE_WIDTH: u32 = 960;
pub const SURFACE_HEIGHT: u32 = 600;

/// Paper color.  The eraser paints with this.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// The surface is opaque; alpha is forced to 255 on every stroke.
pub(crate) fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

pub struct CanvasSurface {
    image: RgbaImage,
    texture: Option<TextureHandle>,
    dirty: bool,
}

impl CanvasSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, to_rgba(BACKGROUND)),
            texture: None,
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn background(&self) -> Color32 {
        BACKGROUND
    }

    /// Bake one stroke segment into the pixel buffer.
    pub fn stroke(&mut self, from: Pos2, to: Pos2, size: u32, color: Color32) {
        crate::tools::stroke_line(&mut self.image, from, to, size, to_rgba(color));
        self.dirty = true;
    }

    /// Wipe the surface back to the background color.  Irreversible.
    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = to_rgba(BACKGROUND);
        }
        self.dirty = true;
    }

    /// Replace the surface content with `src`, scaled to the surface
    /// dimensions.  Strokes drawn afterwards land on top.
    pub fn set_background(&mut self, src: &RgbaImage) {
        self.image = imageops::resize(
            src,
            self.width(),
            self.height(),
            imageops::FilterType::Lanczos3,
        );
        self.dirty = true;
    }

    /// A copy of the rendered pixels, for the exporter.
    pub fn snapshot(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Translate a screen position into surface pixel coordinates, given
    /// the rectangle the surface occupies on screen (displayed 1:1).
    pub fn to_canvas(&self, screen: Pos2, rect: Rect) -> Pos2 {
        screen - rect.min.to_vec2()
    }

    /// Upload the pixel buffer to the GPU if it changed, then paint it
    /// into `rect`.
    pub fn paint(&mut self, ui: &mut egui::Ui, rect: Rect) {
        if self.dirty || self.texture.is_none() {
            let size = [self.image.width() as usize, self.image.height() as usize];
            let pixels = ColorImage::from_rgba_unmultiplied(size, self.image.as_raw());
            match &mut self.texture {
                // Reuse the handle to avoid texture allocation churn
                Some(tex) => tex.set(pixels, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "canvas",
                        pixels,
                        TextureOptions::NEAREST,
                    ))
                }
            }
            self.dirty = false;
        }

        if let Some(tex) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            ui.painter().image(tex.id(), rect, uv, Color32::WHITE);
        }
    }
}
