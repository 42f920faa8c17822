use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{imageops, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::io::Cursor;

use crate::application::ports::Surface;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::labels::OverlayColor;

/// `Surface` respaldada por un buffer RGBA.
///
/// Replica la geometría del canvas 2D del navegador: el trazo queda centrado
/// sobre el borde del rectángulo y `y` del texto es la línea base.
pub struct RasterSurface {
    canvas: RgbaImage,
    line_width: f32,
    font: Option<FontArc>,
    font_px: f32,
}

impl RasterSurface {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { canvas: RgbaImage::new(0, 0), line_width: 1.0, font, font_px: 10.0 }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    pub fn encode_png(&self) -> DomainResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.canvas
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| DomainError::Render(e.to_string()))?;
        Ok(buf)
    }
}

fn rgba(color: OverlayColor) -> Rgba<u8> {
    let [r, g, b] = color.rgb();
    Rgba([r, g, b, 255])
}

impl Surface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::new(width, height);
    }

    fn clear(&mut self) {
        for px in self.canvas.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.canvas, image, x, y);
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_font_size(&mut self, px: f32) {
        self.font_px = px;
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: OverlayColor) {
        let (cw, ch) = (i64::from(self.canvas.width()), i64::from(self.canvas.height()));
        if cw == 0 || ch == 0 {
            return;
        }

        // Un ancho o alto negativo describe el mismo rectángulo desde la otra esquina.
        let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
        let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };

        let half = self.line_width / 2.0;
        let thickness = (self.line_width.round().max(1.0) as i64).min(cw.max(ch) + 1);

        // Un borde a más de un trazo fuera del lienzo no se ve: se recorta ahí.
        let clip = |v: f32, size: i64| (v.round() as i64).clamp(-thickness - 1, size + thickness + 1);
        let outer_left = clip(left - half, cw);
        let outer_top = clip(top - half, ch);
        let outer_right = clip(right + half, cw);
        let outer_bottom = clip(bottom + half, ch);

        let px = rgba(color);
        for t in 0..thickness {
            let w = outer_right - outer_left - 2 * t;
            let h = outer_bottom - outer_top - 2 * t;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at((outer_left + t) as i32, (outer_top + t) as i32).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(&mut self.canvas, rect, px);
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: OverlayColor) {
        let Some(font) = self.font.as_ref() else {
            return;
        };
        let scale = PxScale::from(self.font_px);
        let top = y - font.as_scaled(scale).ascent();

        let (w, h) = self.canvas.dimensions();
        let reach = self.font_px * (text.chars().count() as f32 + 1.0);
        if !(x > -reach && x < w as f32 && top > -reach && top < h as f32) {
            return;
        }
        draw_text_mut(&mut self.canvas, rgba(color), x.round() as i32, top.round() as i32, scale, font, text);
    }
}
