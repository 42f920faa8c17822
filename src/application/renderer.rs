use image::RgbaImage;

use crate::application::ports::Surface;
use crate::domain::{detection::Detection, labels::color_for_label};

/// Dibuja la imagen original y las cajas de detección sobre una `Surface`.
/// Cada llamada redibuja todo desde una superficie limpia.
#[derive(Debug, Clone, Copy)]
pub struct OverlayRenderer {
    pub line_width: f32,
    pub font_px: f32,
    /// Distancia vertical entre el borde inferior de la caja y la línea base del texto.
    pub label_offset: f32,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self { line_width: 2.0, font_px: 14.0, label_offset: 15.0 }
    }
}

impl OverlayRenderer {
    pub fn render<S: Surface>(&self, surface: &mut S, image: &RgbaImage, detections: &[Detection]) {
        surface.resize(image.width(), image.height());
        surface.clear();
        surface.draw_image(image, 0, 0);

        surface.set_line_width(self.line_width);
        surface.set_font_size(self.font_px);

        for det in detections {
            let label = det.label();
            let color = color_for_label(&label);
            let bbox = det.bounding_box();

            surface.stroke_rect(bbox.x1, bbox.y1, bbox.width(), bbox.height(), color);
            surface.fill_text(&label, bbox.x1, bbox.y2 + self.label_offset, color);
        }
    }
}
