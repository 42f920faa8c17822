use ab_glyph::FontArc;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use crate::adapters::raster::surface::RasterSurface;
use crate::application::ports::{CanvasPort, RenderedOverlay};
use crate::application::renderer::OverlayRenderer;
use crate::domain::detection::Detection;
use crate::domain::errors::{DomainError, DomainResult};

/// Compone la superposición fuera del runtime async (decodificar y dibujar
/// es trabajo de CPU) y la entrega como PNG.
pub struct RasterCanvas {
    font: Option<FontArc>,
    renderer: OverlayRenderer,
}

impl RasterCanvas {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font, renderer: OverlayRenderer::default() }
    }

    fn compose(&self, image: &[u8], detections: &[Detection]) -> DomainResult<RenderedOverlay> {
        let image = image::load_from_memory(image)
            .map_err(|e| DomainError::Render(format!("no se pudo decodificar la imagen: {}", e)))?
            .to_rgba8();

        let mut surface = RasterSurface::new(self.font.clone());
        self.renderer.render(&mut surface, &image, detections);

        let png = surface.encode_png()?;
        let (width, height) = surface.image().dimensions();
        Ok(RenderedOverlay { width, height, png: Bytes::from(png) })
    }
}

#[async_trait]
impl CanvasPort for RasterCanvas {
    async fn draw_overlay(
        &self,
        image: Bytes,
        detections: Arc<Vec<Detection>>,
    ) -> DomainResult<RenderedOverlay> {
        let canvas = RasterCanvas { font: self.font.clone(), renderer: self.renderer };
        tokio::task::spawn_blocking(move || canvas.compose(&image, &detections))
            .await
            .map_err(|e| DomainError::OperationFailed(format!("tarea de renderizado: {}", e)))?
    }
}
