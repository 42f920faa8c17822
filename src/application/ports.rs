use async_trait::async_trait;
use bytes::Bytes;
use image::RgbaImage;
use std::sync::Arc;

use crate::application::dto::PredictResponse;
use crate::domain::{
    detection::Detection,
    errors::DomainResult,
    labels::OverlayColor,
    media::{PreviewContent, PreviewRef, SelectedFile},
};

#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Sube el archivo al servicio remoto y devuelve la respuesta JSON ya parseada.
    async fn predict(&self, file: &SelectedFile) -> DomainResult<PredictResponse>;
}

#[async_trait]
pub trait PreviewStorePort: Send + Sync {
    async fn create(&self, file: &SelectedFile) -> DomainResult<PreviewRef>;
    async fn resolve(&self, preview: PreviewRef) -> DomainResult<PreviewContent>;
    async fn release(&self, preview: PreviewRef);
}

/// Superposición ya compuesta y codificada para el navegador.
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    pub width: u32,
    pub height: u32,
    pub png: Bytes,
}

#[async_trait]
pub trait CanvasPort: Send + Sync {
    /// Decodifica la imagen original y dibuja encima todas las detecciones.
    async fn draw_overlay(
        &self,
        image: Bytes,
        detections: Arc<Vec<Detection>>,
    ) -> DomainResult<RenderedOverlay>;
}

/// Primitivas 2D mínimas, al estilo de un canvas del navegador.
pub trait Surface {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64);
    fn set_line_width(&mut self, width: f32);
    fn set_font_size(&mut self, px: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: OverlayColor);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: OverlayColor);
}
