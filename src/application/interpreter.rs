use tracing::{info, warn};

use crate::application::dto::PredictResponse;
use crate::domain::session::Interpretation;

/// Decide qué hacer con una respuesta del servicio de inferencia.
///
/// Precedencia: vídeo procesado (`output_path`) > detecciones de imagen
/// (`result`) > nada utilizable.
#[derive(Debug, Clone)]
pub struct ResultInterpreter {
    media_base: String,
}

impl ResultInterpreter {
    pub fn new(media_base: impl Into<String>) -> Self {
        let media_base = media_base.into().trim_end_matches('/').to_string();
        Self { media_base }
    }

    pub fn media_base(&self) -> &str {
        &self.media_base
    }

    pub fn interpret(&self, response: PredictResponse) -> Interpretation {
        if let Some(message) = response.message.as_deref() {
            info!("Servicio de inferencia: {}", message);
        }
        if let Some(error) = response.error.as_deref() {
            warn!(
                detail = response.detail.as_deref().unwrap_or(""),
                "⚠️ El servicio de inferencia devolvió un error: {}", error
            );
        }

        match response.output_path {
            Some(path) if !path.is_empty() => Interpretation::Video {
                url: self.video_url(&path),
                detections: response.result,
            },
            _ => match response.result {
                Some(detections) if !detections.is_empty() => Interpretation::Image { detections },
                _ => Interpretation::Empty,
            },
        }
    }

    fn video_url(&self, path: &str) -> String {
        format!("{}/{}", self.media_base, path.trim_start_matches('/'))
    }
}
