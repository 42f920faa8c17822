use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{
    detection::Detection,
    errors::{DomainError, DomainResult},
    media::{PreviewRef, SelectedFile},
};

/// Aviso visible para el usuario pendiente de confirmar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    NoDetections,
    UploadFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::NoDetections => "No detections found.",
            Notice::UploadFailed => "Failed to send to the server.",
        }
    }
}

/// Clasificación de una respuesta del servicio de inferencia.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// Vídeo procesado; las detecciones pueden faltar.
    Video { url: String, detections: Option<Vec<Detection>> },
    /// Detecciones sobre la imagen seleccionada.
    Image { detections: Vec<Detection> },
    Empty,
}

/// Permiso para lanzar una petición, ligado a la selección que la originó.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub generation: u64,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadResolution {
    Video { released: Option<PreviewRef> },
    Image { count: usize },
    NoDetections,
    Failed,
    /// El usuario eligió otro archivo mientras la petición estaba en vuelo.
    Stale,
}

/// Lo que necesita el renderizador: imagen + detecciones vigentes.
#[derive(Debug, Clone)]
pub struct OverlayInputs {
    pub preview: PreviewRef,
    pub detections: Arc<Vec<Detection>>,
    pub revision: u64,
}

impl OverlayInputs {
    pub fn key(&self) -> OverlayKey {
        OverlayKey { preview: self.preview, revision: self.revision }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayKey {
    pub preview: PreviewRef,
    pub revision: u64,
}

/// Estado mutable de una sesión de usuario. Todas las transiciones pasan por
/// aquí para que la exclusión previsualización/vídeo se mantenga en un único sitio.
#[derive(Debug, Default)]
pub struct SessionState {
    file: Option<SelectedFile>,
    preview: Option<PreviewRef>,
    detections: Option<Arc<Vec<Detection>>>,
    detections_revision: u64,
    video_url: Option<String>,
    busy: bool,
    notice: Option<Notice>,
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<PreviewRef> {
        self.preview
    }

    pub fn detections(&self) -> Option<&[Detection]> {
        self.detections.as_deref().map(Vec::as_slice)
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn detections_revision(&self) -> u64 {
        self.detections_revision
    }

    pub fn can_upload(&self) -> bool {
        self.file.is_some() && !self.busy
    }

    /// Nueva selección: limpia detecciones y vídeo anteriores. Devuelve la
    /// previsualización sustituida para que el llamador la libere.
    pub fn select_file(&mut self, file: SelectedFile, preview: PreviewRef) -> Option<PreviewRef> {
        self.file = Some(file);
        self.set_detections(None);
        self.video_url = None;
        self.notice = None;
        self.generation += 1;
        self.preview.replace(preview)
    }

    pub fn begin_upload(&mut self) -> DomainResult<UploadTicket> {
        let file = self.file.clone().ok_or(DomainError::NoFileSelected)?;
        if self.busy {
            return Err(DomainError::Busy);
        }
        self.busy = true;
        Ok(UploadTicket { generation: self.generation, file })
    }

    /// Cierra un ciclo de subida. `busy` se limpia siempre; el resultado solo
    /// se aplica si el ticket corresponde a la selección vigente.
    pub fn finish_upload(
        &mut self,
        ticket: &UploadTicket,
        outcome: DomainResult<Interpretation>,
    ) -> UploadResolution {
        self.busy = false;

        if ticket.generation != self.generation {
            return UploadResolution::Stale;
        }

        match outcome {
            Ok(Interpretation::Video { url, detections }) => {
                self.video_url = Some(url);
                self.set_detections(detections);
                UploadResolution::Video { released: self.preview.take() }
            }
            Ok(Interpretation::Image { detections }) => {
                let count = detections.len();
                self.set_detections(Some(detections));
                UploadResolution::Image { count }
            }
            Ok(Interpretation::Empty) => {
                self.notice = Some(Notice::NoDetections);
                UploadResolution::NoDetections
            }
            Err(_) => {
                self.notice = Some(Notice::UploadFailed);
                UploadResolution::Failed
            }
        }
    }

    pub fn acknowledge_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn overlay_inputs(&self) -> Option<OverlayInputs> {
        match (self.preview, &self.detections) {
            (Some(preview), Some(detections)) => Some(OverlayInputs {
                preview,
                detections: Arc::clone(detections),
                revision: self.detections_revision,
            }),
            _ => None,
        }
    }

    /// Fin de sesión: entrega la previsualización viva para liberarla.
    pub fn end(&mut self) -> Option<PreviewRef> {
        self.file = None;
        self.set_detections(None);
        self.video_url = None;
        self.preview.take()
    }

    fn set_detections(&mut self, detections: Option<Vec<Detection>>) {
        self.detections = detections.map(Arc::new);
        self.detections_revision += 1;
    }
}
