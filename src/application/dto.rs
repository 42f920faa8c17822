use serde::{Deserialize, Serialize};

use crate::domain::{
    detection::Detection,
    media::MediaKind,
    session::{Notice, SessionState},
    summary::DetectionSummary,
};

pub const IDLE_CAPTION: &str = "Upload & Detect";
pub const BUSY_CAPTION: &str = "Processing...";

/// Cuerpo JSON de `POST /predict/`. Todos los campos son opcionales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Detection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeView {
    pub kind: Notice,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadButtonView {
    pub caption: String,
    pub enabled: bool,
}

/// Estado de la superposición respecto a las entradas vigentes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStatus {
    /// No hay imagen con detecciones que dibujar.
    Absent,
    Pending,
    Ready,
    /// La imagen no se pudo decodificar o dibujar; no se reintenta.
    Failed,
}

/// Proyección de la sesión que consume la página.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub busy: bool,
    pub file_name: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub preview_url: Option<String>,
    /// Solo presente cuando hay detecciones.
    pub summary: Option<DetectionSummary>,
    pub detections: Option<Vec<Detection>>,
    /// Presente cuando la superposición de la imagen actual ya está dibujada.
    pub overlay_url: Option<String>,
    pub overlay: OverlayStatus,
    pub video_url: Option<String>,
    pub notice: Option<NoticeView>,
    pub upload: UploadButtonView,
}

impl SessionView {
    pub fn from_state(state: &SessionState, overlay: OverlayStatus) -> Self {
        let file = state.file();
        let detections = state.detections();
        let inputs = state.overlay_inputs();
        let overlay = if inputs.is_some() { overlay } else { OverlayStatus::Absent };
        let overlay_url = inputs
            .filter(|_| overlay == OverlayStatus::Ready)
            .map(|inputs| format!("/api/overlay.png?preview={}&rev={}", inputs.preview.id, inputs.revision));

        Self {
            busy: state.is_busy(),
            file_name: file.map(|f| f.name.clone()),
            media_kind: file.map(|f| f.kind()),
            preview_url: state.preview().map(|p| p.url()),
            summary: detections.map(DetectionSummary::from_detections),
            detections: detections.map(<[Detection]>::to_vec),
            overlay_url,
            overlay,
            video_url: state.video_url().map(str::to_owned),
            notice: state.notice().map(|kind| NoticeView { kind, message: kind.message().to_owned() }),
            upload: UploadButtonView {
                caption: (if state.is_busy() { BUSY_CAPTION } else { IDLE_CAPTION }).to_owned(),
                enabled: state.can_upload(),
            },
        }
    }
}
