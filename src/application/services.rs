use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::{
    application::{
        dto::{OverlayStatus, SessionView},
        interpreter::ResultInterpreter,
        ports::{CanvasPort, InferencePort, PreviewStorePort, RenderedOverlay},
    },
    domain::{
        errors::{DomainError, DomainResult},
        media::{PreviewContent, PreviewRef, SelectedFile},
        session::{OverlayKey, SessionState, UploadResolution, UploadTicket},
        summary::summarize_detections,
    },
};

/// Último intento de dibujo. Un fallo también se recuerda por clave para no
/// reintentar con las mismas entradas.
enum OverlaySlot {
    Empty,
    Ready { key: OverlayKey, rendered: RenderedOverlay },
    Failed(OverlayKey),
}

impl OverlaySlot {
    fn status_for(&self, current: Option<OverlayKey>) -> OverlayStatus {
        match (self, current) {
            (_, None) => OverlayStatus::Absent,
            (Self::Ready { key, .. }, Some(current)) if *key == current => OverlayStatus::Ready,
            (Self::Failed(key), Some(current)) if *key == current => OverlayStatus::Failed,
            _ => OverlayStatus::Pending,
        }
    }

    fn is_settled(&self, current: OverlayKey) -> bool {
        match self {
            Self::Ready { key, .. } | Self::Failed(key) => *key == current,
            Self::Empty => false,
        }
    }
}

/// Orquestador del visor: selección de archivo, subida al servicio de
/// inferencia y redibujado de la superposición.
///
/// Toda mutación de la sesión ocurre con el `Mutex` tomado, así que los
/// manejadores nunca se intercalan. Tras cada mutación se evalúa la regla
/// "si cambian previsualización o detecciones, redibujar".
pub struct ViewerService {
    inference: Arc<dyn InferencePort>,
    previews: Arc<dyn PreviewStorePort>,
    canvas: Arc<dyn CanvasPort>,
    interpreter: ResultInterpreter,
    session: Mutex<SessionState>,
    overlay: RwLock<OverlaySlot>,
}

impl ViewerService {
    pub fn new(
        inference: Arc<dyn InferencePort>,
        previews: Arc<dyn PreviewStorePort>,
        canvas: Arc<dyn CanvasPort>,
        interpreter: ResultInterpreter,
    ) -> Self {
        Self {
            inference,
            previews,
            canvas,
            interpreter,
            session: Mutex::new(SessionState::new()),
            overlay: RwLock::new(OverlaySlot::Empty),
        }
    }

    /// Nueva selección del usuario. Limpia resultados anteriores antes de
    /// que se envíe ninguna petición.
    pub async fn select_file(&self, file: SelectedFile) -> DomainResult<SessionView> {
        let preview = self.previews.create(&file).await?;
        info!(
            "📁 Archivo seleccionado: {} ({}, {} bytes) -> {}",
            file.name,
            file.mime,
            file.len(),
            preview.url()
        );

        let superseded = self.session.lock().await.select_file(file, preview);
        if let Some(old) = superseded {
            self.previews.release(old).await;
        }

        self.refresh_overlay().await;
        Ok(self.session_view().await)
    }

    /// Lanza el ciclo de subida en segundo plano y devuelve el estado con
    /// `busy = true`. La página consulta la sesión hasta que termina.
    pub async fn start_upload(self: Arc<Self>) -> DomainResult<SessionView> {
        let ticket = self.session.lock().await.begin_upload()?;
        let svc = Arc::clone(&self);
        tokio::spawn(async move {
            svc.run_upload(ticket).await;
        });
        Ok(self.session_view().await)
    }

    /// Ciclo completo de subida, esperando a que termine.
    pub async fn upload(&self) -> DomainResult<UploadResolution> {
        let ticket = self.session.lock().await.begin_upload()?;
        Ok(self.run_upload(ticket).await)
    }

    async fn run_upload(&self, ticket: UploadTicket) -> UploadResolution {
        info!("📤 Enviando {} al servicio de inferencia...", ticket.file.name);

        let outcome = self
            .inference
            .predict(&ticket.file)
            .await
            .map(|response| self.interpreter.interpret(response));

        if let Err(e) = &outcome {
            error!("❌ Error enviando al servidor: {}", e);
        }

        let resolution = self.session.lock().await.finish_upload(&ticket, outcome);

        match &resolution {
            UploadResolution::Video { released } => {
                info!("🎬 Vídeo procesado disponible");
                if let Some(preview) = released {
                    self.previews.release(*preview).await;
                }
            }
            UploadResolution::Image { count } => {
                let summary = {
                    let session = self.session.lock().await;
                    session.detections().map(summarize_detections).unwrap_or_default()
                };
                info!("✅ {} detecciones recibidas: {}", count, summary);
            }
            UploadResolution::NoDetections => info!("Sin resultados de detección"),
            UploadResolution::Failed => {}
            UploadResolution::Stale => {
                warn!("Respuesta descartada: el usuario seleccionó otro archivo mientras tanto")
            }
        }

        self.refresh_overlay().await;
        resolution
    }

    /// Regla de redibujado: si hay previsualización y detecciones y no
    /// coinciden con lo último dibujado, se vuelve a componer todo.
    async fn refresh_overlay(&self) {
        let inputs = self.session.lock().await.overlay_inputs();

        let Some(inputs) = inputs else {
            *self.overlay.write().await = OverlaySlot::Empty;
            return;
        };

        let key = inputs.key();
        if self.overlay.read().await.is_settled(key) {
            return;
        }

        let drawn = match self.previews.resolve(inputs.preview).await {
            Ok(content) => self.canvas.draw_overlay(content.bytes, inputs.detections).await,
            Err(e) => Err(e),
        };

        // Las entradas pueden haber cambiado mientras se decodificaba.
        let session = self.session.lock().await;
        if session.overlay_inputs().map(|i| i.key()) != Some(key) {
            debug!("Superposición descartada: las entradas cambiaron");
            return;
        }

        let slot = match drawn {
            Ok(rendered) => {
                debug!("Superposición {}x{} lista", rendered.width, rendered.height);
                OverlaySlot::Ready { key, rendered }
            }
            Err(e) => {
                // La superposición simplemente no aparece; la anterior tampoco.
                warn!("⚠️ No se pudo dibujar la superposición de {}: {}", inputs.preview.url(), e);
                OverlaySlot::Failed(key)
            }
        };
        *self.overlay.write().await = slot;
    }

    pub async fn session_view(&self) -> SessionView {
        let session = self.session.lock().await;
        let current = session.overlay_inputs().map(|i| i.key());
        let status = self.overlay.read().await.status_for(current);
        SessionView::from_state(&session, status)
    }

    pub async fn acknowledge_notice(&self) -> SessionView {
        self.session.lock().await.acknowledge_notice();
        self.session_view().await
    }

    pub async fn preview(&self, id: u64) -> DomainResult<PreviewContent> {
        self.previews.resolve(PreviewRef { id }).await
    }

    pub async fn overlay_png(&self) -> DomainResult<Bytes> {
        match &*self.overlay.read().await {
            OverlaySlot::Ready { rendered, .. } => Ok(rendered.png.clone()),
            _ => Err(DomainError::NotFound("overlay".into())),
        }
    }

    /// Libera la previsualización viva al cerrar la sesión.
    pub async fn shutdown(&self) {
        let preview = self.session.lock().await.end();
        if let Some(preview) = preview {
            self.previews.release(preview).await;
        }
        *self.overlay.write().await = OverlaySlot::Empty;
        info!("Sesión cerrada");
    }
}
