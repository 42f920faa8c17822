use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_INFERENCE_URL: &str = "http://127.0.0.1:8000/predict/";
pub const DEFAULT_MEDIA_BASE: &str = "http://localhost:3000";

/// Visor local de detecciones: sube una imagen o vídeo al servicio YOLO y
/// muestra las cajas devueltas.
#[derive(Debug, Clone, Parser)]
#[command(name = "detection-viewer", version, about)]
pub struct ViewerConfig {
    /// Dirección en la que escucha el panel
    #[arg(long, env = "VIEWER_BIND", default_value = "127.0.0.1:8090")]
    pub bind: SocketAddr,

    /// Endpoint de inferencia que recibe la subida multipart
    #[arg(long, env = "VIEWER_INFERENCE_URL", default_value = DEFAULT_INFERENCE_URL)]
    pub inference_url: String,

    /// URL base que sirve los vídeos procesados
    #[arg(long, env = "VIEWER_MEDIA_BASE", default_value = DEFAULT_MEDIA_BASE)]
    pub media_base: String,

    /// Directorio con la página del panel
    #[arg(long, env = "VIEWER_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Fuente TrueType de las etiquetas (si falta, se prueban las del sistema)
    #[arg(long, env = "VIEWER_FONT")]
    pub font: Option<PathBuf>,

    /// Tamaño máximo de subida aceptado, en MiB
    #[arg(long, env = "VIEWER_MAX_UPLOAD_MB", default_value_t = 512)]
    pub max_upload_mb: usize,
}

impl ViewerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
