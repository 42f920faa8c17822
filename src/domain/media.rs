use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        let top = mime.split('/').next().unwrap_or_default();
        match top.trim().to_ascii_lowercase().as_str() {
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

/// Archivo elegido por el usuario. El contenido se comparte sin copias
/// entre la sesión, el almacén de previsualizaciones y el cliente HTTP.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { name: name.into(), mime: mime.into(), bytes: bytes.into() }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Handle local que sirve para mostrar el archivo sin pasar por el servicio
/// de inferencia. Hay que liberarlo cuando se sustituye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewRef {
    pub id: u64,
}

impl PreviewRef {
    pub fn url(&self) -> String {
        format!("/api/preview/{}", self.id)
    }
}

/// Contenido resuelto de una previsualización.
#[derive(Debug, Clone)]
pub struct PreviewContent {
    pub mime: String,
    pub bytes: Bytes,
}
