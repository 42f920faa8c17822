use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

use crate::application::ports::PreviewStorePort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::{PreviewContent, PreviewRef, SelectedFile};

/// Equivalente local de un object URL: guarda el archivo en memoria y lo
/// sirve por id hasta que se libera.
pub struct InMemoryPreviewStore {
    next_id: AtomicU64,
    entries: RwLock<HashMap<u64, PreviewContent>>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self { next_id: AtomicU64::new(1), entries: RwLock::new(HashMap::new()) }
    }

    pub fn live_count(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}

impl Default for InMemoryPreviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreviewStorePort for InMemoryPreviewStore {
    async fn create(&self, file: &SelectedFile) -> DomainResult<PreviewRef> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut entries = self
            .entries
            .write()
            .map_err(|_| DomainError::OperationFailed("Lock de previsualizaciones fallido".into()))?;
        entries.insert(id, PreviewContent { mime: file.mime.clone(), bytes: file.bytes.clone() });
        Ok(PreviewRef { id })
    }

    async fn resolve(&self, preview: PreviewRef) -> DomainResult<PreviewContent> {
        let entries = self
            .entries
            .read()
            .map_err(|_| DomainError::OperationFailed("Lock de previsualizaciones fallido".into()))?;
        entries
            .get(&preview.id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("previsualización {}", preview.id)))
    }

    async fn release(&self, preview: PreviewRef) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.remove(&preview.id).is_some() {
                debug!("Previsualización {} liberada", preview.id);
            }
        }
    }
}
