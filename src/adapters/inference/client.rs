use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::application::dto::PredictResponse;
use crate::application::ports::InferencePort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::SelectedFile;

/// Nombre del campo multipart que espera el servicio.
pub const FILE_FIELD: &str = "file";

/// Cliente HTTP del servicio de inferencia (`POST /predict/`).
///
/// Sin reintentos ni timeout: una petición colgada deja la sesión ocupada.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInferenceClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form_for(file: &SelectedFile) -> DomainResult<Form> {
        let mime = if file.mime.trim().is_empty() { "application/octet-stream" } else { file.mime.as_str() };
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(mime)
            .map_err(|e| DomainError::InvalidInput(format!("tipo MIME inválido {}: {}", mime, e)))?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait]
impl InferencePort for HttpInferenceClient {
    async fn predict(&self, file: &SelectedFile) -> DomainResult<PredictResponse> {
        let form = Self::form_for(file)?;

        let res = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        // No se comprueba el status: los cuerpos de error también son JSON.
        let status = res.status();
        let body = res.bytes().await.map_err(|e| DomainError::Transport(e.to_string()))?;
        debug!("Respuesta de {}: HTTP {} ({} bytes)", self.endpoint, status, body.len());

        serde_json::from_slice::<PredictResponse>(&body)
            .map_err(|e| DomainError::Decode(format!("HTTP {}: {}", status, e)))
    }
}
