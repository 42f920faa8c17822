use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::adapters::http::state::HttpState;
use crate::adapters::inference::client::FILE_FIELD;
use crate::domain::errors::DomainError;
use crate::domain::media::SelectedFile;

fn error_response(e: DomainError) -> Response {
    let status = match &e {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Busy | DomainError::NoFileSelected => StatusCode::CONFLICT,
        DomainError::Transport(_) | DomainError::Decode(_) => StatusCode::BAD_GATEWAY,
        DomainError::Render(_) | DomainError::OperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

pub async fn get_session(State(st): State<HttpState>) -> impl IntoResponse {
    Json(st.viewer.session_view().await)
}

/// Toma el primer archivo del formulario. Un formulario sin archivo no cambia nada.
pub async fn select_file(State(st): State<HttpState>, mut multipart: Multipart) -> Response {
    let mut selected = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(DomainError::InvalidInput(format!("multipart: {}", e))),
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let mime = field.content_type().unwrap_or_default().to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return error_response(DomainError::InvalidInput(format!("multipart: {}", e))),
        };

        if name.is_empty() && bytes.is_empty() {
            // Un <input type="file"> vacío envía una parte sin nombre y sin contenido.
            break;
        }
        selected = Some(SelectedFile::new(name, mime, bytes));
        break;
    }

    let Some(file) = selected else {
        debug!("Selección vacía, nada que hacer");
        return Json(st.viewer.session_view().await).into_response();
    };

    match st.viewer.select_file(file).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn start_upload(State(st): State<HttpState>) -> Response {
    match st.viewer.clone().start_upload().await {
        Ok(view) => (StatusCode::ACCEPTED, Json(view)).into_response(),
        Err(e) => {
            warn!("Subida rechazada: {}", e);
            error_response(e)
        }
    }
}

pub async fn acknowledge_notice(State(st): State<HttpState>) -> impl IntoResponse {
    Json(st.viewer.acknowledge_notice().await)
}

pub async fn get_preview(State(st): State<HttpState>, Path(id): Path<u64>) -> Response {
    match st.viewer.preview(id).await {
        Ok(content) => {
            let mime = if content.mime.is_empty() { "application/octet-stream".to_string() } else { content.mime };
            ([(header::CONTENT_TYPE, mime)], content.bytes).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_overlay(State(st): State<HttpState>) -> Response {
    match st.viewer.overlay_png().await {
        Ok(png) => (
            [(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, "no-store")],
            png,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
