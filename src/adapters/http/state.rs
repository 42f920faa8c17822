use std::sync::Arc;
use crate::application::services::ViewerService;

/// Estado compartido para los manejadores HTTP de Axum.
/// Siguiendo la Arquitectura Hexagonal, el estado contiene el servicio (Caso de Uso).
#[derive(Clone)]
pub struct HttpState {
    /// Sesión del visor: selección, subida y superposición.
    pub viewer: Arc<ViewerService>,
}
