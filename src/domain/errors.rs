use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No encontrado: {0}")]
    NotFound(String),
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),
    #[error("Ya hay una petición de inferencia en curso")]
    Busy,
    #[error("No hay ningún archivo seleccionado")]
    NoFileSelected,
    #[error("Fallo de transporte: {0}")]
    Transport(String),
    #[error("Respuesta no decodificable: {0}")]
    Decode(String),
    #[error("Error de renderizado: {0}")]
    Render(String),
    #[error("Error de operación: {0}")]
    OperationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
