//! # Errores del Servidor
//! src/error.rs
//!
//! Errores de infraestructura (sockets, configuración, pool). Los errores de
//! protocolo NO pasan por aquí: el parser los convierte en un `Status` y
//! terminan como una respuesta HTTP normal.

use crate::pool::PoolError;

/// Error de arranque u operación del servidor
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuración inválida (workers = 0, host vacío, etc.)
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

pub type ServerResult<T> = Result<T, ServerError>;
