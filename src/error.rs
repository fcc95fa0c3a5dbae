//! Errores de la aplicación

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no se pudo registrar la clase de ventana: {0}")]
    RegisterClass(String),

    #[error("no se pudo crear la ventana oculta: {0}")]
    CreateWindow(String),

    /// Fallo de una llamada al sistema que no es fatal
    #[error("{operation} falló: {message}")]
    Os {
        operation: &'static str,
        message: String,
    },

    #[error("plataforma no soportada: {0}")]
    Unsupported(&'static str),
}

impl AppError {
    pub fn os(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Os {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(windows)]
impl AppError {
    /// Construye un `Os` a partir del último error de Win32
    pub fn last_os_error(operation: &'static str) -> Self {
        Self::from_win32(operation, windows::core::Error::from_win32())
    }

    pub fn from_win32(operation: &'static str, err: windows::core::Error) -> Self {
        Self::os(operation, err.to_string())
    }
}
