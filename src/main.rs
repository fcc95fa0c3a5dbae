//! KeepAwake - evita que Windows entre en reposo
//!
//! Cada 3 minutos mueve el ratón un píxel y lo devuelve a su sitio.
//! Un icono en la bandeja permite ver el estado, abrir la página del
//! proyecto o salir.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![cfg_attr(not(windows), allow(dead_code))]

mod app;
mod config;
mod constants;
mod dispatch;
mod error;
mod event;
mod nudge;
mod platform;
mod text;
mod tray;
mod types;

#[cfg(windows)]
mod win32;

#[cfg(test)]
mod testing;

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigDefaults, Settings};

fn main() -> ExitCode {
    init_logging();

    info!("keep-awake v{} arrancando", env!("CARGO_PKG_VERSION"));

    let settings = Settings::default();
    if let Err(reason) = settings.validate() {
        error!("Configuración inválida: {reason}");
        return ExitCode::FAILURE;
    }

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
fn run(settings: Settings) -> Result<(), error::AppError> {
    win32::run(settings)
}

#[cfg(not(windows))]
fn run(_settings: Settings) -> Result<(), error::AppError> {
    Err(error::AppError::Unsupported("keep-awake solo funciona en Windows"))
}

/// Inicializa `tracing`: `RUST_LOG` si existe, si no `keep_awake=info`
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(ConfigDefaults::LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}
