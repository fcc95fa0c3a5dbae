//! Servicios del sistema operativo que usa la aplicación
//!
//! `win32::Win32Desktop` los implementa con la API de Windows; los tests usan
//! un escritorio falso que registra las llamadas.

use std::time::Duration;

use crate::error::AppError;
use crate::tray::{MenuEntry, TrayRegistration};
use crate::types::{MessageKind, Position};

/// Entrada sintética de ratón
pub trait PointerInput {
    /// Mueve el puntero de forma relativa sin pulsar ningún botón
    fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<(), AppError>;
}

/// Área de notificación del shell y su menú contextual
pub trait NotificationArea {
    fn add_tray_icon(&mut self, registration: &TrayRegistration) -> Result<(), AppError>;

    fn remove_tray_icon(&mut self, registration: &TrayRegistration) -> Result<(), AppError>;

    fn cursor_position(&self) -> Position;

    /// Muestra un menú temporal en `at` y bloquea hasta que se cierra.
    /// La selección llega después como evento de comando.
    fn popup_menu(&mut self, at: Position, entries: &[MenuEntry]);
}

/// Cuadros de mensaje bloqueantes
///
/// Se muestran sin tener prestada la aplicación: el bucle modal del cuadro
/// sigue entregando ticks a la ventana.
pub trait Notifier {
    fn show_message(&self, title: &str, text: &str, kind: MessageKind);
}

/// Timer, diálogos, lanzador de URLs y fin del bucle de mensajes
pub trait Session {
    type Notifier: Notifier;

    fn set_timer(&mut self, id: usize, period: Duration) -> Result<(), AppError>;

    fn kill_timer(&mut self, id: usize) -> Result<(), AppError>;

    /// Manejador independiente de `self` para mostrar mensajes
    fn notifier(&self) -> Self::Notifier;

    fn open_url(&mut self, url: &str) -> Result<(), AppError>;

    /// Pide al bucle de mensajes que termine
    fn request_quit(&mut self);
}

/// Todo lo que la ventana oculta necesita del sistema
pub trait Desktop: PointerInput + NotificationArea + Session {}

impl<T: PointerInput + NotificationArea + Session> Desktop for T {}

/// Creación de la ventana oculta durante el arranque
pub trait Platform {
    type Desktop: Desktop;

    /// Registra la clase y crea la ventana que recibe los mensajes
    fn create_message_window(&mut self) -> Result<Self::Desktop, AppError>;

    /// Alerta bloqueante cuando todavía no existe ventana
    fn alert(&mut self, title: &str, text: &str);
}
