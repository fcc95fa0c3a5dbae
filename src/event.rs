//! Eventos que recibe la ventana oculta

use crate::constants::{WM_COMMAND, WM_DESTROY, WM_TIMER, WM_TRAYICON};
use crate::tray::{MenuCommand, TrayNotification};

/// Mensaje de Windows ya clasificado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// `WM_TIMER` con el id del timer
    Tick(usize),
    TrayInteraction(TrayNotification),
    CommandSelected(MenuCommand),
    DestroyRequested,
    /// Cualquier otro mensaje: lo procesa `DefWindowProcW`
    Passthrough,
}

/// Qué debe devolver el procedimiento de ventana
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Handled,
    Default,
}

impl AppEvent {
    pub fn decode(msg: u32, wparam: usize, lparam: isize) -> Self {
        match msg {
            WM_TIMER => Self::Tick(wparam),
            WM_TRAYICON => Self::TrayInteraction(TrayNotification::from_raw(u32::from(loword(
                lparam as usize,
            )))),
            WM_COMMAND => match MenuCommand::from_id(loword(wparam)) {
                Some(command) => Self::CommandSelected(command),
                None => Self::Passthrough,
            },
            WM_DESTROY => Self::DestroyRequested,
            _ => Self::Passthrough,
        }
    }
}

#[inline]
fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}
