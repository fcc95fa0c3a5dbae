//! System tray icon y menú contextual

use tracing::{debug, warn};

use crate::constants::{
    IDM_EXIT, IDM_OPEN_HOME, IDM_SHOW_STATUS, TRAY_ICON_ID, WM_LBUTTONDBLCLK, WM_LBUTTONUP,
    WM_RBUTTONUP, WM_TRAYICON,
};
use crate::platform::NotificationArea;
use crate::text;
use crate::types::Position;

/// Datos con los que se registra el icono en el shell
///
/// La ventana propietaria y el icono los aporta el backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayRegistration {
    pub id: u32,
    pub callback_message: u32,
    pub tooltip: &'static str,
}

impl TrayRegistration {
    pub fn new() -> Self {
        Self {
            id: TRAY_ICON_ID,
            callback_message: WM_TRAYICON,
            tooltip: text::TRAY_TOOLTIP,
        }
    }
}

impl Default for TrayRegistration {
    fn default() -> Self {
        Self::new()
    }
}

/// Comandos del menú contextual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ShowStatus,
    OpenHome,
    Exit,
}

impl MenuCommand {
    pub fn id(self) -> u16 {
        match self {
            Self::ShowStatus => IDM_SHOW_STATUS,
            Self::OpenHome => IDM_OPEN_HOME,
            Self::Exit => IDM_EXIT,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            IDM_SHOW_STATUS => Some(Self::ShowStatus),
            IDM_OPEN_HOME => Some(Self::OpenHome),
            IDM_EXIT => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShowStatus => text::MENU_SHOW_STATUS,
            Self::OpenHome => text::MENU_OPEN_HOME,
            Self::Exit => text::MENU_EXIT,
        }
    }
}

/// Elemento del menú, en orden de aparición
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Command(MenuCommand),
    Separator,
}

pub const TRAY_MENU: [MenuEntry; 4] = [
    MenuEntry::Command(MenuCommand::ShowStatus),
    MenuEntry::Command(MenuCommand::OpenHome),
    MenuEntry::Separator,
    MenuEntry::Command(MenuCommand::Exit),
];

/// Notificación de ratón sobre el icono (LOWORD del lparam)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayNotification {
    RightButtonUp,
    LeftButtonUp,
    LeftDoubleClick,
    Other(u32),
}

impl TrayNotification {
    pub fn from_raw(code: u32) -> Self {
        match code {
            WM_RBUTTONUP => Self::RightButtonUp,
            WM_LBUTTONUP => Self::LeftButtonUp,
            WM_LBUTTONDBLCLK => Self::LeftDoubleClick,
            other => Self::Other(other),
        }
    }

    /// Cualquier clic abre el menú; no se distingue simple de doble
    pub fn opens_menu(self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// Añade el icono al system tray
pub fn register<A: NotificationArea + ?Sized>(area: &mut A, registration: &TrayRegistration) {
    match area.add_tray_icon(registration) {
        Ok(()) => debug!("Icono añadido a la bandeja (id {})", registration.id),
        Err(err) => warn!("No se pudo añadir el icono a la bandeja: {err}"),
    }
}

/// Elimina el icono del system tray
pub fn unregister<A: NotificationArea + ?Sized>(area: &mut A, registration: &TrayRegistration) {
    match area.remove_tray_icon(registration) {
        Ok(()) => debug!("Icono eliminado de la bandeja (id {})", registration.id),
        Err(err) => warn!("No se pudo eliminar el icono de la bandeja: {err}"),
    }
}

/// Muestra el menú contextual en `at`
pub fn show_menu<A: NotificationArea + ?Sized>(area: &mut A, at: Position) {
    area.popup_menu(at, &TRAY_MENU);
}

/// Maneja los mensajes del system tray
pub fn handle_notification<A: NotificationArea + ?Sized>(
    area: &mut A,
    notification: TrayNotification,
) -> bool {
    if !notification.opens_menu() {
        return false;
    }
    let at = area.cursor_position();
    show_menu(area, at);
    true
}
