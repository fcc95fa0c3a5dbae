//! Constantes Windows y IDs de mensajes
//!
//! Los códigos de mensaje se declaran aquí con su valor numérico para que la
//! decodificación de eventos no dependa del crate `windows` y se pueda probar
//! en cualquier plataforma. `win32::window` comprueba en compilación que
//! coinciden con los del SDK.

/// Base de los mensajes privados de la aplicación
pub const WM_USER: u32 = 0x0400;

pub const WM_DESTROY: u32 = 0x0002;
pub const WM_COMMAND: u32 = 0x0111;
pub const WM_TIMER: u32 = 0x0113;

// Notificaciones de ratón que el shell reenvía en el lparam del icono
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONUP: u32 = 0x0205;

/// Mensaje del system tray icon
pub const WM_TRAYICON: u32 = WM_USER + 1;

/// ID del icono en el system tray
pub const TRAY_ICON_ID: u32 = 101;

/// IDs de elementos del menú contextual
pub const IDM_SHOW_STATUS: u16 = 102;
pub const IDM_OPEN_HOME: u16 = 103;
pub const IDM_EXIT: u16 = 104;

/// ID del timer que mueve el ratón
pub const TIMER_NUDGE: usize = 1;
