//! Implementación de los servicios del sistema con la API Win32

use std::time::Duration;

use tracing::warn;
use windows::core::*;
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_MOVE, MOUSEINPUT,
};
use windows::Win32::UI::Shell::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::icon::{create_tray_icon, stock_icon};
use super::wide_str;
use crate::error::AppError;
use crate::platform::{NotificationArea, Notifier, PointerInput, Session};
use crate::tray::{MenuEntry, TrayRegistration};
use crate::types::{MessageKind, Position};

/// Servicios del sistema ligados a la ventana oculta
pub struct Win32Desktop {
    hwnd: HWND,
    icon: Option<HICON>,
}

impl Win32Desktop {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd, icon: None }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn notify_icon_data(&self, registration: &TrayRegistration) -> NOTIFYICONDATAW {
        NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: registration.id,
            ..Default::default()
        }
    }

    fn destroy_icon(&mut self) {
        if let Some(icon) = self.icon.take() {
            unsafe {
                let _ = DestroyIcon(icon);
            }
        }
    }
}

impl Drop for Win32Desktop {
    fn drop(&mut self) {
        self.destroy_icon();
    }
}

impl PointerInput for Win32Desktop {
    fn move_pointer(&mut self, dx: i32, dy: i32) -> std::result::Result<(), AppError> {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    dwFlags: MOUSEEVENTF_MOVE,
                    ..Default::default()
                },
            },
        };

        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 1 {
            Ok(())
        } else {
            Err(AppError::last_os_error("SendInput"))
        }
    }
}

impl NotificationArea for Win32Desktop {
    fn add_tray_icon(&mut self, registration: &TrayRegistration) -> std::result::Result<(), AppError> {
        self.destroy_icon();
        let icon = match create_tray_icon() {
            Ok(icon) => {
                self.icon = Some(icon);
                icon
            }
            Err(err) => {
                warn!("No se pudo dibujar el icono, se usa el estándar: {err}");
                stock_icon()
            }
        };

        let mut nid = NOTIFYICONDATAW {
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: registration.callback_message,
            hIcon: icon,
            ..self.notify_icon_data(registration)
        };

        // Tooltip (truncado al tamaño del buffer, dejando el terminador)
        let tooltip: Vec<u16> = registration.tooltip.encode_utf16().collect();
        let copy_len = tooltip.len().min(nid.szTip.len() - 1);
        nid.szTip[..copy_len].copy_from_slice(&tooltip[..copy_len]);

        if unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
            Ok(())
        } else {
            Err(AppError::os("Shell_NotifyIconW(NIM_ADD)", "el shell rechazó el icono"))
        }
    }

    fn remove_tray_icon(&mut self, registration: &TrayRegistration) -> std::result::Result<(), AppError> {
        let nid = self.notify_icon_data(registration);
        let removed = unsafe { Shell_NotifyIconW(NIM_DELETE, &nid) }.as_bool();
        self.destroy_icon();

        if removed {
            Ok(())
        } else {
            Err(AppError::os("Shell_NotifyIconW(NIM_DELETE)", "el icono no estaba registrado"))
        }
    }

    fn cursor_position(&self) -> Position {
        let mut pt = POINT::default();
        unsafe {
            let _ = GetCursorPos(&mut pt);
        }
        Position::from(pt)
    }

    fn popup_menu(&mut self, at: Position, entries: &[MenuEntry]) {
        unsafe {
            let hmenu = match CreatePopupMenu() {
                Ok(hmenu) => hmenu,
                Err(err) => {
                    warn!("No se pudo crear el menú: {err}");
                    return;
                }
            };

            for entry in entries {
                match entry {
                    MenuEntry::Command(command) => {
                        let label = wide_str(command.label());
                        let _ = AppendMenuW(
                            hmenu,
                            MF_STRING,
                            usize::from(command.id()),
                            PCWSTR::from_raw(label.as_ptr()),
                        );
                    }
                    MenuEntry::Separator => {
                        let _ = AppendMenuW(hmenu, MF_SEPARATOR, 0, PCWSTR::null());
                    }
                }
            }

            // Hacer que la ventana sea foreground para que el menú se cierre correctamente
            let _ = SetForegroundWindow(self.hwnd);

            let _ = TrackPopupMenu(
                hmenu,
                TPM_RIGHTBUTTON | TPM_BOTTOMALIGN | TPM_LEFTALIGN,
                at.x,
                at.y,
                0,
                self.hwnd,
                None,
            );

            // KB135788: sin esto el menú no vuelve a abrirse a la primera
            let _ = PostMessageW(self.hwnd, WM_NULL, WPARAM(0), LPARAM(0));

            let _ = DestroyMenu(hmenu);
        }
    }
}

/// Cuadros de mensaje sin propietario, como la alerta de arranque
#[derive(Debug, Clone, Copy)]
pub struct Win32Notifier;

impl Notifier for Win32Notifier {
    fn show_message(&self, title: &str, text: &str, kind: MessageKind) {
        message_box(None, title, text, kind);
    }
}

impl Session for Win32Desktop {
    type Notifier = Win32Notifier;

    fn set_timer(&mut self, id: usize, period: Duration) -> std::result::Result<(), AppError> {
        let elapse = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        if unsafe { SetTimer(self.hwnd, id, elapse, None) } == 0 {
            Err(AppError::last_os_error("SetTimer"))
        } else {
            Ok(())
        }
    }

    fn kill_timer(&mut self, id: usize) -> std::result::Result<(), AppError> {
        unsafe { KillTimer(self.hwnd, id) }.map_err(|err| AppError::from_win32("KillTimer", err))
    }

    fn notifier(&self) -> Win32Notifier {
        Win32Notifier
    }

    fn open_url(&mut self, url: &str) -> std::result::Result<(), AppError> {
        let file = wide_str(url);
        let result = unsafe {
            ShellExecuteW(
                None,
                w!("open"),
                PCWSTR::from_raw(file.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };

        // Valores <= 32 son códigos de error
        if result.0 as isize > 32 {
            Ok(())
        } else {
            Err(AppError::os("ShellExecuteW", format!("código {}", result.0 as isize)))
        }
    }

    fn request_quit(&mut self) {
        unsafe { PostQuitMessage(0) };
    }
}

/// Cuadro de mensaje bloqueante
pub fn message_box(owner: Option<HWND>, title: &str, text: &str, kind: MessageKind) {
    let style = match kind {
        MessageKind::Information => MB_OK | MB_ICONINFORMATION,
        MessageKind::Error => MB_OK | MB_ICONERROR,
    };
    let title = wide_str(title);
    let text = wide_str(text);
    unsafe {
        let _ = MessageBoxW(
            owner.unwrap_or_default(),
            PCWSTR::from_raw(text.as_ptr()),
            PCWSTR::from_raw(title.as_ptr()),
            style,
        );
    }
}
