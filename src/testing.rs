//! Escritorio falso para los tests: registra cada llamada al sistema

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error::AppError;
use crate::platform::{NotificationArea, Notifier, Platform, PointerInput, Session};
use crate::tray::{MenuEntry, TrayRegistration};
use crate::types::{MessageKind, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    MovePointer(i32, i32),
    AddTrayIcon(u32),
    RemoveTrayIcon(u32),
    PopupMenu(Position, Vec<MenuEntry>),
    SetTimer(usize, Duration),
    KillTimer(usize),
    OpenUrl(String),
    RequestQuit,
}

#[derive(Debug, Default)]
pub struct FakeDesktop {
    pub calls: Vec<Call>,
    /// Posición real del puntero tras los movimientos relativos
    pub pointer: Position,
    /// Lo que devuelve `cursor_position`
    pub cursor: Position,
    pub tray_icons: BTreeSet<u32>,
    pub timers: BTreeSet<usize>,
    pub fail_pointer: bool,
    pub fail_tray: bool,
    pub fail_timer: bool,
    pub fail_url: bool,
    pub notifier: FakeNotifier,
}

impl FakeDesktop {
    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

fn refused(operation: &'static str) -> AppError {
    AppError::os(operation, "rechazado por el escritorio falso")
}

impl PointerInput for FakeDesktop {
    fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<(), AppError> {
        self.calls.push(Call::MovePointer(dx, dy));
        if self.fail_pointer {
            return Err(refused("SendInput"));
        }
        self.pointer = Position::new(
            self.pointer.x.saturating_add(dx),
            self.pointer.y.saturating_add(dy),
        );
        Ok(())
    }
}

impl NotificationArea for FakeDesktop {
    fn add_tray_icon(&mut self, registration: &TrayRegistration) -> Result<(), AppError> {
        self.calls.push(Call::AddTrayIcon(registration.id));
        if self.fail_tray {
            return Err(refused("Shell_NotifyIconW"));
        }
        self.tray_icons.insert(registration.id);
        Ok(())
    }

    fn remove_tray_icon(&mut self, registration: &TrayRegistration) -> Result<(), AppError> {
        self.calls.push(Call::RemoveTrayIcon(registration.id));
        if self.fail_tray {
            return Err(refused("Shell_NotifyIconW"));
        }
        self.tray_icons.remove(&registration.id);
        Ok(())
    }

    fn cursor_position(&self) -> Position {
        self.cursor
    }

    fn popup_menu(&mut self, at: Position, entries: &[MenuEntry]) {
        self.calls.push(Call::PopupMenu(at, entries.to_vec()));
    }
}

impl Session for FakeDesktop {
    type Notifier = FakeNotifier;

    fn set_timer(&mut self, id: usize, period: Duration) -> Result<(), AppError> {
        self.calls.push(Call::SetTimer(id, period));
        if self.fail_timer {
            return Err(refused("SetTimer"));
        }
        self.timers.insert(id);
        Ok(())
    }

    fn kill_timer(&mut self, id: usize) -> Result<(), AppError> {
        self.calls.push(Call::KillTimer(id));
        if self.fail_timer {
            return Err(refused("KillTimer"));
        }
        self.timers.remove(&id);
        Ok(())
    }

    fn notifier(&self) -> FakeNotifier {
        self.notifier.clone()
    }

    fn open_url(&mut self, url: &str) -> Result<(), AppError> {
        self.calls.push(Call::OpenUrl(url.to_string()));
        if self.fail_url {
            return Err(refused("ShellExecuteW"));
        }
        Ok(())
    }

    fn request_quit(&mut self) {
        self.calls.push(Call::RequestQuit);
    }
}

/// Cuadros de mensaje falsos; las copias comparten el registro
#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub shown: Rc<RefCell<Vec<(String, String, MessageKind)>>>,
    /// Se ejecuta "dentro" del bucle modal del cuadro
    while_open: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl FakeNotifier {
    pub fn set_while_open(&self, f: impl Fn() + 'static) {
        *self.while_open.borrow_mut() = Some(Box::new(f));
    }
}

impl fmt::Debug for FakeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeNotifier")
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

impl Notifier for FakeNotifier {
    fn show_message(&self, title: &str, text: &str, kind: MessageKind) {
        self.shown
            .borrow_mut()
            .push((title.to_string(), text.to_string(), kind));
        if let Some(while_open) = self.while_open.borrow().as_ref() {
            while_open();
        }
    }
}

/// Plataforma falsa: puede fallar al crear la ventana
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub fail_window: bool,
    pub windows_created: usize,
    pub alerts: Vec<(String, String)>,
    /// Escritorio que se entrega al crear la ventana
    pub desktop: FakeDesktop,
}

impl Platform for FakePlatform {
    type Desktop = FakeDesktop;

    fn create_message_window(&mut self) -> Result<FakeDesktop, AppError> {
        if self.fail_window {
            return Err(AppError::CreateWindow("rechazado por la plataforma falsa".into()));
        }
        self.windows_created += 1;
        Ok(std::mem::take(&mut self.desktop))
    }

    fn alert(&mut self, title: &str, text: &str) {
        self.alerts.push((title.to_string(), text.to_string()));
    }
}
