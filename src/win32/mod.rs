//! Backend Windows: ventana oculta, icono de la bandeja y entrada de ratón

mod desktop;
mod icon;
mod window;

use windows::Win32::Foundation::{HINSTANCE, HWND};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::DestroyWindow;

use tracing::{debug, info};

use crate::app;
use crate::config::Settings;
use crate::error::AppError;
use crate::platform::Platform;
use crate::types::MessageKind;

pub use desktop::Win32Desktop;
use desktop::message_box;
use window::Host;

/// Convierte un `&str` en UTF-16 terminado en nulo
pub fn wide_str(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Arranque Win32: la ventana queda asociada a `host`
struct Win32Platform<'a> {
    host: &'a Host,
}

impl Platform for Win32Platform<'_> {
    type Desktop = Win32Desktop;

    fn create_message_window(&mut self) -> Result<Win32Desktop, AppError> {
        unsafe {
            let instance: HINSTANCE = GetModuleHandleW(None)
                .map_err(|err| AppError::RegisterClass(err.to_string()))?
                .into();

            window::register_window_class(instance)
                .map_err(|err| AppError::RegisterClass(err.to_string()))?;

            let hwnd = window::create_message_window(instance, self.host)
                .map_err(|err| AppError::CreateWindow(err.to_string()))?;

            debug!("Ventana oculta creada");
            Ok(Win32Desktop::new(hwnd))
        }
    }

    fn alert(&mut self, title: &str, text: &str) {
        message_box(None, title, text, MessageKind::Error);
    }
}

/// Ejecuta la aplicación hasta que el usuario elige "Salir"
pub fn run(settings: Settings) -> Result<(), AppError> {
    let host = Box::new(Host::new());
    let mut platform = Win32Platform { host: &host };

    let app = app::launch(&mut platform, settings)?;
    host.install(app);

    window::run_message_loop();

    host.finish();
    if let Some(hwnd) = host.with_app(|app| app.desktop().hwnd()) {
        destroy_window(hwnd);
    }
    info!("Bucle de mensajes terminado");
    Ok(())
}

fn destroy_window(hwnd: HWND) {
    // Puede que WM_DESTROY ya la haya destruido
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}
