//! Ventana oculta que recibe el timer y los mensajes del icono

use std::ffi::c_void;

use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::desktop::Win32Desktop;
use crate::constants;
use crate::dispatch::Dispatcher;
use crate::event::{AppEvent, Disposition};

// Los códigos que decodifica `AppEvent` deben ser los del SDK
const _: () = {
    assert!(constants::WM_USER == WM_USER);
    assert!(constants::WM_DESTROY == WM_DESTROY);
    assert!(constants::WM_COMMAND == WM_COMMAND);
    assert!(constants::WM_TIMER == WM_TIMER);
    assert!(constants::WM_LBUTTONUP == WM_LBUTTONUP);
    assert!(constants::WM_LBUTTONDBLCLK == WM_LBUTTONDBLCLK);
    assert!(constants::WM_RBUTTONUP == WM_RBUTTONUP);
};

pub type Host = Dispatcher<Win32Desktop>;

/// Registra la clase de la ventana oculta
pub unsafe fn register_window_class(instance: HINSTANCE) -> Result<()> {
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        lpfnWndProc: Some(window_proc),
        hInstance: instance,
        lpszClassName: w!("KeepAwakeTrayClass"),
        ..Default::default()
    };

    if RegisterClassExW(&wc) == 0 {
        return Err(Error::from_win32());
    }

    Ok(())
}

/// Crea la ventana oculta (WS_POPUP sin mostrar, fuera de la barra de tareas)
///
/// `host` queda asociado a la ventana y debe vivir más que ella.
pub unsafe fn create_message_window(instance: HINSTANCE, host: &Host) -> Result<HWND> {
    CreateWindowExW(
        WS_EX_TOOLWINDOW,
        w!("KeepAwakeTrayClass"),
        w!("KeepAwakeTrayWnd"),
        WS_POPUP,
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        None,
        None,
        instance,
        Some(host as *const Host as *const c_void),
    )
}

/// Bucle de mensajes; vuelve con WM_QUIT o si GetMessageW falla
pub fn run_message_loop() {
    let mut msg = MSG::default();
    unsafe {
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 == 0 || ret.0 == -1 {
                break;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

// `SetWindowLongPtrW` solo existe en 64 bits; en 32 bits el puntero cabe en
// `SetWindowLongW`
#[cfg(target_pointer_width = "64")]
unsafe fn set_host_ptr(hwnd: HWND, host: *const Host) {
    SetWindowLongPtrW(hwnd, GWLP_USERDATA, host as isize);
}

#[cfg(target_pointer_width = "32")]
unsafe fn set_host_ptr(hwnd: HWND, host: *const Host) {
    SetWindowLongW(hwnd, GWLP_USERDATA, host as i32);
}

#[cfg(target_pointer_width = "64")]
unsafe fn host_ptr(hwnd: HWND) -> *const Host {
    GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const Host
}

#[cfg(target_pointer_width = "32")]
unsafe fn host_ptr(hwnd: HWND) -> *const Host {
    GetWindowLongW(hwnd, GWLP_USERDATA) as *const Host
}

/// Procedimiento de ventana (maneja mensajes de Windows)
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        let create = &*(lparam.0 as *const CREATESTRUCTW);
        set_host_ptr(hwnd, create.lpCreateParams as *const Host);
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    let host = host_ptr(hwnd);
    if host.is_null() {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    if msg == WM_NCDESTROY {
        set_host_ptr(hwnd, std::ptr::null());
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    match (*host).dispatch(AppEvent::decode(msg, wparam.0, lparam.0)) {
        Disposition::Handled => LRESULT(0),
        Disposition::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
