//! Icono de la bandeja dibujado en tiempo de ejecución

use windows::core::*;
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::UI::WindowsAndMessaging::*;

const ICON_SIZE: i32 = 16;

/// Crea el icono de la bandeja. El llamador debe liberarlo con `DestroyIcon`
pub fn create_tray_icon() -> Result<HICON> {
    unsafe { create_embedded_icon() }
}

/// Icono estándar de aplicación (compartido, no se libera)
pub fn stock_icon() -> HICON {
    unsafe { LoadIconW(None, IDI_APPLICATION).unwrap_or_default() }
}

/// Dibuja un ojo abierto: círculo ámbar con iris blanco y pupila oscura
unsafe fn create_embedded_icon() -> Result<HICON> {
    let screen_dc = GetDC(None);
    if screen_dc.is_invalid() {
        return Err(Error::from_win32());
    }

    let icon_dc = CreateCompatibleDC(screen_dc);
    let mask_dc = CreateCompatibleDC(screen_dc);

    if icon_dc.is_invalid() || mask_dc.is_invalid() {
        let _ = ReleaseDC(None, screen_dc);
        return Err(Error::from_win32());
    }

    let icon_bitmap = CreateCompatibleBitmap(screen_dc, ICON_SIZE, ICON_SIZE);
    let mask_bitmap = CreateCompatibleBitmap(screen_dc, ICON_SIZE, ICON_SIZE);

    if icon_bitmap.is_invalid() || mask_bitmap.is_invalid() {
        let _ = DeleteDC(icon_dc);
        let _ = DeleteDC(mask_dc);
        let _ = ReleaseDC(None, screen_dc);
        return Err(Error::from_win32());
    }

    let old_icon_bmp = SelectObject(icon_dc, icon_bitmap);
    let old_mask_bmp = SelectObject(mask_dc, mask_bitmap);

    let rect = RECT {
        left: 0,
        top: 0,
        right: ICON_SIZE,
        bottom: ICON_SIZE,
    };

    // Máscara: blanco = transparente, negro = opaco
    fill(mask_dc, &rect, 0x00FFFFFF);
    ellipse(mask_dc, 0x00000000, 0, 0, ICON_SIZE, ICON_SIZE);

    fill(icon_dc, &rect, 0x00FFFFFF);
    ellipse(icon_dc, 0x0000A5FF, 0, 0, ICON_SIZE, ICON_SIZE); // Ámbar (BGR)
    ellipse(icon_dc, 0x00FFFFFF, 2, 5, ICON_SIZE - 2, ICON_SIZE - 5);
    ellipse(icon_dc, 0x00402020, 6, 6, ICON_SIZE - 6, ICON_SIZE - 6);

    let icon_info = ICONINFO {
        fIcon: true.into(),
        xHotspot: 0,
        yHotspot: 0,
        hbmMask: mask_bitmap,
        hbmColor: icon_bitmap,
    };

    let icon = CreateIconIndirect(&icon_info);

    // CreateIconIndirect copia los bitmaps: se liberan en cualquier caso
    let _ = SelectObject(icon_dc, old_icon_bmp);
    let _ = SelectObject(mask_dc, old_mask_bmp);
    let _ = DeleteObject(icon_bitmap);
    let _ = DeleteObject(mask_bitmap);
    let _ = DeleteDC(icon_dc);
    let _ = DeleteDC(mask_dc);
    let _ = ReleaseDC(None, screen_dc);

    icon
}

unsafe fn fill(dc: HDC, rect: &RECT, color: u32) {
    let brush = CreateSolidBrush(COLORREF(color));
    let _ = FillRect(dc, rect, brush);
    let _ = DeleteObject(brush);
}

unsafe fn ellipse(dc: HDC, color: u32, left: i32, top: i32, right: i32, bottom: i32) {
    let brush = CreateSolidBrush(COLORREF(color));
    let old_brush = SelectObject(dc, brush);
    let _ = Ellipse(dc, left, top, right, bottom);
    let _ = SelectObject(dc, old_brush);
    let _ = DeleteObject(brush);
}
