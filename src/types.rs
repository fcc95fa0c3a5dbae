//! Tipos compartidos entre el núcleo y el backend Win32

/// Representa una posición en coordenadas de pantalla
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::POINT> for Position {
    fn from(point: windows::Win32::Foundation::POINT) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Icono del cuadro de mensaje
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Information,
    Error,
}
