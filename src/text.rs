//! Textos visibles para el usuario

use std::time::Duration;

pub const APP_NAME: &str = "KeepAwake";

pub const TRAY_TOOLTIP: &str = "KeepAwake - clic para ver el menú";

pub const MENU_SHOW_STATUS: &str = "Mostrar estado";
pub const MENU_OPEN_HOME: &str = "Abrir página del proyecto";
pub const MENU_EXIT: &str = "Salir";

pub const STATUS_TITLE: &str = "Estado del programa";

pub const ERROR_TITLE: &str = "Error";
pub const WINDOW_FAILED: &str = "No se pudo crear la ventana oculta.";

/// Mensaje de "Mostrar estado"
pub fn status_message(interval: Duration, nudges: u64) -> String {
    format!(
        "{APP_NAME} se está ejecutando en segundo plano y mueve el ratón cada {} \
         para evitar que el sistema entre en reposo.\n\nMovimientos realizados: {nudges}",
        describe_interval(interval)
    )
}

/// Describe un intervalo en la unidad más natural ("3 minutos", "45 segundos")
pub fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        plural(secs / 60, "minuto", "minutos")
    } else if secs >= 1 {
        plural(secs, "segundo", "segundos")
    } else {
        plural(interval.as_millis() as u64, "milisegundo", "milisegundos")
    }
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {one}")
    } else {
        format!("{n} {many}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_whole_minutes() {
        assert_eq!(describe_interval(Duration::from_secs(180)), "3 minutos");
        assert_eq!(describe_interval(Duration::from_secs(60)), "1 minuto");
    }

    #[test]
    fn falls_back_to_seconds_and_millis() {
        assert_eq!(describe_interval(Duration::from_secs(90)), "90 segundos");
        assert_eq!(describe_interval(Duration::from_secs(1)), "1 segundo");
        assert_eq!(describe_interval(Duration::from_millis(250)), "250 milisegundos");
    }

    #[test]
    fn status_mentions_interval_and_count() {
        let text = status_message(Duration::from_secs(180), 4);
        assert!(text.starts_with("KeepAwake se está ejecutando"));
        assert!(text.contains("cada 3 minutos"));
        assert!(text.ends_with("Movimientos realizados: 4"));
    }

    #[test]
    fn tooltip_fits_in_the_shell_buffer() {
        // szTip admite 128 unidades UTF-16 incluido el terminador
        assert!(TRAY_TOOLTIP.encode_utf16().count() < 128);
    }
}
