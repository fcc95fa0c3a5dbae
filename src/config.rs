//! Configuración fija de la aplicación
//!
//! No hay archivo de configuración: los valores se deciden en compilación y
//! se pasan explícitamente a `App` dentro de `Settings`.

use std::time::Duration;

/// Valores por defecto de la configuración
pub struct ConfigDefaults;

impl ConfigDefaults {
    pub const NUDGE_INTERVAL_MS: u32 = 180_000; // 3 minutos
    pub const NUDGE_SETTLE_MS: u64 = 10;
    pub const NUDGE_DISTANCE: i32 = 1;

    pub const PROJECT_HOME_URL: &'static str = "https://github.com/potapotapotato";

    /// Filtro de `tracing` cuando no hay `RUST_LOG`
    pub const LOG_FILTER: &'static str = "keep_awake=info";
}

/// Parámetros de ejecución
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Periodo del timer entre dos movimientos
    pub nudge_interval: Duration,
    /// Pausa entre el movimiento y su inverso
    pub nudge_settle: Duration,
    /// Desplazamiento relativo en píxeles
    pub nudge_distance: i32,
    pub project_home: &'static str,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nudge_interval: Duration::from_millis(u64::from(ConfigDefaults::NUDGE_INTERVAL_MS)),
            nudge_settle: Duration::from_millis(ConfigDefaults::NUDGE_SETTLE_MS),
            nudge_distance: ConfigDefaults::NUDGE_DISTANCE,
            project_home: ConfigDefaults::PROJECT_HOME_URL,
        }
    }
}

impl Settings {
    /// Valida que los valores estén en rangos válidos
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.nudge_interval.is_zero() {
            return Err("El intervalo del timer no puede ser 0".to_string());
        }
        if self.nudge_interval.as_millis() > u128::from(u32::MAX) {
            return Err("El intervalo del timer no cabe en 32 bits".to_string());
        }
        if self.nudge_distance <= 0 {
            return Err("El desplazamiento debe ser positivo".to_string());
        }
        Ok(())
    }
}
