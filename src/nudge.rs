//! Movimiento mínimo del ratón que reinicia el contador de inactividad

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::platform::PointerInput;

/// Mueve el puntero `distance` píxeles a la derecha, espera `settle` para
/// que el sistema lo registre como actividad y lo devuelve a su sitio.
///
/// Los fallos no se propagan: el siguiente tick del timer es el reintento.
/// Devuelve `true` si el movimiento llegó a aplicarse.
pub fn nudge<P: PointerInput + ?Sized>(pointer: &mut P, distance: i32, settle: Duration) -> bool {
    if let Err(err) = pointer.move_pointer(distance, 0) {
        debug!("No se pudo mover el ratón: {err}");
        return false;
    }

    thread::sleep(settle);

    // Solo se deshace lo que se hizo: el puntero nunca queda desplazado
    if let Err(err) = pointer.move_pointer(-distance, 0) {
        debug!("No se pudo devolver el ratón a su posición: {err}");
    }

    true
}
