//! Estado de la aplicación y despacho de eventos de la ventana oculta

use std::collections::VecDeque;

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::constants::TIMER_NUDGE;
use crate::error::AppError;
use crate::event::{AppEvent, Disposition};
use crate::nudge::nudge;
use crate::platform::{Desktop, Platform};
use crate::text;
use crate::tray::{self, MenuCommand, TrayNotification, TrayRegistration};
use crate::types::MessageKind;

/// Fase del ciclo de vida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ventana creada, sin icono ni timer
    Created,
    /// Icono registrado y timer en marcha
    Active,
    /// Icono y timer liberados, esperando a que termine el bucle
    ShuttingDown,
    /// El bucle de mensajes ha terminado
    Terminated,
}

/// Mensaje pendiente de mostrar cuando la aplicación deje de estar prestada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub text: String,
    pub kind: MessageKind,
}

/// Única instancia de la aplicación, dueña del escritorio y de sus recursos
pub struct App<D: Desktop> {
    desktop: D,
    settings: Settings,
    registration: TrayRegistration,
    phase: Phase,
    tray_registered: bool,
    timer_armed: bool,
    quit_requested: bool,
    nudges: u64,
    notices: VecDeque<Notice>,
}

impl<D: Desktop> App<D> {
    pub fn new(desktop: D, settings: Settings) -> Self {
        Self {
            desktop,
            settings,
            registration: TrayRegistration::new(),
            phase: Phase::Created,
            tray_registered: false,
            timer_armed: false,
            quit_requested: false,
            nudges: 0,
            notices: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    #[cfg(test)]
    pub fn desktop_mut(&mut self) -> &mut D {
        &mut self.desktop
    }

    /// Movimientos realizados desde el arranque
    pub fn nudges(&self) -> u64 {
        self.nudges
    }

    /// Siguiente mensaje que el despachador debe mostrar
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Primer movimiento, icono y timer
    pub fn start(&mut self) {
        if self.phase != Phase::Created {
            return;
        }

        // Evita que el sistema se duerma antes del primer tick
        self.nudge();

        tray::register(&mut self.desktop, &self.registration);
        self.tray_registered = true;

        if let Err(err) = self
            .desktop
            .set_timer(TIMER_NUDGE, self.settings.nudge_interval)
        {
            warn!("No se pudo iniciar el timer: {err}");
        }
        self.timer_armed = true;

        self.phase = Phase::Active;
        info!(
            "Activo: moviendo el ratón cada {}",
            text::describe_interval(self.settings.nudge_interval)
        );
    }

    /// Procesa un evento de la ventana
    pub fn handle(&mut self, event: AppEvent) -> Disposition {
        match event {
            AppEvent::Tick(id) => self.on_tick(id),
            AppEvent::TrayInteraction(notification) => self.on_tray(notification),
            AppEvent::CommandSelected(command) => self.on_command(command),
            AppEvent::DestroyRequested => {
                debug!("WM_DESTROY recibido");
                self.shut_down();
            }
            AppEvent::Passthrough => return Disposition::Default,
        }
        Disposition::Handled
    }

    /// Se llama al salir del bucle, sea cual sea el motivo
    pub fn finish(&mut self) {
        self.release_resources();
        if self.phase != Phase::Terminated {
            info!("Terminado tras {} movimientos", self.nudges());
        }
        self.phase = Phase::Terminated;
    }

    fn on_tick(&mut self, id: usize) {
        if id != TIMER_NUDGE || self.phase != Phase::Active {
            return;
        }
        self.nudge();
    }

    fn on_tray(&mut self, notification: TrayNotification) {
        if self.phase != Phase::Active {
            return;
        }
        tray::handle_notification(&mut self.desktop, notification);
    }

    fn on_command(&mut self, command: MenuCommand) {
        if self.phase != Phase::Active {
            return;
        }
        debug!("Comando de menú: {command:?}");
        match command {
            MenuCommand::ShowStatus => {
                self.notices.push_back(Notice {
                    title: text::STATUS_TITLE,
                    text: text::status_message(self.settings.nudge_interval, self.nudges),
                    kind: MessageKind::Information,
                });
            }
            MenuCommand::OpenHome => {
                if let Err(err) = self.desktop.open_url(self.settings.project_home) {
                    warn!("No se pudo abrir {}: {err}", self.settings.project_home);
                }
            }
            MenuCommand::Exit => self.shut_down(),
        }
    }

    fn nudge(&mut self) {
        if nudge(
            &mut self.desktop,
            self.settings.nudge_distance,
            self.settings.nudge_settle,
        ) {
            self.nudges += 1;
            debug!("Movimiento #{}", self.nudges);
        }
    }

    /// Salida por menú y por WM_DESTROY: icono, timer y fin del bucle
    fn shut_down(&mut self) {
        if self.phase == Phase::Terminated {
            return;
        }
        if self.phase != Phase::ShuttingDown {
            info!("Cerrando");
        }
        self.phase = Phase::ShuttingDown;
        self.notices.clear();
        self.release_resources();
        if !self.quit_requested {
            self.quit_requested = true;
            self.desktop.request_quit();
        }
    }

    /// Cada paso se intenta aunque el anterior falle; ninguno se repite
    fn release_resources(&mut self) {
        if self.tray_registered {
            self.tray_registered = false;
            tray::unregister(&mut self.desktop, &self.registration);
        }
        if self.timer_armed {
            self.timer_armed = false;
            if let Err(err) = self.desktop.kill_timer(TIMER_NUDGE) {
                warn!("No se pudo detener el timer: {err}");
            }
        }
    }
}

/// Arranque: ventana oculta, primer movimiento, icono y timer
///
/// Si la ventana no se puede crear se muestra una única alerta y no se
/// adquiere ningún otro recurso.
pub fn launch<P: Platform>(platform: &mut P, settings: Settings) -> Result<App<P::Desktop>, AppError> {
    let desktop = match platform.create_message_window() {
        Ok(desktop) => desktop,
        Err(err) => {
            error!("Arranque fallido: {err}");
            platform.alert(text::ERROR_TITLE, text::WINDOW_FAILED);
            return Err(err);
        }
    };

    let mut app = App::new(desktop, settings);
    app.start();
    Ok(app)
}
