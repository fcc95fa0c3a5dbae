//! Puente entre el procedimiento de ventana y `App`
//!
//! `TrackPopupMenu` ejecuta su propio bucle modal, que puede volver a entrar en
//! el procedimiento de ventana mientras `App` está prestado. Esos eventos se
//! encolan y se procesan en orden al terminar el evento en curso.
//!
//! Los cuadros de mensaje se muestran después de soltar `App`, así que los
//! ticks que entrega su bucle modal llegan a la aplicación sin esperar.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::app::App;
use crate::event::{AppEvent, Disposition};
use crate::platform::{Desktop, Notifier, Session};

pub struct Dispatcher<D: Desktop> {
    app: RefCell<Option<App<D>>>,
    deferred: RefCell<VecDeque<AppEvent>>,
}

impl<D: Desktop> Default for Dispatcher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Desktop> Dispatcher<D> {
    pub fn new() -> Self {
        Self {
            app: RefCell::new(None),
            deferred: RefCell::new(VecDeque::new()),
        }
    }

    /// Entrega la aplicación ya arrancada
    pub fn install(&self, app: App<D>) {
        *self.app.borrow_mut() = Some(app);
    }

    pub fn dispatch(&self, event: AppEvent) -> Disposition {
        if event == AppEvent::Passthrough {
            return Disposition::Default;
        }

        let disposition = {
            let Ok(mut slot) = self.app.try_borrow_mut() else {
                trace!("Evento reentrante aplazado: {event:?}");
                self.deferred.borrow_mut().push_back(event);
                return Disposition::Handled;
            };
            let Some(app) = slot.as_mut() else {
                // Mensajes anteriores a `install`
                return Disposition::Default;
            };

            let disposition = app.handle(event);
            loop {
                let next = self.deferred.borrow_mut().pop_front();
                let Some(next) = next else { break };
                debug!("Procesando evento aplazado: {next:?}");
                app.handle(next);
            }
            disposition
        };

        self.show_notices();
        disposition
    }

    /// Muestra los mensajes pendientes con `App` libre
    fn show_notices(&self) {
        loop {
            let (notifier, notice) = {
                let Ok(mut slot) = self.app.try_borrow_mut() else { return };
                let Some(app) = slot.as_mut() else { return };
                let Some(notice) = app.take_notice() else { return };
                let notifier = app.desktop().notifier();
                (notifier, notice)
            };

            notifier.show_message(notice.title, &notice.text, notice.kind);
        }
    }

    /// Cierre tras salir del bucle de mensajes
    pub fn finish(&self) {
        if let Ok(mut slot) = self.app.try_borrow_mut() {
            if let Some(app) = slot.as_mut() {
                app.finish();
                debug!("Fase final: {:?}", app.phase());
            }
        }
    }

    /// Aplica `f` a la aplicación si no está ocupada
    pub fn with_app<R>(&self, f: impl FnOnce(&App<D>) -> R) -> Option<R> {
        let slot = self.app.try_borrow().ok()?;
        slot.as_ref().map(f)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::app::Phase;
    use crate::config::Settings;
    use crate::constants::TIMER_NUDGE;
    use crate::testing::{Call, FakeDesktop};
    use crate::text;
    use crate::types::MessageKind;
    use crate::tray::{MenuCommand, TrayNotification};

    fn dispatcher() -> Dispatcher<FakeDesktop> {
        let settings = Settings {
            nudge_settle: Duration::ZERO,
            ..Settings::default()
        };
        let mut app = App::new(FakeDesktop::default(), settings);
        app.start();
        let dispatcher = Dispatcher::new();
        dispatcher.install(app);
        dispatcher
    }

    #[test]
    fn events_before_install_use_the_default_handler() {
        let dispatcher: Dispatcher<FakeDesktop> = Dispatcher::new();
        assert_eq!(
            dispatcher.dispatch(AppEvent::Tick(TIMER_NUDGE)),
            Disposition::Default
        );
    }

    #[test]
    fn passthrough_never_touches_the_app() {
        let dispatcher = dispatcher();
        let _busy = dispatcher.app.borrow_mut();
        assert_eq!(dispatcher.dispatch(AppEvent::Passthrough), Disposition::Default);
        assert!(dispatcher.deferred.borrow().is_empty());
    }

    #[test]
    fn reentrant_events_are_deferred_then_handled_in_order() {
        let dispatcher = dispatcher();

        {
            // Simula el bucle modal del menú con la aplicación prestada
            let _busy = dispatcher.app.borrow_mut();
            assert_eq!(
                dispatcher.dispatch(AppEvent::Tick(TIMER_NUDGE)),
                Disposition::Handled
            );
            dispatcher.dispatch(AppEvent::CommandSelected(MenuCommand::Exit));
            assert_eq!(dispatcher.deferred.borrow().len(), 2);
        }

        dispatcher.dispatch(AppEvent::TrayInteraction(TrayNotification::Other(0x0200)));

        assert!(dispatcher.deferred.borrow().is_empty());
        let calls = dispatcher
            .with_app(|app| app.desktop().calls.clone())
            .expect("aplicación instalada");
        let tail = &calls[calls.len() - 5..];
        assert_eq!(
            tail,
            &[
                Call::MovePointer(1, 0),
                Call::MovePointer(-1, 0),
                Call::RemoveTrayIcon(101),
                Call::KillTimer(TIMER_NUDGE),
                Call::RequestQuit,
            ]
        );
    }

    #[test]
    fn finish_terminates_the_app() {
        let dispatcher = dispatcher();
        dispatcher.finish();
        assert_eq!(dispatcher.with_app(|app| app.phase()), Some(Phase::Terminated));
    }

    #[test]
    fn status_box_is_shown_once_the_app_is_released() {
        let dispatcher = dispatcher();

        dispatcher.dispatch(AppEvent::CommandSelected(MenuCommand::ShowStatus));

        let notifier = dispatcher
            .with_app(|app| app.desktop().notifier())
            .expect("aplicación instalada");
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, text::STATUS_TITLE);
        assert_eq!(shown[0].2, MessageKind::Information);
    }

    #[test]
    fn ticks_keep_nudging_while_the_status_box_is_open() {
        let dispatcher = Rc::new(dispatcher());
        let notifier = dispatcher
            .with_app(|app| app.desktop().notifier())
            .expect("aplicación instalada");

        // Bucle modal del cuadro: cinco ticks (15 minutos) antes de cerrarlo
        let weak = Rc::downgrade(&dispatcher);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        notifier.set_while_open(move || {
            let Some(dispatcher) = weak.upgrade() else { return };
            for _ in 0..5 {
                dispatcher.dispatch(AppEvent::Tick(TIMER_NUDGE));
                record
                    .borrow_mut()
                    .push(dispatcher.with_app(|app| app.nudges()));
            }
        });

        dispatcher.dispatch(AppEvent::CommandSelected(MenuCommand::ShowStatus));

        assert_eq!(
            *seen.borrow(),
            vec![Some(2), Some(3), Some(4), Some(5), Some(6)]
        );
        assert!(dispatcher.deferred.borrow().is_empty());
        assert_eq!(dispatcher.with_app(|app| app.nudges()), Some(6));
        assert_eq!(notifier.shown.borrow().len(), 1);
    }
}
