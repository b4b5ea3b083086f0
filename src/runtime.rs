//! Command execution and the message loop
//!
//! The runtime owns the session and runs the side effects `update` asks for.
//! Slow work (generation calls, timers) runs on spawned threads and reports
//! back as messages over a channel; the session itself is only touched from
//! the thread driving the runtime.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::dom::Dom;
use crate::generation::TextGenerator;
use crate::keymap::Keystroke;
use crate::messages::{GenerationMsg, Msg};
use crate::session::Session;
use crate::update::{handle_keystroke, update};

pub struct Runtime<D: Dom, G: TextGenerator + ?Sized + 'static> {
    session: Session<D>,
    generator: Arc<G>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Spawned commands whose message has not come back yet
    in_flight: usize,
}

impl<D: Dom, G: TextGenerator + ?Sized + 'static> Runtime<D, G> {
    pub fn new(session: Session<D>, generator: Arc<G>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            session,
            generator,
            msg_tx,
            msg_rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &Session<D> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<D> {
        &mut self.session
    }

    /// Number of spawned commands still outstanding
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Feed one message through `update` and run the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        let cmd = update(&mut self.session, msg);
        self.process_cmd(cmd);
    }

    /// Route a key press. Returns whether the host should suppress it.
    pub fn key(&mut self, keystroke: Keystroke) -> bool {
        let outcome = handle_keystroke(&mut self.session, keystroke);
        self.process_cmd(outcome.cmd);
        outcome.prevent_default
    }

    /// Dispatch every message that has already arrived. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.receive(msg);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for one message and dispatch it.
    ///
    /// Returns `false` if nothing arrived in time.
    pub fn pump_one(&mut self, timeout: Duration) -> bool {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.receive(msg);
                true
            }
            // Disconnection cannot happen while we hold a sender
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Keep dispatching arriving messages until nothing is outstanding.
    ///
    /// Returns `false` if `timeout` passed with commands still in flight.
    pub fn pump_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !self.pump_one(remaining) {
                tracing::warn!(in_flight = self.in_flight, "runtime did not settle in time");
                return false;
            }
        }
        true
    }

    fn receive(&mut self, msg: Msg) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(msg);
    }

    fn process_cmd(&mut self, cmd: Option<Cmd>) {
        let Some(cmd) = cmd else {
            return;
        };
        match cmd {
            Cmd::Generate { request, payload } => {
                let tx = self.msg_tx.clone();
                let generator = Arc::clone(&self.generator);
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = generator.generate(&payload);
                    let _ = tx.send(Msg::Generation(GenerationMsg::Completed { request, result }));
                });
            }
            Cmd::Delay { delay, msg } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    let _ = tx.send(*msg);
                });
            }
            Cmd::FocusNode(node) => self.session.dom.focus(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistConfig;
    use crate::dom::MemoryDom;
    use crate::generation::EchoGenerator;
    use crate::messages::FocusMsg;
    use crate::overlay::WidgetKind;
    use crate::settings::Settings;

    fn runtime() -> Runtime<MemoryDom, EchoGenerator> {
        let config = AssistConfig {
            toast_ms: 10,
            blur_grace_ms: 10,
            pointer_fallback_ms: 10,
            ..AssistConfig::default()
        };
        let settings = Settings {
            api_key: Some("k".to_string()),
            ..Settings::default()
        };
        let mut session = Session::new(MemoryDom::new(), settings, config);
        session.attach();
        Runtime::new(session, Arc::new(EchoGenerator))
    }

    #[test]
    fn test_generation_round_trip_settles() {
        let mut rt = runtime();
        let input = rt.session_mut().dom.add_input(None, "hi");
        rt.session_mut().dom.set_selection_range(input, 2, 2);
        rt.dispatch(Msg::Focus(FocusMsg::FocusIn { target: input }));
        rt.dispatch(Msg::perform(crate::action::ActionKind::Summarize));
        assert_eq!(rt.in_flight(), 1);

        assert!(rt.pump_until_idle(Duration::from_secs(5)));
        assert_eq!(
            rt.session().dom.value(input).as_deref(),
            Some("hiSummarize the following text: hi")
        );
        // The success toast has expired too
        assert!(!rt.session().layer.is_showing(WidgetKind::Toast));
    }

    #[test]
    fn test_focus_command_moves_focus() {
        let mut rt = runtime();
        let input = rt.session_mut().dom.add_input(None, "");
        rt.dispatch(Msg::Focus(FocusMsg::FocusIn { target: input }));
        rt.dispatch(Msg::perform(crate::action::ActionKind::Generate));

        let prompt = rt.session().layer.prompt_input(&rt.session().dom);
        assert!(prompt.is_some());
        assert_eq!(rt.session().dom.active_element(), prompt);
    }
}
