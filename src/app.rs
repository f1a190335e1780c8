use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::SessionEngine;
use crate::runtime::{Clock, TickTimer, TrainerEvent};
use crate::session::Status;

/// Host around the engine: turns terminal events into input changes and owns
/// the tick timer for the lifetime of the `Started` state.
pub struct App {
    pub engine: SessionEngine,
    clock: Box<dyn Clock>,
    tick_interval: Duration,
    tick_timer: Option<TickTimer>,
    should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("engine", &self.engine)
            .field("tick_interval", &self.tick_interval)
            .field("tick_timer", &self.tick_timer)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(engine: SessionEngine, clock: Box<dyn Clock>, tick_interval: Duration) -> Self {
        Self {
            engine,
            clock,
            tick_interval,
            tick_timer: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tick_timer(&self) -> Option<&TickTimer> {
        self.tick_timer.as_ref()
    }

    /// Deadline the runner should wake up at, if a tick is pending.
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.tick_timer.map(|t| t.next_due())
    }

    pub fn handle_event(&mut self, event: TrainerEvent) {
        match event {
            TrainerEvent::Tick => self.on_tick(),
            TrainerEvent::Resize => {}
            TrainerEvent::Key(key) => self.on_key(key),
        }
        self.sync_tick_timer();
    }

    pub fn restart(&mut self) {
        self.engine.restart();
        self.sync_tick_timer();
    }

    fn on_tick(&mut self) {
        let now = self.clock.now();
        // a tick with no timer armed is stale
        if let Some(timer) = self.tick_timer.as_mut() {
            timer.advance(now);
            self.engine.on_tick(now);
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let finished = self.engine.status() == Status::Finished;

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Tab => self.engine.restart(),
            KeyCode::Enter | KeyCode::Char('r') if finished => self.engine.restart(),
            KeyCode::Backspace => {
                let mut value = self.engine.session().input_buffer.clone();
                if value.pop().is_some() {
                    self.send_input(value);
                }
            }
            KeyCode::Char(c) if !is_control_chord(key.modifiers) => {
                let session = self.engine.session();
                // the field is trimmed to the paragraph length
                if session.input_buffer.chars().count() < session.normalized_reference.chars().count()
                {
                    let mut value = session.input_buffer.clone();
                    value.push(c);
                    self.send_input(value);
                }
            }
            _ => {}
        }
    }

    fn send_input(&mut self, value: String) {
        let now = self.clock.now();
        self.engine.on_input(&value, now);
    }

    /// Arms the timer on entering `Started` and drops it on any way out.
    fn sync_tick_timer(&mut self) {
        match (self.engine.status(), self.tick_timer.is_some()) {
            (Status::Started, false) => {
                self.tick_timer = Some(TickTimer::start(self.tick_interval, self.clock.now()));
                tracing::debug!(target: "app", "tick timer armed");
            }
            (Status::Waiting | Status::Finished, true) => {
                self.tick_timer = None;
                tracing::debug!(target: "app", "tick timer released");
            }
            _ => {}
        }
    }
}

/// Ctrl held without Alt. AltGr arrives as Ctrl+Alt on Windows and still types.
fn is_control_chord(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}
