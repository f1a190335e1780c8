use std::time::Instant;

use crate::metrics::{self, CharacterState, Metrics};
use crate::paragraph::ParagraphSource;
use crate::session::{Session, SessionConfig, Status};
use crate::word_budget::{apply_word_budget, WordVerdict};

/// Owns the live session and applies the tick and input rules to it.
pub struct SessionEngine {
    config: SessionConfig,
    source: Box<dyn ParagraphSource>,
    session: Session,
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl SessionEngine {
    pub fn new(config: SessionConfig, mut source: Box<dyn ParagraphSource>) -> Self {
        let session = Session::new(source.next_paragraph());
        Self {
            config,
            source,
            session,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.session.status
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_session(&self.session, &self.config)
    }

    pub fn character_states(&self) -> Vec<CharacterState> {
        metrics::character_states(&self.session)
    }

    /// Discards the current session and starts a fresh one on a new paragraph.
    pub fn restart(&mut self) {
        let previous = self.session.status;
        self.session = Session::new(self.source.next_paragraph());
        tracing::debug!(target: "engine", %previous, "session restarted");
    }

    /// Handles the full new contents of the input field.
    ///
    /// Returns the verdict for a word completed by this change, if any.
    /// Ignored once the session has finished.
    pub fn on_input(&mut self, value: &str, now: Instant) -> Option<WordVerdict> {
        if self.session.has_finished() {
            return None;
        }

        if self.session.status == Status::Waiting && !value.is_empty() {
            self.session.status = Status::Started;
            self.session.started_at = Some(now);
            tracing::debug!(target: "engine", "session started");
        }

        let verdict = apply_word_budget(&mut self.session, &self.config, value);

        self.session.input_buffer = value.to_string();

        if value == self.session.normalized_reference {
            self.session.elapsed_secs = self.session.secs_since_start(now);
            self.finish("completed");
        }

        verdict
    }

    /// Advances elapsed time and forces the finish once the budget runs out.
    /// Stray ticks outside of `Started` do nothing.
    pub fn on_tick(&mut self, now: Instant) {
        if self.session.status != Status::Started {
            return;
        }

        let new_elapsed = self.session.secs_since_start(now);
        let budget = self.session.time_budget_secs(&self.config);

        if new_elapsed >= budget {
            // a budget driven below zero by penalties still leaves elapsed at zero
            self.session.elapsed_secs = budget.max(0.0);
            self.finish("timed out");
        } else {
            self.session.elapsed_secs = new_elapsed;
        }
    }

    fn finish(&mut self, reason: &'static str) {
        self.session.status = Status::Finished;
        tracing::info!(target: "engine", reason, metrics = %self.metrics(), "session finished");
    }
}
