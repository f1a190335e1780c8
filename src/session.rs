use std::time::Instant;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_DURATION_SECS: u32 = 60;
pub const DEFAULT_WORD_BONUS_SECS: u32 = 5;
pub const DEFAULT_WORD_PENALTY_SECS: u32 = 10;

/// Lifecycle of a single typing session. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Waiting,
    Started,
    Finished,
}

/// Timing rules a session is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub base_duration_secs: u32,
    pub word_bonus_secs: u32,
    pub word_penalty_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_duration_secs: DEFAULT_BASE_DURATION_SECS,
            word_bonus_secs: DEFAULT_WORD_BONUS_SECS,
            word_penalty_secs: DEFAULT_WORD_PENALTY_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    // Display form, line breaks intact
    pub reference_text: String,
    // Comparison form: every '\n' replaced by ' ', same char count as the display form
    pub normalized_reference: String,
    pub reference_words: Vec<String>,
    pub input_buffer: String,
    pub status: Status,
    pub started_at: Option<Instant>,
    pub elapsed_secs: f64,
    pub bonus_secs: i64,
}

impl Session {
    pub fn new(reference_text: String) -> Self {
        let normalized_reference = normalize_reference(&reference_text);
        let reference_words = split_reference_words(&reference_text);
        Self {
            reference_text,
            normalized_reference,
            reference_words,
            input_buffer: String::new(),
            status: Status::Waiting,
            started_at: None,
            elapsed_secs: 0.0,
            bonus_secs: 0,
        }
    }

    pub fn has_started(&self) -> bool {
        self.status != Status::Waiting
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Seconds allotted before the session is forced to finish.
    pub fn time_budget_secs(&self, config: &SessionConfig) -> f64 {
        config.base_duration_secs as f64 + self.bonus_secs as f64
    }

    /// Seconds since the first keystroke, or zero before it.
    pub fn secs_since_start(&self, now: Instant) -> f64 {
        self.started_at
            .map(|t| now.saturating_duration_since(t).as_secs_f64())
            .unwrap_or(0.0)
    }
}

pub fn normalize_reference(text: &str) -> String {
    text.replace('\n', " ")
}

/// Splits on runs of whitespace. A leading or trailing run still yields an
/// empty word at that end, so word indices line up with what a typist sees
/// when the paragraph starts or ends with a break.
pub fn split_reference_words(text: &str) -> Vec<String> {
    let pieces: Vec<&str> = text.split(char::is_whitespace).collect();
    let last = pieces.len() - 1;
    pieces
        .iter()
        .enumerate()
        .filter(|&(i, piece)| !piece.is_empty() || i == 0 || i == last)
        .map(|(_, piece)| piece.to_string())
        .collect()
}
