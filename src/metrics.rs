use std::fmt::{self, Display, Formatter};

use crate::session::{Session, SessionConfig, Status};

const CHARS_PER_WORD: f64 = 5.0;

/// Per-character outcome used by the presentation layer.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharState {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct CharacterState {
    pub char: char,
    pub state: CharState,
    pub is_cursor: bool,
}

/// Snapshot of everything the metrics row shows.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Metrics {
    pub status: Status,
    pub time_remaining: u64,
    pub wpm: u64,
    pub accuracy_percent: f64,
    pub elapsed_secs: f64,
    pub bonus_secs: i64,
}

impl Metrics {
    pub fn from_session(session: &Session, config: &SessionConfig) -> Self {
        Self {
            status: session.status,
            time_remaining: time_remaining(session, config),
            wpm: wpm(session),
            accuracy_percent: accuracy_percent(session),
            elapsed_secs: session.elapsed_secs,
            bonus_secs: session.bonus_secs,
        }
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wpm | {:.1}% acc | {:.2}s elapsed | {:+}s bonus | {}s left",
            self.wpm, self.accuracy_percent, self.elapsed_secs, self.bonus_secs, self.time_remaining
        )
    }
}

/// Whole seconds left in the budget, never negative.
pub fn time_remaining(session: &Session, config: &SessionConfig) -> u64 {
    let left = session.time_budget_secs(config) - session.elapsed_secs;
    left.max(0.0).ceil() as u64
}

pub fn wpm(session: &Session) -> u64 {
    if session.status == Status::Waiting || session.elapsed_secs <= 0.0 {
        return 0;
    }
    let words_typed = session.input_buffer.chars().count() as f64 / CHARS_PER_WORD;
    let minutes = session.elapsed_secs / 60.0;
    (words_typed / minutes).round() as u64
}

/// Share of typed characters that match the normalized reference at the same
/// position. Not rounded.
pub fn accuracy_percent(session: &Session) -> f64 {
    let typed = session.input_buffer.chars().count();
    if typed == 0 {
        return 100.0;
    }
    let matches = session
        .input_buffer
        .chars()
        .zip(session.normalized_reference.chars())
        .filter(|(typed, expected)| typed == expected)
        .count();
    100.0 * matches as f64 / typed as f64
}

pub fn character_states(session: &Session) -> Vec<CharacterState> {
    let typed: Vec<char> = session.input_buffer.chars().collect();
    session
        .reference_text
        .chars()
        .zip(session.normalized_reference.chars())
        .enumerate()
        .map(|(idx, (display, expected))| {
            let state = match typed.get(idx) {
                None => CharState::Pending,
                Some(&c) if c == expected => CharState::Correct,
                Some(_) => CharState::Incorrect,
            };
            CharacterState {
                char: display,
                state,
                is_cursor: idx == typed.len(),
            }
        })
        .collect()
}
