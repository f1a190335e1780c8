use crate::session::{Session, SessionConfig};

/// Result of comparing a just-completed word against the reference.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum WordVerdict {
    Correct { index: usize },
    Incorrect { index: usize },
}

impl WordVerdict {
    /// Signed change this verdict makes to the session's bonus seconds.
    pub fn adjustment_secs(&self, config: &SessionConfig) -> i64 {
        match self {
            WordVerdict::Correct { .. } => config.word_bonus_secs as i64,
            WordVerdict::Incorrect { .. } => -(config.word_penalty_secs as i64),
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            WordVerdict::Correct { index } | WordVerdict::Incorrect { index } => index,
        }
    }
}

/// A word boundary fires when the buffer newly ends in a space.
pub fn is_word_boundary(previous: &str, value: &str) -> bool {
    value.ends_with(' ') && !previous.ends_with(' ')
}

/// Judges the word completed by the keystroke that turned `previous` into
/// `value`.
///
/// The typed buffer is split on single spaces (runs are not collapsed) while
/// the reference words come from whitespace runs, so extra spaces in the
/// buffer shift later words out of alignment. Returns `None` when no word was
/// completed or when the typist has run past the last reference word.
pub fn judge_completed_word(
    previous: &str,
    value: &str,
    reference_words: &[String],
) -> Option<WordVerdict> {
    if !is_word_boundary(previous, value) {
        return None;
    }

    let typed_words: Vec<&str> = previous.split(' ').collect();
    let index = typed_words.len() - 1;
    let expected = reference_words.get(index)?;

    if typed_words[index] == expected {
        Some(WordVerdict::Correct { index })
    } else {
        Some(WordVerdict::Incorrect { index })
    }
}

/// Applies the verdict for `value` to the session's bonus accumulator. This is
/// the only place `bonus_secs` changes.
pub fn apply_word_budget(
    session: &mut Session,
    config: &SessionConfig,
    value: &str,
) -> Option<WordVerdict> {
    let verdict = judge_completed_word(&session.input_buffer, value, &session.reference_words)?;
    session.bonus_secs += verdict.adjustment_secs(config);
    tracing::trace!(
        target: "engine.words",
        index = verdict.index(),
        ?verdict,
        bonus_secs = session.bonus_secs,
        "word completed"
    );
    Some(verdict)
}
