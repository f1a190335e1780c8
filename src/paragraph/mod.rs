pub mod embedded;
pub mod generated;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use embedded::{EmbeddedParagraphs, ParagraphPack, DEFAULT_PACK};
pub use generated::GeneratedParagraphs;

/// Supplies the reference text for each new session. Must return non-empty
/// printable text; line breaks are allowed.
pub trait ParagraphSource {
    fn next_paragraph(&mut self) -> String;
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// paragraphs bundled with the binary
    #[default]
    Embedded,
    /// randomly generated sentences
    Generated,
}

/// The same user-supplied prompt for every session.
#[derive(Debug, Clone)]
pub struct FixedParagraph {
    text: String,
}

impl FixedParagraph {
    pub fn new(text: String) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        Ok(Self {
            text: text.replace("\r\n", "\n"),
        })
    }
}

impl ParagraphSource for FixedParagraph {
    fn next_paragraph(&mut self) -> String {
        self.text.clone()
    }
}

/// Builds the source for a run. A custom prompt wins over `kind`.
pub fn build_source(
    kind: SourceKind,
    sentences: usize,
    prompt: Option<String>,
) -> Result<Box<dyn ParagraphSource>> {
    if let Some(prompt) = prompt {
        return Ok(Box::new(FixedParagraph::new(prompt)?));
    }

    let source: Box<dyn ParagraphSource> = match kind {
        SourceKind::Embedded => Box::new(EmbeddedParagraphs::new(ParagraphPack::load(DEFAULT_PACK)?)),
        SourceKind::Generated => Box::new(GeneratedParagraphs::new(sentences)),
    };
    tracing::debug!(target: "paragraph", %kind, "paragraph source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_fixed_paragraph_repeats() {
        let mut source = FixedParagraph::new("hello world".to_string()).unwrap();

        assert_eq!(source.next_paragraph(), "hello world");
        assert_eq!(source.next_paragraph(), "hello world");
    }

    #[test]
    fn test_fixed_paragraph_folds_crlf() {
        let mut source = FixedParagraph::new("one\r\ntwo".to_string()).unwrap();
        assert_eq!(source.next_paragraph(), "one\ntwo");
    }

    #[test]
    fn test_fixed_paragraph_rejects_blank() {
        assert_matches!(FixedParagraph::new("  ".to_string()), Err(Error::EmptyPrompt));
    }

    #[test]
    fn test_build_source_prefers_prompt() {
        let mut source =
            build_source(SourceKind::Generated, 3, Some("custom test prompt".to_string())).unwrap();
        assert_eq!(source.next_paragraph(), "custom test prompt");
    }

    #[test]
    fn test_build_source_embedded() {
        let mut source = build_source(SourceKind::Embedded, 3, None).unwrap();
        assert!(!source.next_paragraph().is_empty());
    }

    #[test]
    fn test_build_source_generated() {
        let mut source = build_source(SourceKind::Generated, 2, None).unwrap();
        let paragraph = source.next_paragraph();
        assert!(!paragraph.trim().is_empty());
        assert_eq!(paragraph.lines().count(), 2);
    }

    #[test]
    fn test_source_kind_display() {
        assert_eq!(SourceKind::Embedded.to_string(), "embedded");
        assert_eq!(SourceKind::Generated.to_string(), "generated");
        assert_eq!(SourceKind::default(), SourceKind::Embedded);
    }
}
