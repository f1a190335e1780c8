use cgisf_lib::cgisf;
use itertools::Itertools;
use rand::Rng;

use super::ParagraphSource;

pub const DEFAULT_SENTENCES: usize = 3;

/// Nonsense-but-grammatical sentences, one per line.
#[derive(Debug, Clone)]
pub struct GeneratedParagraphs {
    sentences: usize,
}

impl GeneratedParagraphs {
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences: sentences.max(1),
        }
    }

    pub fn sentences(&self) -> usize {
        self.sentences
    }
}

impl Default for GeneratedParagraphs {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCES)
    }
}

fn random_sentence(rng: &mut impl Rng) -> String {
    cgisf(
        rng.gen_range(1..3),
        rng.gen_range(1..3),
        rng.gen_range(1..5),
        rng.gen_bool(0.5),
        rng.gen_range(1..3),
        rng.gen_bool(0.5),
    )
    .trim()
    .to_string()
}

impl ParagraphSource for GeneratedParagraphs {
    fn next_paragraph(&mut self) -> String {
        let rng = &mut rand::thread_rng();
        let paragraph = (0..self.sentences).map(|_| random_sentence(rng)).join("\n");
        tracing::debug!(target: "paragraph", sentences = self.sentences, "generated paragraph");
        paragraph
    }
}
