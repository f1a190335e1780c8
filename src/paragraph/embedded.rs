use include_dir::{include_dir, Dir};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;

use super::ParagraphSource;
use crate::error::{Error, Result};

static PARAGRAPH_DIR: Dir = include_dir!("src/paragraphs");

pub const DEFAULT_PACK: &str = "english";

#[derive(Deserialize, Clone, Debug)]
pub struct ParagraphPack {
    pub name: String,
    // only filled through from_json, which rejects an empty list
    paragraphs: Vec<String>,
}

impl ParagraphPack {
    /// Loads `<name>.json` from the packs compiled into the binary.
    pub fn load(name: &str) -> Result<Self> {
        let file = PARAGRAPH_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::PackNotFound {
                name: name.to_string(),
            })?;

        let contents = file.contents_utf8().ok_or_else(|| Error::PackUnreadable {
            name: name.to_string(),
            reason: "not valid utf-8".to_string(),
        })?;

        Self::from_json(name, contents)
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Parses a pack, folding CRLF line endings and dropping blank entries.
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let mut pack: ParagraphPack =
            serde_json::from_str(json).map_err(|e| Error::PackUnreadable {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let total = pack.paragraphs.len();
        pack.paragraphs = pack
            .paragraphs
            .into_iter()
            .map(|p| p.replace("\r\n", "\n"))
            .filter(|p| !p.trim().is_empty())
            .collect();

        if pack.paragraphs.len() < total {
            tracing::warn!(
                target: "paragraph",
                pack = name,
                dropped = total - pack.paragraphs.len(),
                "skipping blank paragraphs"
            );
        }

        if pack.paragraphs.is_empty() {
            return Err(Error::EmptyPack {
                name: name.to_string(),
            });
        }

        Ok(pack)
    }
}

/// Random paragraphs from a pack, never the same one twice in a row.
#[derive(Debug)]
pub struct EmbeddedParagraphs {
    pack: ParagraphPack,
    last: Option<usize>,
    rng: StdRng,
}

impl EmbeddedParagraphs {
    pub fn new(pack: ParagraphPack) -> Self {
        Self {
            pack,
            last: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(pack: ParagraphPack, seed: u64) -> Self {
        Self {
            pack,
            last: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pack(&self) -> &ParagraphPack {
        &self.pack
    }

    fn pick_index(&mut self) -> usize {
        let len = self.pack.paragraphs.len();
        match self.last {
            Some(last) if len > 1 => {
                let idx = self.rng.gen_range(0..len - 1);
                if idx >= last {
                    idx + 1
                } else {
                    idx
                }
            }
            _ => self.rng.gen_range(0..len),
        }
    }
}

impl ParagraphSource for EmbeddedParagraphs {
    fn next_paragraph(&mut self) -> String {
        let idx = self.pick_index();
        self.last = Some(idx);
        tracing::debug!(target: "paragraph", pack = %self.pack.name, idx, "picked paragraph");
        self.pack.paragraphs[idx].clone()
    }
}
