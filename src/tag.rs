//! Part-of-speech tagging seam.
//!
//! Analyses never tag text themselves, they go through [`PosTagger`]. The
//! bundled implementation is a plain lexicon lookup loaded from a
//! `word<TAB>TAG` file; anything fancier can slot in behind the same trait.
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use log::warn;

use crate::error::Error;

/// Sentinel tag for words the tagger does not know. Never an error.
pub const UNKNOWN_TAG: &str = "N/A";

/// Penn Treebank tagset, the row/column vocabulary of the transition matrix.
pub const POS_TAGS: [&str; 36] = [
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN",
    "NNS", "NNP", "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS",
    "RP", "SYM", "TO", "UH", "VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT",
    "WP", "WP$", "WRB",
];

lazy_static! {
    static ref TAG_SET: HashSet<&'static str> = POS_TAGS.iter().copied().collect();
}

/// Canonicalizes a tag label into the fixed vocabulary, `None` if unknown.
pub fn vocab_tag(label: &str) -> Option<&'static str> {
    TAG_SET.get(label).copied()
}

/// Assigns a part-of-speech label to a single word.
///
/// Implementations must be total: any input gets a label, with
/// [`UNKNOWN_TAG`] as the fallback.
pub trait PosTagger: Send + Sync {
    fn tag<'a>(&'a self, word: &str) -> &'a str;
}

/// Lookup tagger over a word to tag lexicon.
pub struct LexiconTagger {
    entries: HashMap<String, String>,
}

impl LexiconTagger {
    /// Reads a lexicon file: one `word<whitespace>TAG` pair per line.
    /// Malformed lines are skipped with a warning.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        let mut entries = HashMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(word), Some(tag)) => {
                    entries.insert(word.to_lowercase(), tag.to_string());
                }
                _ => warn!("lexicon {:?}: skipping malformed line {}", path, idx + 1),
            }
        }
        Ok(LexiconTagger { entries })
    }
}

impl PosTagger for LexiconTagger {
    fn tag<'a>(&'a self, word: &str) -> &'a str {
        self.entries
            .get(word)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TAG)
    }
}

/// Tagger used when no lexicon is configured: everything is unknown.
pub struct NullTagger;

impl PosTagger for NullTagger {
    fn tag<'a>(&'a self, _word: &str) -> &'a str {
        UNKNOWN_TAG
    }
}

/// Builds the configured tagger, falling back to [`NullTagger`].
pub fn load_tagger(lexicon: Option<&Path>) -> Result<Box<dyn PosTagger>, Error> {
    match lexicon {
        Some(path) => Ok(Box::new(LexiconTagger::from_path(path)?)),
        None => {
            warn!("no tagger lexicon configured, all words will tag as {}", UNKNOWN_TAG);
            Ok(Box::new(NullTagger))
        }
    }
}
