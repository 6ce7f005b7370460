//! Line normalization.
//!
//! Raw corpus lines go through a fixed pipeline before any counting:
//! lowercase, character folding, punctuation stripping, whitespace
//! tokenization and configured edge trims. The output is what every analysis
//! sees, so the same function runs during ingestion for all datasets.
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

lazy_static! {
    /// Multi-character folds that have to happen before punctuation removal.
    static ref NORM_TABLE: HashMap<char, &'static str> = [
        ('œ', "oe"),
        ('æ', "ae"),
        ('ß', "ss"),
        ('ĳ', "ij"),
        ('ﬁ', "fi"),
        ('ﬂ', "fl"),
    ]
    .into_iter()
    .collect();

    /// Characters deleted outright: ASCII punctuation plus the typographic
    /// variants subtitle and book sources are full of.
    static ref PUNC_TABLE: HashSet<char> = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##
        .chars()
        .chain("«»„“”‘’‚‹›¡¿…–—−·•′″".chars())
        .collect();
}

/// Normalizes a single raw line into a clean token sequence.
///
/// `lstrip`/`rstrip` drop that many tokens from the line edges, which is how
/// per-dataset metadata columns (timestamps, cue ids) are shed. Trimming more
/// tokens than the line has yields an empty string.
pub fn normalize_line(line: &str, lstrip: usize, rstrip: usize) -> String {
    let mut cleaned = String::with_capacity(line.len());
    for c in line.chars() {
        for lc in c.to_lowercase() {
            match NORM_TABLE.get(&lc) {
                Some(folded) => cleaned.push_str(folded),
                None => {
                    if !PUNC_TABLE.contains(&lc) {
                        cleaned.push(lc);
                    }
                }
            }
        }
    }

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let keep = tokens
        .len()
        .saturating_sub(lstrip)
        .saturating_sub(rstrip);
    let kept: Vec<&str> = tokens.into_iter().skip(lstrip).take(keep).collect();
    kept.join(" ")
}
