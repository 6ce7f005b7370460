//! Language registry.
//!
//! Analyses run on one language at a time; the supported set is fixed and
//! doubles as the filename prefix for raw corpus files and partitions
//! (`en.*`, `en_part_000.txt`, ...).
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Languages a corpus can be ingested and analysed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Nl,
    En,
    Es,
    De,
    Fr,
    Pl,
    It,
    No,
    Pt,
    Sv,
    Ru,
}

impl Lang {
    /// Language codes, usable as clap/structopt `possible_values`.
    pub const CODES: [&'static str; 11] = [
        "nl", "en", "es", "de", "fr", "pl", "it", "no", "pt", "sv", "ru",
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Nl => "nl",
            Lang::En => "en",
            Lang::Es => "es",
            Lang::De => "de",
            Lang::Fr => "fr",
            Lang::Pl => "pl",
            Lang::It => "it",
            Lang::No => "no",
            Lang::Pt => "pt",
            Lang::Sv => "sv",
            Lang::Ru => "ru",
        }
    }
}

impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nl" => Ok(Lang::Nl),
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            "de" => Ok(Lang::De),
            "fr" => Ok(Lang::Fr),
            "pl" => Ok(Lang::Pl),
            "it" => Ok(Lang::It),
            "no" => Ok(Lang::No),
            "pt" => Ok(Lang::Pt),
            "sv" => Ok(Lang::Sv),
            "ru" => Ok(Lang::Ru),
            other => Err(Error::UnknownLang(other.to_string())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
