//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

use crate::error::Error;
use crate::lang::Lang;

#[derive(Debug, StructOpt)]
#[structopt(name = "corpustat", about = "corpus statistics tool.")]
/// Holds every analysis that is callable by the `corpustat` command.
pub enum Corpustat {
    #[structopt(about = "Word/phrase frequency analysis")]
    Frequency(AnalysisOpts),
    #[structopt(about = "Part-of-speech transition analysis")]
    PosFrequency(AnalysisOpts),
    #[structopt(about = "Collocates of the most frequent words")]
    GeneralCollocate(AnalysisOpts),
    #[structopt(about = "Collocates of an explicit word list")]
    SpecificCollocate(AnalysisOpts),
}

#[derive(Debug, StructOpt)]
/// Parameters shared by every analysis subcommand.
pub struct AnalysisOpts {
    #[structopt(
        short = "l",
        long = "language",
        possible_values = &Lang::CODES,
        help = "corpus language code"
    )]
    pub language: String,
    #[structopt(
        short = "d",
        long = "dataset",
        help = "dataset identifier, must have a resources section in the config"
    )]
    pub dataset: String,
    #[structopt(
        parse(from_os_str),
        long = "config",
        default_value = "config.json",
        help = "configuration file"
    )]
    pub config: PathBuf,
}

impl AnalysisOpts {
    /// The parsed language. Clap has already checked the code against
    /// [`Lang::CODES`], this converts it.
    pub fn lang(&self) -> Result<Lang, Error> {
        Lang::from_str(&self.language)
    }
}
