//! # Corpustat
//!
//! Corpustat turns large raw text corpora into bounded sets of normalized
//! partition files and runs statistical analyses over them in parallel:
//! word/phrase frequency, part-of-speech transition frequency and two
//! collocate extractions. Results land as CSV next to the corpus.
//!
//! ## Getting started
//!
//! ```sh
//! corpustat 0.2.0
//! corpus statistics tool.
//!
//! USAGE:
//!     corpustat <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     frequency             Word/phrase frequency analysis
//!     general-collocate     Collocates of the most frequent words
//!     help                  Prints this message or the help of the given subcommand(s)
//!     pos-frequency         Part-of-speech transition analysis
//!     specific-collocate    Collocates of an explicit word list
//! ```
//!
//! Partitions are (re)built on demand: the first analysis over a corpus
//! ingests the raw `<lang>.*` files, later ones reuse the partition files.
use log::{debug, info};
use structopt::StructOpt;

use corpustat::analysis::{
    Analysis, FrequencyAnalysis, GeneralCollocateAnalysis, PosFrequencyAnalysis,
    SpecificCollocateAnalysis,
};
use corpustat::cli;
use corpustat::config::Config;
use corpustat::error::Error;
use corpustat::lang::Lang;
use corpustat::tag::load_tagger;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Corpustat::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Corpustat::Frequency(args) => {
            let (config, lang) = setup(&args)?;
            let tagger = load_tagger(config.tagger_lexicon.as_deref())?;
            FrequencyAnalysis::new(&config, lang, &args.dataset, tagger.as_ref()).run()?;
        }
        cli::Corpustat::PosFrequency(args) => {
            let (config, lang) = setup(&args)?;
            let tagger = load_tagger(config.tagger_lexicon.as_deref())?;
            PosFrequencyAnalysis::new(&config, lang, &args.dataset, tagger.as_ref()).run()?;
        }
        cli::Corpustat::GeneralCollocate(args) => {
            let (config, lang) = setup(&args)?;
            let tagger = load_tagger(config.tagger_lexicon.as_deref())?;
            GeneralCollocateAnalysis::new(&config, lang, &args.dataset, tagger.as_ref()).run()?;
        }
        cli::Corpustat::SpecificCollocate(args) => {
            let (config, lang) = setup(&args)?;
            SpecificCollocateAnalysis::new(&config, lang, &args.dataset).run()?;
        }
    };
    Ok(())
}

fn setup(args: &cli::AnalysisOpts) -> Result<(Config, Lang), Error> {
    let config = Config::from_path(&args.config)?;
    let lang = args.lang()?;
    info!("language {}, dataset {}", lang, args.dataset);
    Ok((config, lang))
}
