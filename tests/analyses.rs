use std::fs;
use std::path::Path;

use corpustat::analysis::{
    Analysis, FrequencyAnalysis, GeneralCollocateAnalysis, PosFrequencyAnalysis,
    SpecificCollocateAnalysis,
};
use corpustat::config::Config;
use corpustat::counting::TOTAL_KEY;
use corpustat::error::Error;
use corpustat::lang::Lang;
use corpustat::tag::{load_tagger, PosTagger, POS_TAGS};

const CONFIG: &str = r#"{
    "resource_path": "resources",
    "n_processors": 2,
    "resources": { "subtitles": { "chunk_size": 64 } },
    "tagger_lexicon": "lexicon.tsv",
    "frequency": { "n_most_common": 10 },
    "specific_collocate": { "n": 1, "words_of_interest_filename": "words.txt" }
}"#;

const LEXICON: &str = "the\tDT\nquick\tJJ\nbrown\tJJ\nfox\tNN\ndog\tNN\njumps\tVBZ\nhigh\tRB\n";

const CORPUS: &str = "The quick brown fox\nthe quick dog\nfox jumps high\n";

/// Lays out a corpus, a tagger lexicon and a word list next to a config file.
fn workspace() -> (tempfile::TempDir, Config) {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("config.json"), CONFIG).unwrap();
    fs::write(root.path().join("lexicon.tsv"), LEXICON).unwrap();
    fs::write(root.path().join("words.txt"), "fox\n").unwrap();

    let corpus_dir = root.path().join("resources/subtitles/en");
    fs::create_dir_all(&corpus_dir).unwrap();
    fs::write(corpus_dir.join("en.txt"), CORPUS).unwrap();

    let config = Config::from_path(&root.path().join("config.json")).unwrap();
    (root, config)
}

fn tagger(config: &Config) -> Box<dyn PosTagger> {
    load_tagger(config.tagger_lexicon.as_deref()).unwrap()
}

fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .unwrap()
        .into_records()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn frequency_report_end_to_end() {
    let (_root, config) = workspace();
    let tagger = tagger(&config);

    let counts = FrequencyAnalysis::new(&config, Lang::En, "subtitles", tagger.as_ref())
        .run()
        .unwrap();

    assert_eq!(counts.get("the"), 2);
    assert_eq!(counts.get("fox"), 2);
    assert_eq!(counts.get("brown"), 1);
    assert_eq!(counts.len(), 7);

    let report = config
        .results_dir(Lang::En, "subtitles")
        .join("en_frequency.csv");
    let rows = read_rows(&report);
    assert_eq!(
        rows[0],
        vec!["phrase", "type", "count", "relative_frequency"]
    );
    // ties on the count fall back to alphabetical order
    assert_eq!(rows[1], vec!["fox", "NN", "2", "0.2"]);
    assert_eq!(rows[2].get(0), Some("quick"));
    assert_eq!(rows[3].get(0), Some("the"));
    assert_eq!(rows.len(), 8);
}

#[test]
fn pos_transition_report_end_to_end() {
    let (_root, config) = workspace();
    let tagger = tagger(&config);

    let matrix = PosFrequencyAnalysis::new(&config, Lang::En, "subtitles", tagger.as_ref())
        .run()
        .unwrap();

    let jj = POS_TAGS.iter().position(|tag| *tag == "JJ").unwrap();
    let nn = POS_TAGS.iter().position(|tag| *tag == "NN").unwrap();
    assert_eq!(matrix.probabilities("DT")[jj], 1.0);
    let jj_row = matrix.probabilities("JJ");
    assert!((jj_row[jj] - 1.0 / 3.0).abs() < 1e-12);
    assert!((jj_row[nn] - 2.0 / 3.0).abs() < 1e-12);

    let report = config
        .results_dir(Lang::En, "subtitles")
        .join("en_pos_frequency.csv");
    let rows = read_rows(&report);
    assert_eq!(rows.len(), POS_TAGS.len() + 1);
    assert_eq!(rows[0].get(0), Some("pos"));
    assert_eq!(rows[0].len(), POS_TAGS.len() + 1);

    let jj_report = rows.iter().find(|row| row.get(0) == Some("JJ")).unwrap();
    let cell: f64 = jj_report.get(1 + nn).unwrap().parse().unwrap();
    assert!((cell - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn general_collocates_build_on_the_frequency_report() {
    let (_root, config) = workspace();
    let tagger = tagger(&config);

    FrequencyAnalysis::new(&config, Lang::En, "subtitles", tagger.as_ref())
        .run()
        .unwrap();
    let counts = GeneralCollocateAnalysis::new(&config, Lang::En, "subtitles", tagger.as_ref())
        .run()
        .unwrap();

    let the = counts.get("the").unwrap();
    assert_eq!(the.get("quick"), 2);
    assert_eq!(the.get("brown"), 1);
    let fox = counts.get("fox").unwrap();
    assert_eq!(fox.get("jumps"), 1);
    assert_eq!(fox.get("quick"), 1);

    let report = config
        .results_dir(Lang::En, "subtitles")
        .join("en_general_collocate.csv");
    let rows = read_rows(&report);
    assert_eq!(
        rows[0],
        vec![
            "word",
            "collocate",
            "count",
            "relative_frequency",
            "word_type",
            "collocate_type"
        ]
    );
    assert_eq!(rows[1], vec!["brown", "fox", "1", "1.0", "JJ", "NN"]);
    let the_quick = rows
        .iter()
        .find(|row| row.get(0) == Some("the") && row.get(1) == Some("quick"))
        .unwrap();
    assert_eq!(the_quick.get(2), Some("2"));
    assert_eq!(the_quick.get(3), Some("1.0"));
    assert_eq!(rows.len(), 21);
}

#[test]
fn specific_collocates_report_windows_and_totals() {
    let (_root, config) = workspace();
    let tagger = tagger(&config);

    FrequencyAnalysis::new(&config, Lang::En, "subtitles", tagger.as_ref())
        .run()
        .unwrap();
    let counts = SpecificCollocateAnalysis::new(&config, Lang::En, "subtitles")
        .run()
        .unwrap();

    // "fox" closes one line, so only its other occurrence opens a window
    let fox = counts.get("fox").unwrap();
    assert_eq!(fox.get(TOTAL_KEY), 2);
    assert_eq!(fox.get("jumps"), 1);

    let report = config
        .results_dir(Lang::En, "subtitles")
        .join("en_specific_collocate.csv");
    let rows = read_rows(&report);
    assert_eq!(rows[0].len(), 32);
    assert_eq!(rows[0].get(0), Some("word"));
    assert_eq!(rows[0].get(2), Some("collocate_1"));
    assert_eq!(rows[1], vec!["fox", "2", "jumps", "1", "1"]);
    assert_eq!(rows.len(), 2);
}

#[test]
fn specific_collocates_require_a_word_list() {
    let (root, _) = workspace();
    // same config without the word list entry
    let stripped = CONFIG.replace(r#", "words_of_interest_filename": "words.txt""#, "");
    fs::write(root.path().join("config.json"), stripped).unwrap();
    let config = Config::from_path(&root.path().join("config.json")).unwrap();

    match SpecificCollocateAnalysis::new(&config, Lang::En, "subtitles").run() {
        Err(Error::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn empty_corpus_yields_an_empty_table() {
    let (root, config) = workspace();
    let corpus = root.path().join("resources/subtitles/en/en.txt");
    fs::write(&corpus, "").unwrap();
    let tagger = tagger(&config);

    let counts = FrequencyAnalysis::new(&config, Lang::En, "subtitles", tagger.as_ref())
        .run()
        .unwrap();

    assert!(counts.is_empty());
    assert!(config
        .results_dir(Lang::En, "subtitles")
        .join("en_frequency.csv")
        .exists());
}
