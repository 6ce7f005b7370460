use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use corpustat::config::Config;
use corpustat::engine::WorkerPool;
use corpustat::error::Error;
use corpustat::io::PartitionStore;
use corpustat::lang::Lang;
use corpustat::normalize::normalize_line;

fn config_for(root: &Path, chunk_size: u64, lstrip: usize, rstrip: usize) -> Config {
    let raw = format!(
        r#"{{
            "resource_path": ".",
            "n_processors": 2,
            "resources": {{
                "subtitles": {{ "chunk_size": {}, "lstrip": {}, "rstrip": {} }}
            }}
        }}"#,
        chunk_size, lstrip, rstrip
    );
    let mut config: Config = serde_json::from_str(&raw).unwrap();
    config.resource_path = root.to_path_buf();
    config
}

fn write_raw(config: &Config, lang: Lang, name: &str, content: &str) {
    let dir = config.resource_dir(lang, "subtitles");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// Concatenates all partitions in slot order.
fn partition_text(config: &Config, lang: Lang) -> String {
    let store = PartitionStore::new(config, lang, "subtitles");
    store
        .list()
        .unwrap()
        .iter()
        .map(|path| fs::read_to_string(path).unwrap())
        .collect()
}

/// Pure ASCII so every window decodes regardless of the chunk size.
fn sample_corpus() -> String {
    let subjects = ["The fox", "A dog", "Some BIRDS", "My neighbour", "Old signs"];
    let verbs = ["jumps over", "runs past", "sleeps near", "watches"];
    let objects = ["the lazy dog!", "a quiet DEN.", "two green doors", "the water"];
    let mut lines = String::new();
    for i in 0..10 {
        let s = subjects[i % subjects.len()];
        let v = verbs[i * 7 % verbs.len()];
        let o = objects[i * 3 % objects.len()];
        lines.push_str(&format!("{} {} {}\n", s, v, o));
    }
    lines
}

#[test_log::test]
fn reconstruction_for_any_chunk_size() {
    let content = sample_corpus();
    let expected: String = content
        .lines()
        .map(|line| format!("{}\n", normalize_line(line, 0, 0)))
        .collect();

    let mut rng = StdRng::seed_from_u64(42);
    let mut sizes = vec![1, 2, content.len() as u64, content.len() as u64 + 50];
    sizes.extend((0..8).map(|_| rng.gen_range(3..400)));

    for chunk_size in sizes {
        let root = tempfile::tempdir().unwrap();
        let config = config_for(root.path(), chunk_size, 0, 0);
        write_raw(&config, Lang::En, "en.txt", &content);

        let pool = WorkerPool::new(2).unwrap();
        let parts = PartitionStore::new(&config, Lang::En, "subtitles")
            .load(&pool)
            .unwrap();
        assert!(!parts.is_empty(), "chunk_size {}", chunk_size);
        assert_eq!(
            partition_text(&config, Lang::En),
            expected,
            "chunk_size {}",
            chunk_size
        );
    }
}

#[test]
fn multibyte_lines_survive_ingestion() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path(), 4096, 0, 0);
    write_raw(&config, Lang::Fr, "fr.txt", "L'été à Paris\nUn cœur d'artichaut\n");

    let pool = WorkerPool::new(2).unwrap();
    let parts = PartitionStore::new(&config, Lang::Fr, "subtitles")
        .load(&pool)
        .unwrap();

    assert_eq!(parts.len(), 1);
    assert_eq!(
        partition_text(&config, Lang::Fr),
        "lété à paris\nun coeur dartichaut\n"
    );
}

#[test]
fn partitions_are_not_rebuilt_once_present() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path(), 32, 0, 0);
    write_raw(&config, Lang::En, "en.txt", "first version\nof the corpus\n");

    let pool = WorkerPool::new(1).unwrap();
    let store = PartitionStore::new(&config, Lang::En, "subtitles");
    let before = store.load(&pool).unwrap();
    let snapshot = partition_text(&config, Lang::En);

    // raw source changes go unnoticed once partitions exist
    write_raw(&config, Lang::En, "en.txt", "a completely different corpus\n");
    let after = store.load(&pool).unwrap();

    assert_eq!(before, after);
    assert_eq!(partition_text(&config, Lang::En), snapshot);
}

#[test_log::test]
fn undecodable_windows_do_not_abort_ingestion() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path(), 16, 0, 0);

    // the garbage fills one whole window, the neighbouring lines fill theirs
    let mut content = Vec::new();
    content.extend_from_slice(b"good first line\n");
    content.extend_from_slice(&[0xfe; 16]);
    content.extend_from_slice(b"good last line\n");
    let dir = config.resource_dir(Lang::De, "subtitles");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("de.txt"), &content).unwrap();

    let pool = WorkerPool::new(2).unwrap();
    PartitionStore::new(&config, Lang::De, "subtitles")
        .load(&pool)
        .unwrap();

    let text = partition_text(&config, Lang::De);
    assert!(text.contains("good first line"));
    assert!(text.contains("good last line"));
}

#[test]
fn ceiling_violation_rolls_back_and_a_larger_chunk_size_recovers() {
    let root = tempfile::tempdir().unwrap();
    let content = "a line of corpus text\n".repeat(100);

    let too_small = config_for(root.path(), 2, 0, 0);
    write_raw(&too_small, Lang::Fr, "fr.txt", &content);
    let pool = WorkerPool::new(1).unwrap();

    match PartitionStore::new(&too_small, Lang::Fr, "subtitles").load(&pool) {
        Err(Error::TooManyPartitions { expected, limit }) => assert!(expected > limit),
        other => panic!("expected TooManyPartitions, got {:?}", other),
    }
    assert!(!too_small.partition_dir(Lang::Fr, "subtitles").exists());

    let fixed = config_for(root.path(), 512, 0, 0);
    let parts = PartitionStore::new(&fixed, Lang::Fr, "subtitles")
        .load(&pool)
        .unwrap();
    assert!(!parts.is_empty());
}

#[test]
fn edge_trims_shed_metadata_columns() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path(), 64, 1, 1);
    write_raw(
        &config,
        Lang::En,
        "en.srt",
        "001 the quick fox x042\n002 a lazy dog x097\n",
    );

    let pool = WorkerPool::new(1).unwrap();
    PartitionStore::new(&config, Lang::En, "subtitles")
        .load(&pool)
        .unwrap();

    assert_eq!(partition_text(&config, Lang::En), "the quick fox\na lazy dog\n");
}

#[test]
fn slots_continue_across_raw_files() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path(), 16, 0, 0);
    write_raw(&config, Lang::Nl, "nl.aa", "een twee drie vier vijf\n");
    write_raw(&config, Lang::Nl, "nl.bb", "zes zeven acht negen tien\n");

    let pool = WorkerPool::new(2).unwrap();
    let parts = PartitionStore::new(&config, Lang::Nl, "subtitles")
        .load(&pool)
        .unwrap();

    assert!(parts.len() >= 2);
    let text = partition_text(&config, Lang::Nl);
    assert!(text.contains("een twee drie vier vijf"));
    assert!(text.contains("zes zeven acht negen tien"));
}
