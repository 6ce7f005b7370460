//! Byte-window chunking of raw corpus files.
//!
//! A raw file is walked in `chunk_size` byte windows. The trailing partial
//! line of each window is carried into the next one, so every yielded chunk
//! ends on a line boundary and no line is ever split across two chunks. The
//! walk is strictly sequential, downstream processing of yielded chunks is
//! not.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::warn;

use crate::error::Error;

/// Sequential chunk iterator over one raw file.
///
/// Windows that do not decode as UTF-8 are dropped whole: the cursor still
/// advances, the carried overlap stays as it was, and the shared `skipped`
/// counter is bumped so the caller can surface the loss.
pub struct ChunkReader {
    file: File,
    chunk_size: u64,
    file_size: u64,
    consumed: u64,
    overlap: String,
    skipped: Arc<AtomicUsize>,
    done: bool,
}

impl ChunkReader {
    pub fn open(path: &Path, chunk_size: u64, skipped: Arc<AtomicUsize>) -> Result<Self, Error> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        Ok(ChunkReader {
            file,
            chunk_size,
            file_size,
            consumed: 0,
            overlap: String::new(),
            skipped,
            done: false,
        })
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }
}

impl Iterator for ChunkReader {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.consumed >= self.file_size {
                self.done = true;
                if self.overlap.is_empty() {
                    return None;
                }
                // last line of a file without a trailing newline
                return Some(Ok(std::mem::take(&mut self.overlap)));
            }

            let read_len = self.chunk_size.min(self.file_size - self.consumed) as usize;
            let mut buf = vec![0u8; read_len];
            if let Err(e) = self.file.read_exact(&mut buf) {
                self.done = true;
                return Some(Err(Error::Io(e)));
            }
            self.consumed += read_len as u64;

            let text = match String::from_utf8(buf) {
                Ok(text) => text,
                Err(_) => {
                    self.skipped.fetch_add(1, Ordering::Relaxed);
                    warn!("skipping undecodable {} byte window", read_len);
                    continue;
                }
            };

            let mut buffer = std::mem::take(&mut self.overlap);
            buffer.push_str(&text);

            match buffer.rfind('\n') {
                Some(idx) => {
                    self.overlap = buffer[idx + 1..].to_string();
                    buffer.truncate(idx);
                    if buffer.is_empty() {
                        continue;
                    }
                    return Some(Ok(buffer));
                }
                None => {
                    // no line boundary in this window, keep accumulating
                    self.overlap = buffer;
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn reader(content: &[u8], chunk_size: u64) -> (ChunkReader, Arc<AtomicUsize>) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        let skipped = Arc::new(AtomicUsize::new(0));
        let r = ChunkReader::open(file.path(), chunk_size, Arc::clone(&skipped)).unwrap();
        // the open handle keeps reading valid after the path goes away
        (r, skipped)
    }

    fn collect_lines(content: &[u8], chunk_size: u64) -> Vec<String> {
        let (r, _) = reader(content, chunk_size);
        r.map(Result::unwrap)
            .flat_map(|chunk| chunk.lines().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn every_line_exactly_once() {
        let content = b"the quick brown fox\njumps over\nthe lazy dog\nand naps\n";
        let expected: Vec<String> = std::str::from_utf8(content)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        for chunk_size in [1, 3, 7, 16, 1024] {
            assert_eq!(
                collect_lines(content, chunk_size),
                expected,
                "chunk_size {}",
                chunk_size
            );
        }
    }

    #[test]
    fn missing_trailing_newline_is_flushed() {
        assert_eq!(collect_lines(b"abc\ndef", 100), vec!["abc", "def"]);
        assert_eq!(collect_lines(b"abc\ndef", 2), vec!["abc", "def"]);
    }

    #[test]
    fn chunk_size_dividing_file_size_is_fine() {
        let content = b"aaaa\nbbbb\n"; // 10 bytes
        assert_eq!(collect_lines(content, 5), vec!["aaaa", "bbbb"]);
        assert_eq!(collect_lines(content, 10), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn chunks_end_on_line_boundaries() {
        let content = b"one two\nthree\nfour five six\nseven\n";
        let source: Vec<&str> = std::str::from_utf8(content).unwrap().lines().collect();
        let (r, _) = reader(content, 9);
        for chunk in r.map(Result::unwrap) {
            for line in chunk.lines() {
                assert!(source.contains(&line), "split line {:?}", line);
            }
        }
    }

    #[test]
    fn undecodable_window_is_skipped_and_counted() {
        // middle window is invalid utf-8
        let mut content = Vec::new();
        content.extend_from_slice(b"good line\n");
        content.extend_from_slice(&[0xff; 10]);
        content.extend_from_slice(b"\nmore text\n");
        let (r, skipped) = reader(&content, 10);

        let chunks: Vec<String> = r.map(Result::unwrap).collect();
        assert!(skipped.load(Ordering::Relaxed) >= 1);
        assert!(chunks.iter().any(|c| c.contains("good line")));
    }

    #[test]
    fn empty_file_yields_nothing() {
        let (r, _) = reader(b"", 8);
        assert_eq!(r.count(), 0);
    }
}
