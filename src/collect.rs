//! Local hash collection: every matching file in the working directory,
//! read line by line, comments and blanks dropped, first occurrence wins.
//!
//! Reading is permissive by design. Capture tooling occasionally leaves
//! stray bytes in hashlist files, and a bad byte must never abort a run, so
//! lines are decoded lossily instead of failing the read. Large hashlists
//! are memory-mapped; small ones go through a buffered reader.
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::Error;

/// File size above which input files are memory-mapped.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

/// Collect unique hash records from all `.{extension}` files in `dir`.
///
/// Files are processed in lexicographic filename order; within and across
/// files the first occurrence of a hash decides its position. Lines are
/// trimmed, and blank lines or `#` comments are skipped. No matching files
/// (or only empty ones) yields an empty vector, not an error.
pub fn collect_hashes(dir: &Path, extension: &str) -> Result<Vec<String>, Error> {
    collect_hashes_with_threshold(dir, extension, DEFAULT_MMAP_THRESHOLD_BYTES)
}

/// Same as [`collect_hashes`] with an explicit mmap threshold.
pub fn collect_hashes_with_threshold(
    dir: &Path,
    extension: &str,
    mmap_threshold_bytes: u64,
) -> Result<Vec<String>, Error> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut seen: HashSet<String> = HashSet::new();
    let mut ordered: Vec<String> = Vec::new();
    for path in &files {
        for line in read_lines(path, mmap_threshold_bytes)? {
            let line = line?;
            let hash = line.trim();
            if hash.is_empty() || hash.starts_with('#') {
                continue;
            }
            if seen.insert(hash.to_string()) {
                ordered.push(hash.to_string());
            }
        }
    }
    Ok(ordered)
}

type LineIter = Box<dyn Iterator<Item = io::Result<String>>>;

fn read_lines(path: &Path, threshold_bytes: u64) -> Result<LineIter, Error> {
    let file = File::open(path)?;
    if file.metadata()?.len() >= threshold_bytes {
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(Box::new(MmapLines { mmap, pos: 0 }))
    } else {
        let split = BufReader::new(file).split(b'\n');
        Ok(Box::new(split.map(|r| r.map(|b| decode_line(&b)))))
    }
}

struct MmapLines {
    mmap: Mmap,
    pos: usize,
}

impl Iterator for MmapLines {
    type Item = io::Result<String>;
    fn next(&mut self) -> Option<Self::Item> {
        let data: &[u8] = &self.mmap;
        if self.pos >= data.len() {
            return None;
        }
        let start = self.pos;
        match memchr::memchr(b'\n', &data[self.pos..]) {
            Some(off) => {
                let end = self.pos + off;
                self.pos = end + 1; // skip newline
                Some(Ok(decode_line(&data[start..end])))
            }
            None => {
                // Last line without trailing newline
                self.pos = data.len();
                Some(Ok(decode_line(&data[start..])))
            }
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    // Handle Windows CRLF
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
