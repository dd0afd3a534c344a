//! JSONL (JSON Lines) files.
//!
//! One JSON object per line. Readers skip blank lines and log malformed ones
//! instead of failing the whole file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn write_to(&self, file: File, entities: &[T]) -> Result<usize, StorageError> {
        let mut writer = BufWriter::new(file);
        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
        }
        writer.flush()?;
        Ok(entities.len())
    }

    /// Append entities to the end of the file, creating it if needed.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }

        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let count = self.write_to(file, entities)?;
        debug!("Appended {} entities to {:?}", count, self.path);
        Ok(count)
    }

    /// Replace the file contents with `entities`.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;
        let count = self.write_to(File::create(&self.path)?, entities)?;
        debug!("Wrote {} entities to {:?}", count, self.path);
        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every parseable entity. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();

        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes?;
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping non-UTF-8 line {} in {:?}: {}", idx + 1, self.path, e);
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoundScore;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn round(score: f64, day: u32) -> RoundScore {
        RoundScore::new(score, Utc.with_ymd_and_hms(2025, 7, day, 8, 30, 0).unwrap())
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rounds.jsonl");
        let rounds = vec![round(74.0, 1), round(71.0, 8)];

        let writer: JsonlWriter<RoundScore> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&rounds).unwrap(), 2);

        let reader: JsonlReader<RoundScore> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), rounds);
    }

    #[test]
    fn test_jsonl_append_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("rounds.jsonl");

        let writer: JsonlWriter<RoundScore> = JsonlWriter::new(path.clone());
        writer.append_batch(&[round(75.0, 1)]).unwrap();
        writer.append_batch(&[round(73.0, 2), round(72.0, 3)]).unwrap();
        assert_eq!(writer.append_batch(&[]).unwrap(), 0);

        let reader: JsonlReader<RoundScore> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_jsonl_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<RoundScore> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_skips_blank_and_malformed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mixed.jsonl");
        fs::write(
            &path,
            "{\"score\":72.0,\"date\":\"2025-07-01T08:30:00Z\"}\n\nnot json\n{\"score\":70.0,\"date\":\"2025-07-02T08:30:00Z\"}\n",
        )
        .unwrap();

        let reader: JsonlReader<RoundScore> = JsonlReader::new(path);
        let rounds = reader.read_all().unwrap();

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].score, 70.0);
    }

    #[test]
    fn test_jsonl_skips_invalid_utf8_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.jsonl");

        let mut contents = b"{\"score\":72.0,\"date\":\"2025-07-01T08:30:00Z\"}\n".to_vec();
        contents.extend_from_slice(b"\xff\xfe garbage\n");
        contents.extend_from_slice(b"{\"score\":70.0,\"date\":\"2025-07-02T08:30:00Z\"}\r\n");
        fs::write(&path, contents).unwrap();

        let reader: JsonlReader<RoundScore> = JsonlReader::new(path);
        let rounds = reader.read_all().unwrap();

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].score, 72.0);
        assert_eq!(rounds[1].score, 70.0);
    }
}
