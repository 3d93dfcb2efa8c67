//! JSONL (JSON Lines) storage.
//!
//! Each line is a JSON object holding one record. Lines that fail to parse
//! are skipped with a warning so one bad row never hides a whole match.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::{Event, Match};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single record to the file.
    pub fn append(&self, record: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended record to {:?}", self.path);
        Ok(())
    }

    /// Write records, replacing the entire file.
    pub fn write_all(&self, records: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
        }

        writer.flush()?;
        info!("Wrote {} records to {:?}", records.len(), self.path);

        Ok(records.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records from the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// Read all records, failing when the file does not exist.
    pub fn read_required(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }
        self.read_all()
    }
}

/// Read the event log. It must exist.
pub fn read_events(config: &StorageConfig) -> Result<Vec<Event>, StorageError> {
    JsonlReader::new(config.events_path()).read_required()
}

/// Read match descriptors. A missing file means every match is inferred.
pub fn read_matches(config: &StorageConfig) -> Result<Vec<Match>, StorageError> {
    JsonlReader::new(config.matches_path()).read_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, Side};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_events_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let events = vec![
            Event::new("m1")
                .with_action("Attaque USDK")
                .with_result("But USDK")
                .with_zone("Aile gauche")
                .at(61_000)
                .with_participant(Participant::attacker("Dika Mem", Side::A)),
            Event::new("m1").with_result_b("Tir arrêté Limoges"),
        ];

        let writer: JsonlWriter<Event> = JsonlWriter::new(config.events_path());
        assert_eq!(writer.write_all(&events).unwrap(), 2);

        let read = read_events(&config).unwrap();
        assert_eq!(read, events);
    }

    #[test]
    fn test_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("derived").join("append.jsonl");

        let writer: JsonlWriter<Match> = JsonlWriter::new(path.clone());
        writer
            .append(&Match::new("m1", Some("USDK"), Some("Limoges")))
            .unwrap();
        writer.append(&Match::new("m2", None, None)).unwrap();

        let reader: JsonlReader<Match> = JsonlReader::new(path);
        assert!(reader.exists());
        let matches = reader.read_all().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].home_team(), Some("USDK"));
    }

    #[test]
    fn test_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        assert!(!JsonlReader::<Match>::new(config.matches_path()).exists());
        assert!(read_matches(&config).unwrap().is_empty());
        assert!(matches!(
            read_events(&config),
            Err(StorageError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_read_all_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        std::fs::write(
            config.events_path(),
            concat!(
                "{\"match_id\":\"m1\",\"action_name\":\"attaque usdk\"}\n",
                "not json at all\n",
                "\n",
                "{\"match_id\":\"m1\",\"result_team_a\":\"but usdk\",\"timestamp_ms\":1200}\n",
            ),
        )
        .unwrap();

        let events = read_events(&config).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action(), "attaque usdk");
        assert_eq!(events[1].timestamp_ms, Some(1200));
    }

    #[test]
    fn test_match_descriptor_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        std::fs::write(
            config.matches_path(),
            "{\"id\":\"m1\",\"home_team\":\"USDK\",\"away_team\":\"Limoges\",\"date\":\"2024-09-12\",\"round\":3}\n",
        )
        .unwrap();

        let matches = read_matches(&config).unwrap();
        assert_eq!(matches[0].round, Some(3));
        assert_eq!(matches[0].display_label(), "USDK - Limoges");
    }
}
