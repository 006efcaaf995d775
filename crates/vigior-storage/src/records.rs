use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use vigior_core::models::patient_record::PatientRecord;

use crate::error::StorageError;
use crate::search::matches_keyword;

/// Patient records in a JSON-lines file.
///
/// Not internally synchronized: callers sharing one store across tasks wrap
/// it in a mutex. Notes edits are last-writer-wins.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Open a store at `path`, creating the parent directory if needed.
    /// The file itself is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), "record store opened");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order. A missing file is an empty store.
    pub fn list(&self) -> Result<Vec<PatientRecord>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StorageError::Corrupt {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn get(&self, id: &str) -> Result<PatientRecord, StorageError> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    /// Records matching `keyword` (see [`matches_keyword`]).
    pub fn search(&self, keyword: &str) -> Result<Vec<PatientRecord>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| matches_keyword(r, keyword))
            .collect())
    }

    /// Append one record. Existing lines are never touched.
    pub fn append(&self, record: &PatientRecord) -> Result<(), StorageError> {
        if self.list()?.iter().any(|r| r.id == record.id) {
            return Err(StorageError::DuplicateId {
                id: record.id.clone(),
            });
        }

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        file.flush()?;

        tracing::info!(id = %record.id, treatment = record.recommendation.treatment.as_str(), "record appended");
        Ok(())
    }

    /// Replace the clinical notes of one record and stamp `updated_at`.
    pub fn update_notes(&self, id: &str, notes: &str) -> Result<PatientRecord, StorageError> {
        let mut records = self.list()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })?;

        record.notes = notes.to_string();
        record.updated_at = Some(jiff::Timestamp::now());
        let updated = record.clone();

        self.rewrite(&records)?;
        tracing::info!(id = %id, "record notes updated");
        Ok(updated)
    }

    /// Write all records to a temp file, then rename over the store.
    fn rewrite(&self, records: &[PatientRecord]) -> Result<(), StorageError> {
        let mut body = Vec::new();
        for record in records {
            serde_json::to_writer(&mut body, record)?;
            body.push(b'\n');
        }

        let tmp_path = self.path.with_extension("jsonl.tmp");
        fs::write(&tmp_path, &body)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "record store rewritten");
        Ok(())
    }
}
