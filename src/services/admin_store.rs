use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::config::StorageConfig;
use crate::errors::{StoreError, StoreResult};
use crate::models::{AdminForm, AdminRecord};
use super::lifecycle::ResetGuard;

// Columns that must be present for a row to be read back as a record.
const REQUIRED_COLUMNS: [&str; 4] = ["username", "email", "password", "role"];

/// Administrator roster backed by a single CSV file.
///
/// The file is the only state: every call reads or rewrites it. A process-wide
/// lock serialises calls so the duplicate-email check and the append that
/// follows it cannot interleave with another writer in this process.
pub struct AdminStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    headers: Vec<String>,
    lock: Mutex<()>,
}

impl AdminStore {
    /// Opens the roster at the configured path, creating a header-only file if needed.
    pub fn open(config: &StorageConfig) -> StoreResult<Self> {
        validate_headers(&config.csv_headers)?;

        let store = Self {
            inner: Arc::new(StoreInner {
                path: PathBuf::from(&config.csv_file_path),
                headers: config.csv_headers.clone(),
                lock: Mutex::new(()),
            }),
        };

        // A missing or zero-byte file gets the header row; anything else must
        // already carry the configured columns in the configured order
        let needs_header = match fs::metadata(store.path()) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = store.path().parent() {
                    fs::create_dir_all(parent)?;
                }
                true
            }
            Err(e) => return Err(e.into()),
        };

        if needs_header {
            store.write_header()?;
            tracing::info!("Initialised roster file {}", store.path().display());
        } else {
            store.check_header()?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn headers(&self) -> &[String] {
        &self.inner.headers
    }

    /// Validates the submission, rejects a known email, and appends one row.
    pub fn append(&self, form: AdminForm) -> StoreResult<AdminRecord> {
        let record = form.into_record().ok_or(StoreError::MissingFields)?;

        let _guard = self.lock();
        if self.read_all()?.iter().any(|existing| existing.email == record.email) {
            return Err(StoreError::DuplicateEmail(record.email));
        }

        let file = OpenOptions::new().append(true).open(self.path())?;
        let mut writer = csv::Writer::from_writer(file);
        let row: Vec<&str> = self
            .headers()
            .iter()
            .map(|name| record.field(name).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
        writer.flush()?;

        tracing::debug!("Appended admin {} to {}", record.email, self.path().display());
        Ok(record)
    }

    /// All records in file order.
    pub fn list(&self) -> StoreResult<Vec<AdminRecord>> {
        let _guard = self.lock();
        self.read_all()
    }

    /// Truncates the roster back to its header row.
    pub fn reset(&self) -> StoreResult<()> {
        let _guard = self.lock();
        self.write_header()
    }

    /// Guard that resets the roster when it goes out of scope.
    pub fn reset_on_drop(&self) -> ResetGuard {
        ResetGuard::new(self.clone())
    }

    fn read_all(&self) -> StoreResult<Vec<AdminRecord>> {
        let mut reader = csv::Reader::from_path(self.path())?;
        let mut records = Vec::new();
        for row in reader.deserialize::<AdminRecord>() {
            records.push(row?);
        }
        Ok(records)
    }

    fn check_header(&self) -> StoreResult<()> {
        let mut reader = csv::Reader::from_path(self.path())?;
        let found: Vec<&str> = reader.headers()?.iter().collect();
        if found != self.headers() {
            return Err(StoreError::HeaderMismatch {
                expected: self.headers().join(","),
                found: found.join(","),
            });
        }
        Ok(())
    }

    fn write_header(&self) -> StoreResult<()> {
        let mut writer = csv::Writer::from_path(self.path())?;
        writer.write_record(self.headers())?;
        writer.flush()?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The lock guards no data, so a poisoned lock is still usable
        self.inner.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for AdminStore {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone()
        }
    }
}

fn validate_headers(headers: &[String]) -> StoreResult<()> {
    if let Some(unknown) = headers
        .iter()
        .find(|h| !AdminRecord::FIELDS.contains(&h.as_str()))
    {
        return Err(StoreError::UnknownField(unknown.clone()));
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|c| !headers.iter().any(|h| h == *c))
    {
        return Err(StoreError::MissingColumn(missing.to_string()));
    }
    Ok(())
}
