//! Saved plate storage.
//!
//! Two backends behind one enum: a thread-safe in-memory list for tests
//! and throwaway sessions, and a persistent `redb`-backed store. Entries
//! are kept in insertion order; the redb backend assigns monotonically
//! increasing keys and stores each entry as a JSON value.

use std::fmt;
use std::sync::{Arc, RwLock};

use redb::{ReadableTable, ReadableTableMetadata};
use serde::{Deserialize, Serialize};

use crate::plate::{plate_number, skipped_vowels, PlateData};

/// One saved derivation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlateEntry {
    /// The raw input the plate was derived from.
    pub input: String,
    /// The derived plate number.
    pub plate_number: String,
    /// Vowels elided during derivation, in order.
    pub vowels: String,
}

impl SavedPlateEntry {
    /// Snapshot a derivation result into a storable entry.
    pub fn from_plate(data: &PlateData) -> Self {
        SavedPlateEntry {
            input: data.input.clone(),
            plate_number: plate_number(&data.candidates),
            vowels: skipped_vowels(&data.candidates),
        }
    }
}

/// Storage failure: either the database or entry (de)serialization.
#[derive(Debug)]
pub enum StoreError {
    Db(redb::Error),
    Codec(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Db(e) => write!(f, "database error: {e}"),
            StoreError::Codec(e) => write!(f, "entry codec error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Db(e) => Some(e),
            StoreError::Codec(e) => Some(e),
        }
    }
}

impl From<redb::Error> for StoreError {
    fn from(e: redb::Error) -> Self {
        StoreError::Db(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e)
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Clone)]
pub struct InMemorySavedPlates {
    inner: Arc<RwLock<Vec<SavedPlateEntry>>>,
}

impl InMemorySavedPlates {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, entry: SavedPlateEntry) {
        if let Ok(mut entries) = self.inner.write() {
            entries.push(entry);
        }
    }

    pub fn list(&self) -> Vec<SavedPlateEntry> {
        if let Ok(entries) = self.inner.read() {
            entries.clone()
        } else {
            Vec::new()
        }
    }

    pub fn remove(&self, index: usize) -> Option<SavedPlateEntry> {
        if let Ok(mut entries) = self.inner.write() {
            if index < entries.len() {
                return Some(entries.remove(index));
            }
        }
        None
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.inner.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySavedPlates {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistent store backed by redb.
pub struct RedbSavedPlates {
    db: redb::Database,
    #[allow(dead_code)]
    path: std::path::PathBuf,
}

impl fmt::Debug for RedbSavedPlates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbSavedPlates")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbSavedPlates {
    /// Entries keyed by a monotonically increasing id, valued as JSON.
    const TABLE: redb::TableDefinition<'static, u64, &'static str> =
        redb::TableDefinition::new("saved_plates");

    /// Create or open a store at `path`. The table is created up front so
    /// reads on a fresh database succeed.
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref()).map_err(redb::Error::from)?;
        let write_txn = db.begin_write().map_err(redb::Error::from)?;
        write_txn
            .open_table(Self::TABLE)
            .map_err(redb::Error::from)?;
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(RedbSavedPlates {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn add(&self, entry: &SavedPlateEntry) -> Result<(), StoreError> {
        let json = serde_json::to_string(entry)?;
        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = write_txn
                .open_table(Self::TABLE)
                .map_err(redb::Error::from)?;
            let next_id = table
                .last()
                .map_err(redb::Error::from)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(0);
            table
                .insert(next_id, json.as_str())
                .map_err(redb::Error::from)?;
        }
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<SavedPlateEntry>, StoreError> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = read_txn
            .open_table(Self::TABLE)
            .map_err(redb::Error::from)?;
        let mut out = Vec::new();
        for item in table.iter().map_err(redb::Error::from)? {
            let (_, value) = item.map_err(redb::Error::from)?;
            out.push(serde_json::from_str(value.value())?);
        }
        Ok(out)
    }

    /// Remove the entry at `index` in insertion order.
    pub fn remove(&self, index: usize) -> Result<Option<SavedPlateEntry>, StoreError> {
        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        let removed = {
            let mut table = write_txn
                .open_table(Self::TABLE)
                .map_err(redb::Error::from)?;
            let key = {
                let mut keys = Vec::new();
                for item in table.iter().map_err(redb::Error::from)? {
                    let (k, _) = item.map_err(redb::Error::from)?;
                    keys.push(k.value());
                }
                keys.get(index).copied()
            };
            match key {
                Some(k) => match table.remove(k).map_err(redb::Error::from)? {
                    Some(value) => Some(serde_json::from_str(value.value())?),
                    None => None,
                },
                None => None,
            }
        };
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(removed)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = write_txn
                .open_table(Self::TABLE)
                .map_err(redb::Error::from)?;
            let keys: Vec<u64> = {
                let mut keys = Vec::new();
                for item in table.iter().map_err(redb::Error::from)? {
                    let (k, _) = item.map_err(redb::Error::from)?;
                    keys.push(k.value());
                }
                keys
            };
            for k in keys {
                table.remove(k).map_err(redb::Error::from)?;
            }
        }
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = read_txn
            .open_table(Self::TABLE)
            .map_err(redb::Error::from)?;
        Ok(table.len().map_err(redb::Error::from)? as usize)
    }
}

/// Backend switch used by higher-level code.
#[derive(Debug)]
pub enum SavedPlates {
    InMemory(InMemorySavedPlates),
    Redb(RedbSavedPlates),
}

impl SavedPlates {
    pub fn new_in_memory() -> Self {
        SavedPlates::InMemory(InMemorySavedPlates::new())
    }

    pub fn new_redb<P: AsRef<std::path::Path>>(path: P) -> Result<Self, StoreError> {
        Ok(SavedPlates::Redb(RedbSavedPlates::new(path)?))
    }

    pub fn add(&self, entry: SavedPlateEntry) -> Result<(), StoreError> {
        match self {
            SavedPlates::InMemory(m) => {
                m.add(entry);
                Ok(())
            }
            SavedPlates::Redb(r) => r.add(&entry),
        }
    }

    pub fn list(&self) -> Result<Vec<SavedPlateEntry>, StoreError> {
        match self {
            SavedPlates::InMemory(m) => Ok(m.list()),
            SavedPlates::Redb(r) => r.list(),
        }
    }

    pub fn remove(&self, index: usize) -> Result<Option<SavedPlateEntry>, StoreError> {
        match self {
            SavedPlates::InMemory(m) => Ok(m.remove(index)),
            SavedPlates::Redb(r) => r.remove(index),
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match self {
            SavedPlates::InMemory(m) => {
                m.clear();
                Ok(())
            }
            SavedPlates::Redb(r) => r.clear(),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        match self {
            SavedPlates::InMemory(m) => Ok(m.len()),
            SavedPlates::Redb(r) => r.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process;

    fn entry(input: &str) -> SavedPlateEntry {
        SavedPlateEntry::from_plate(&process(input))
    }

    fn temp_db_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("libspz_{}_{}.redb", name, std::process::id()))
    }

    #[test]
    fn entry_from_plate() {
        let e = entry("platenumber");
        assert_eq!(e.input, "platenumber");
        assert_eq!(e.plate_number, "PL4TNMBR");
        assert_eq!(e.vowels, "EUE");
    }

    #[test]
    fn in_memory_add_list_remove() {
        let store = InMemorySavedPlates::new();
        assert!(store.is_empty());
        store.add(entry("abc"));
        store.add(entry("def"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].input, "abc");

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.input, "abc");
        assert_eq!(store.len(), 1);
        assert!(store.remove(5).is_none());

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn redb_round_trip() {
        let path = temp_db_path("round_trip");
        let _ = std::fs::remove_file(&path);

        let store = RedbSavedPlates::new(&path).unwrap();
        store.add(&entry("abc")).unwrap();
        store.add(&entry("platenumber")).unwrap();
        assert_eq!(store.len().unwrap(), 2);

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].plate_number, "PL4TNMBR");

        let removed = store.remove(0).unwrap().unwrap();
        assert_eq!(removed.input, "abc");
        assert_eq!(store.len().unwrap(), 1);

        store.clear().unwrap();
        assert_eq!(store.len().unwrap(), 0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn redb_persists_across_reopen() {
        let path = temp_db_path("reopen");
        let _ = std::fs::remove_file(&path);

        {
            let store = RedbSavedPlates::new(&path).unwrap();
            store.add(&entry("abc")).unwrap();
        }
        {
            let store = RedbSavedPlates::new(&path).unwrap();
            let listed = store.list().unwrap();
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].input, "abc");
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn enum_delegates_to_backend() {
        let store = SavedPlates::new_in_memory();
        store.add(entry("abc")).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.list().unwrap()[0].input, "abc");
        assert!(store.remove(0).unwrap().is_some());
        store.clear().unwrap();
        assert_eq!(store.len().unwrap(), 0);
    }
}
