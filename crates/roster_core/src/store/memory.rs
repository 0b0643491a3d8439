//! In-memory record store for tests and throwaway sessions.

use super::{RecordKey, RecordStore, StoreError, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Single-threaded store that also keeps a log of every write.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RefCell<BTreeMap<RecordKey, String>>,
    writes: RefCell<Vec<RecordKey>>,
    unavailable: Cell<bool>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value without touching the write log.
    pub fn insert_raw(&self, key: RecordKey, value: impl Into<String>) {
        self.records.borrow_mut().insert(key, value.into());
    }

    pub fn raw(&self, key: RecordKey) -> Option<String> {
        self.records.borrow().get(&key).cloned()
    }

    /// Keys written so far, in write order.
    pub fn write_log(&self) -> Vec<RecordKey> {
        self.writes.borrow().clone()
    }

    pub fn clear_write_log(&self) {
        self.writes.borrow_mut().clear();
    }

    /// Makes every subsequent read and write fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.unavailable.get() {
            return Err(StoreError::Unavailable(
                "memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_record(&self, key: RecordKey) -> StoreResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.raw(key))
    }

    fn write_record(&self, key: RecordKey, value: &str) -> StoreResult<()> {
        self.ensure_available()?;
        self.records.borrow_mut().insert(key, value.to_string());
        self.writes.borrow_mut().push(key);
        Ok(())
    }
}
