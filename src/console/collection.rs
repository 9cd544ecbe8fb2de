//! Insertion-ordered store of engine records owned by one session

use indexmap::IndexMap;

use crate::{
    error::ValidationError,
    models::engine::{EngineDraft, EngineRecord},
};

#[derive(Debug, Clone, Default)]
pub struct EngineCollection {
    records: IndexMap<String, EngineRecord>,
}

impl EngineCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate ids
    pub fn from_records(records: Vec<EngineRecord>) -> Result<Self, ValidationError> {
        let mut collection = Self::new();
        collection.load(records)?;
        Ok(collection)
    }

    /// Replace the whole collection. On a duplicate id the previous
    /// contents are left untouched.
    pub fn load(&mut self, records: Vec<EngineRecord>) -> Result<(), ValidationError> {
        let mut loaded = IndexMap::with_capacity(records.len());
        for record in records {
            if loaded.contains_key(&record.id) {
                return Err(ValidationError::DuplicateId(record.id));
            }
            loaded.insert(record.id.clone(), record);
        }
        self.records = loaded;
        Ok(())
    }

    /// Insert or replace by id. A replaced record keeps its position.
    pub fn upsert(&mut self, record: EngineRecord) -> Result<Option<EngineRecord>, ValidationError> {
        record.check()?;
        Ok(self.records.insert(record.id.clone(), record))
    }

    pub fn upsert_draft(&mut self, draft: EngineDraft) -> Result<Option<EngineRecord>, ValidationError> {
        self.upsert(EngineRecord::try_from(draft)?)
    }

    /// Write back a snapshot taken from this collection, skipping validation
    pub(crate) fn restore(&mut self, record: EngineRecord) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn remove(&mut self, id: &str) -> Option<EngineRecord> {
        self.records.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&EngineRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &EngineRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
