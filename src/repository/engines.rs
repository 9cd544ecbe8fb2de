//! Engine domain methods on Repository

use crate::{
    console::{collection::EngineCollection, filter::FilterPredicate},
    error::{AppError, AppResult, ValidationError},
    models::engine::EngineRecord,
};

use super::Repository;

impl Repository {
    /// Replace all engines. Fails on duplicate ids without touching storage.
    pub async fn engines_seed(&self, records: Vec<EngineRecord>) -> AppResult<usize> {
        let collection = EngineCollection::from_records(records)?;
        let mut engines = self.engines.write().await;
        engines.clear();
        for record in collection.all() {
            engines.insert(record.id.clone(), record.clone());
        }
        Ok(engines.len())
    }

    /// List engines matching the filter, in insertion order
    pub async fn engines_list(&self, filter: &FilterPredicate) -> Vec<EngineRecord> {
        self.engines
            .read()
            .await
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Snapshot of all engines as a collection
    pub async fn engines_collection(&self) -> AppResult<EngineCollection> {
        let records = self.engines.read().await.values().cloned().collect();
        Ok(EngineCollection::from_records(records)?)
    }

    /// Get engine by ID
    pub async fn engines_get_by_id(&self, id: &str) -> AppResult<EngineRecord> {
        self.engines
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Insert a new engine
    pub async fn engines_create(&self, record: EngineRecord) -> AppResult<EngineRecord> {
        let mut engines = self.engines.write().await;
        if engines.contains_key(&record.id) {
            return Err(ValidationError::DuplicateId(record.id).into());
        }
        engines.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Replace an existing engine, keeping its position
    pub async fn engines_update(&self, id: &str, record: EngineRecord) -> AppResult<EngineRecord> {
        if record.id != id {
            return Err(AppError::BadRequest(format!(
                "Engine id {} does not match path id {}",
                record.id, id
            )));
        }
        let mut engines = self.engines.write().await;
        let slot = engines.get_mut(id).ok_or_else(|| not_found(id))?;
        *slot = record.clone();
        Ok(record)
    }

    /// Delete an engine
    pub async fn engines_delete(&self, id: &str) -> AppResult<()> {
        self.engines
            .write()
            .await
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    /// Check-and-set on one engine under the write lock. `change` may refuse
    /// the edit, in which case the stored record is left as it was.
    pub async fn engines_modify<F>(&self, id: &str, change: F) -> AppResult<EngineRecord>
    where
        F: FnOnce(&mut EngineRecord) -> AppResult<()>,
    {
        let mut engines = self.engines.write().await;
        let current = engines.get(id).ok_or_else(|| not_found(id))?;
        let mut updated = current.clone();
        change(&mut updated)?;
        engines.insert(id.to_string(), updated.clone());
        Ok(updated)
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Engine {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::EngineType;

    fn engine(id: &str) -> EngineRecord {
        EngineRecord::new(id, "Crane", "GRUES MOBILES", EngineType::Levage)
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids() {
        let repository = Repository::new();
        repository.engines_create(engine("E1")).await.unwrap();

        let err = repository.engines_create(engine("E1")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::DuplicateId(_))));
    }

    #[tokio::test]
    async fn refused_modification_keeps_stored_record() {
        let repository = Repository::new();
        repository.engines_create(engine("E1")).await.unwrap();

        let result = repository
            .engines_modify("E1", |r| {
                r.designation = "Changed".into();
                Err(AppError::Conflict("no".into()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(repository.engines_get_by_id("E1").await.unwrap().designation, "Crane");
    }

    #[tokio::test]
    async fn seed_with_duplicates_leaves_storage_untouched() {
        let repository = Repository::new();
        repository.engines_seed(vec![engine("E1")]).await.unwrap();

        assert!(repository.engines_seed(vec![engine("E2"), engine("E2")]).await.is_err());
        assert!(repository.engines_get_by_id("E1").await.is_ok());
    }

    #[tokio::test]
    async fn update_requires_matching_id() {
        let repository = Repository::new();
        repository.engines_create(engine("E1")).await.unwrap();

        let err = repository.engines_update("E1", engine("E2")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(matches!(
            repository.engines_update("E9", engine("E9")).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
