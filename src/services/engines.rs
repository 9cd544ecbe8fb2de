//! Engine catalog service

use crate::{
    console::{
        filter::FilterPredicate,
        partition::{compute, AvailabilityScheme, PartitionScheme},
        stats::FleetStats,
    },
    error::{AppError, AppResult},
    models::{
        bulk::{BulkCreateResponse, BulkDeleteResponse, BulkRowError, BulkUpdateResponse},
        engine::{EngineDraft, EngineRecord},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EnginesService {
    repository: Repository,
}

impl EnginesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: &FilterPredicate) -> AppResult<Vec<EngineRecord>> {
        Ok(self.repository.engines_list(filter).await)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<EngineRecord> {
        self.repository.engines_get_by_id(id).await
    }

    pub async fn create(&self, record: EngineRecord) -> AppResult<EngineRecord> {
        record.check()?;
        let created = self.repository.engines_create(record).await?;
        tracing::info!(engine_id = %created.id, "Engine created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, record: EngineRecord) -> AppResult<EngineRecord> {
        record.check()?;
        self.repository.engines_update(id, record).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.engines_delete(id).await?;
        tracing::info!(engine_id = id, "Engine deleted");
        Ok(())
    }

    /// Create every valid row; invalid or duplicate rows are reported by index
    pub async fn bulk_create(&self, drafts: Vec<EngineDraft>) -> AppResult<BulkCreateResponse> {
        let mut response = BulkCreateResponse::default();
        for (index, draft) in drafts.into_iter().enumerate() {
            let engine_id = draft.id.as_deref().map(str::trim).map(str::to_string);
            let outcome = match EngineRecord::try_from(draft) {
                Ok(record) => self.repository.engines_create(record).await,
                Err(e) => Err(e.into()),
            };
            match outcome {
                Ok(record) => response.created_engines.push(record),
                Err(e) => response.errors.push(row_error(index, engine_id, e)),
            }
        }
        tracing::info!(
            created = response.created_engines.len(),
            rejected = response.errors.len(),
            "Bulk create finished"
        );
        Ok(response)
    }

    pub async fn bulk_update(&self, records: Vec<EngineRecord>) -> AppResult<BulkUpdateResponse> {
        let mut response = BulkUpdateResponse::default();
        for (index, record) in records.into_iter().enumerate() {
            let engine_id = record.id.clone();
            match self.update(&engine_id, record).await {
                Ok(record) => response.updated_engines.push(record),
                Err(e) => response.errors.push(row_error(index, Some(engine_id), e)),
            }
        }
        Ok(response)
    }

    pub async fn bulk_delete(&self, engine_ids: Vec<String>) -> AppResult<BulkDeleteResponse> {
        let mut response = BulkDeleteResponse::default();
        for (index, engine_id) in engine_ids.into_iter().enumerate() {
            match self.repository.engines_delete(&engine_id).await {
                Ok(()) => response.deleted_engines.push(engine_id),
                Err(e) => response.errors.push(row_error(index, Some(engine_id), e)),
            }
        }
        Ok(response)
    }

    /// Dashboard figures over the availability partition
    pub async fn stats(&self) -> AppResult<FleetStats> {
        let collection = self.repository.engines_collection().await?;
        let view = compute(&collection, &FilterPredicate::default(), |r| AvailabilityScheme.side_of(r));
        Ok(FleetStats::from_view(&view))
    }
}

fn row_error(index: usize, engine_id: Option<String>, error: AppError) -> BulkRowError {
    let message = match error {
        AppError::Validation(e) => e.to_string(),
        AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Conflict(msg) => msg,
        other => other.to_string(),
    };
    BulkRowError {
        index,
        engine_id: engine_id.filter(|id| !id.is_empty()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Availability, EngineType};

    async fn service() -> EnginesService {
        let repository = Repository::new();
        let mut down = EngineRecord::new("E2", "Forklift", "CHARIOT ELEVATEUR ELECTRIQUE", EngineType::Roulants);
        down.status = Availability::Unavailable;
        repository
            .engines_seed(vec![EngineRecord::new("E1", "Crane", "GRUES MOBILES", EngineType::Levage), down])
            .await
            .unwrap();
        EnginesService::new(repository)
    }

    fn draft(id: &str, engine_type: &str) -> EngineDraft {
        EngineDraft {
            id: Some(id.into()),
            designation: Some("Nacelle".into()),
            family: Some("ACCESSOIRES MANUTENTION".into()),
            engine_type: Some(engine_type.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn bulk_create_reports_bad_rows_and_keeps_good_ones() {
        let service = service().await;

        let response = service
            .bulk_create(vec![draft("E3", "Accessoires"), draft("E1", "Levage"), draft("E4", "Boat")])
            .await
            .unwrap();

        assert_eq!(response.created_engines.len(), 1);
        assert_eq!(response.created_engines[0].id, "E3");
        let failed: Vec<usize> = response.errors.iter().map(|e| e.index).collect();
        assert_eq!(failed, vec![1, 2]);
        assert_eq!(response.errors[0].engine_id.as_deref(), Some("E1"));
    }

    #[tokio::test]
    async fn bulk_delete_reports_unknown_ids() {
        let service = service().await;

        let response = service.bulk_delete(vec!["E1".into(), "E9".into()]).await.unwrap();

        assert_eq!(response.deleted_engines, vec!["E1"]);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Engine E9 not found");
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let service = service().await;
        let invalid = EngineRecord::new("bad id", "Crane", "GRUES MOBILES", EngineType::Levage);
        assert!(matches!(service.create(invalid).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn stats_follow_availability() {
        let stats = service().await.stats().await.unwrap();
        assert_eq!((stats.total, stats.left, stats.right), (2, 1, 1));
        assert_eq!(stats.left_rate, 50);
    }
}
