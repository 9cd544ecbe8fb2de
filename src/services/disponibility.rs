//! Availability transitions (available / unavailable)

use crate::{
    console::{
        filter::FilterPredicate,
        partition::{compute, AvailabilityScheme, MoveDetails, PartitionScheme, Side},
    },
    error::{AppError, AppResult},
    models::{
        engine::EngineRecord,
        enums::Availability,
        listing::DisponibilityListing,
        movement::{EngineRef, MarkUnavailable, MoveRequest},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DisponibilityService {
    repository: Repository,
}

impl DisponibilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: &FilterPredicate) -> AppResult<DisponibilityListing> {
        let collection = self.repository.engines_collection().await?;
        let view = compute(&collection, filter, |r| AvailabilityScheme.side_of(r));
        Ok(DisponibilityListing {
            available: view.left,
            unavailable: view.right,
        })
    }

    pub async fn mark_available(&self, request: &EngineRef) -> AppResult<EngineRecord> {
        self.transition(&request.engine_id, Side::Left, MoveDetails::default())
            .await
    }

    pub async fn mark_unavailable(&self, request: &MarkUnavailable) -> AppResult<EngineRecord> {
        let details = MoveDetails {
            reason: request.reason.clone(),
            estimated_return: request.estimated_return,
            ..Default::default()
        };
        self.transition(&request.engine_id, Side::Right, details).await
    }

    /// Move to an explicit side, same rules as the dedicated routes
    pub async fn move_engine(&self, request: &MoveRequest) -> AppResult<EngineRecord> {
        match request.to {
            Availability::Available => {
                self.mark_available(&EngineRef {
                    engine_id: request.engine_id.clone(),
                })
                .await
            }
            Availability::Unavailable => {
                self.mark_unavailable(&MarkUnavailable {
                    engine_id: request.engine_id.clone(),
                    reason: request.reason.clone(),
                    estimated_return: request.estimated_return,
                })
                .await
            }
        }
    }

    async fn transition(&self, engine_id: &str, to: Side, details: MoveDetails) -> AppResult<EngineRecord> {
        let scheme = AvailabilityScheme;
        let record = self
            .repository
            .engines_modify(engine_id, |record| {
                if scheme.side_of(record) == to {
                    return Err(AppError::Conflict(format!(
                        "Engine {} is already {}",
                        record.id,
                        scheme.label(to)
                    )));
                }
                scheme.apply(record, to, &details)?;
                Ok(())
            })
            .await?;
        tracing::info!(engine_id, status = %record.status, "Availability changed");
        Ok(record)
    }
}
