//! Assignment of engines to requesting departments

use crate::{
    console::{
        filter::FilterPredicate,
        partition::{compute, AssignmentScheme, MoveDetails, PartitionScheme, Side},
        stats::FleetStats,
    },
    error::{AppError, AppResult},
    models::{
        engine::EngineRecord,
        enums::Availability,
        listing::AffectationListing,
        movement::{AssignRequest, EngineRef},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AffectationService {
    repository: Repository,
}

impl AffectationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: &FilterPredicate) -> AppResult<AffectationListing> {
        let collection = self.repository.engines_collection().await?;
        let view = compute(&collection, filter, |r| AssignmentScheme.side_of(r));
        Ok(AffectationListing {
            available: view.left,
            affected: view.right,
        })
    }

    pub async fn stats(&self) -> AppResult<FleetStats> {
        let collection = self.repository.engines_collection().await?;
        let view = compute(&collection, &FilterPredicate::default(), |r| AssignmentScheme.side_of(r));
        Ok(FleetStats::from_view(&view))
    }

    /// Assign an available, unassigned engine
    pub async fn assign(&self, request: &AssignRequest) -> AppResult<EngineRecord> {
        let details = MoveDetails {
            demandeur: Some(request.demandeur.clone()),
            date_affectation: request.date_affectation,
            operator: request.operator.clone(),
            ..Default::default()
        };
        let record = self
            .repository
            .engines_modify(&request.engine_id, |record| {
                if record.status == Availability::Unavailable {
                    return Err(AppError::Conflict(format!("Engine {} is unavailable", record.id)));
                }
                if record.is_assigned() {
                    return Err(AppError::Conflict(format!("Engine {} is already affected", record.id)));
                }
                AssignmentScheme.apply(record, Side::Right, &details)?;
                Ok(())
            })
            .await?;
        tracing::info!(engine_id = %record.id, demandeur = %request.demandeur, "Engine assigned");
        Ok(record)
    }

    pub async fn unassign(&self, request: &EngineRef) -> AppResult<EngineRecord> {
        let record = self
            .repository
            .engines_modify(&request.engine_id, |record| {
                if !record.is_assigned() {
                    return Err(AppError::Conflict(format!("Engine {} is not affected", record.id)));
                }
                AssignmentScheme.apply(record, Side::Left, &MoveDetails::default())?;
                Ok(())
            })
            .await?;
        tracing::info!(engine_id = %record.id, "Engine unassigned");
        Ok(record)
    }
}
