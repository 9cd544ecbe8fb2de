//! Aggregate statistics over a partition view (dashboard cards)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::enums::EngineType;

use super::partition::{PartitionView, Side};

/// Left/right counts for one engine type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    pub engine_type: EngineType,
    pub left: usize,
    pub right: usize,
}

/// Engines on the right side per requesting department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemandeurCount {
    pub demandeur: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total: usize,
    pub left: usize,
    pub right: usize,
    /// Share of engines on the left side, in percent, rounded
    pub left_rate: u32,
    pub by_type: Vec<TypeBreakdown>,
    pub by_demandeur: Vec<DemandeurCount>,
    pub total_operating_hours: f64,
    pub average_fuel_consumption: f64,
}

impl FleetStats {
    pub fn from_view(view: &PartitionView) -> Self {
        let total = view.len();
        let left_rate = if total > 0 {
            ((view.left.len() as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let by_type = EngineType::ALL
            .into_iter()
            .map(|engine_type| TypeBreakdown {
                engine_type,
                left: view.left.iter().filter(|r| r.engine_type == engine_type).count(),
                right: view.right.iter().filter(|r| r.engine_type == engine_type).count(),
            })
            .collect();

        let mut by_demandeur: Vec<DemandeurCount> = Vec::new();
        for demandeur in view.side(Side::Right).iter().filter_map(|r| r.metadata.demandeur.as_deref()) {
            match by_demandeur.iter_mut().find(|d| d.demandeur == demandeur) {
                Some(entry) => entry.count += 1,
                None => by_demandeur.push(DemandeurCount {
                    demandeur: demandeur.to_string(),
                    count: 1,
                }),
            }
        }

        let total_operating_hours = view.records().map(|r| r.operating_hours).sum();
        let average_fuel_consumption = if total > 0 {
            view.records().map(|r| r.fuel_consumption).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            total,
            left: view.left.len(),
            right: view.right.len(),
            left_rate,
            by_type,
            by_demandeur,
            total_operating_hours,
            average_fuel_consumption,
        }
    }
}
