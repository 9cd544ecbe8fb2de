//! Multi-criteria engine filter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::models::{engine::EngineRecord, enums::EngineType};

use super::partition::Side;

/// Active filter values of one view. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct FilterPredicate {
    /// Case-insensitive substring over id, designation, location and operator
    pub search: Option<String>,
    pub engine_type: Option<EngineType>,
    pub family: Option<String>,
    pub demandeur: Option<String>,
    /// Inclusive lower bound on the assignment date
    pub date_from: Option<NaiveDate>,
    /// Restrict the view to one side
    pub side: Option<Side>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FilterPredicate {
    pub fn is_empty(&self) -> bool {
        active(&self.search).is_none()
            && self.engine_type.is_none()
            && active(&self.family).is_none()
            && active(&self.demandeur).is_none()
            && self.date_from.is_none()
            && self.side.is_none()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_type(mut self, engine_type: EngineType) -> Self {
        self.engine_type = Some(engine_type);
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_demandeur(mut self, demandeur: impl Into<String>) -> Self {
        self.demandeur = Some(demandeur.into());
        self
    }

    pub fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Match every record-level criterion. `side` is applied by `compute`.
    pub fn matches(&self, record: &EngineRecord) -> bool {
        self.matches_search(record)
            && self.engine_type.map_or(true, |t| record.engine_type == t)
            && active(&self.family).map_or(true, |f| record.family == f)
            && active(&self.demandeur)
                .map_or(true, |d| record.metadata.demandeur.as_deref() == Some(d))
            && self.date_from.map_or(true, |from| {
                record.metadata.date_affectation.is_some_and(|date| date >= from)
            })
    }

    fn matches_search(&self, record: &EngineRecord) -> bool {
        let Some(term) = active(&self.search) else {
            return true;
        };
        let term = term.to_lowercase();
        [
            Some(record.id.as_str()),
            Some(record.designation.as_str()),
            record.metadata.location.as_deref(),
            record.metadata.operator.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}
