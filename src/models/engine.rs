//! Engine model

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{FieldError, ValidationError};

use super::enums::{Availability, EngineType};

static ENGINE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]*$").unwrap());

/// Range checks let NaN through
fn finite(value: f64) -> Result<(), validator::ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("finite");
        error.message = Some("Must be a number".into());
        Err(error)
    }
}

/// Partition-specific free-form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineMetadata {
    /// Requesting department for an assignment (e.g. SMA, DEPA)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandeur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_affectation: Option<NaiveDate>,
    /// Why the engine is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_return: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// One physical fleet asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineRecord {
    #[validate(
        length(min = 1, max = 20, message = "ID is required and cannot exceed 20 characters"),
        regex(path = *ENGINE_ID_RE, message = "ID must contain only uppercase letters and digits")
    )]
    pub id: String,
    #[validate(length(min = 1, max = 100, message = "Designation is required and cannot exceed 100 characters"))]
    pub designation: String,
    /// Normalized family (famille normalisée)
    #[serde(alias = "familleNormalisee", alias = "famille_normalisee")]
    #[validate(length(min = 1, max = 50, message = "Family is required and cannot exceed 50 characters"))]
    pub family: String,
    #[serde(rename = "type")]
    pub engine_type: EngineType,
    #[serde(default)]
    #[validate(
        range(min = 0.0, max = 999999.0, message = "Operating hours must be between 0 and 999999"),
        custom(function = "finite")
    )]
    pub operating_hours: f64,
    /// Zero for electric assets
    #[serde(default)]
    #[validate(
        range(min = 0.0, max = 9999.99, message = "Fuel consumption must be between 0 and 9999.99"),
        custom(function = "finite")
    )]
    pub fuel_consumption: f64,
    #[serde(default)]
    pub status: Availability,
    #[serde(default)]
    pub metadata: EngineMetadata,
}

impl EngineRecord {
    pub fn new(
        id: impl Into<String>,
        designation: impl Into<String>,
        family: impl Into<String>,
        engine_type: EngineType,
    ) -> Self {
        Self {
            id: id.into(),
            designation: designation.into(),
            family: family.into(),
            engine_type,
            operating_hours: 0.0,
            fuel_consumption: 0.0,
            status: Availability::Available,
            metadata: EngineMetadata::default(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.metadata.demandeur.is_some()
    }

    /// Run the field rules, converting to the console's error type
    pub fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}

/// Raw engine input, as typed into a form or read from an import row
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineDraft {
    pub id: Option<String>,
    pub designation: Option<String>,
    #[serde(alias = "familleNormalisee", alias = "famille_normalisee")]
    pub family: Option<String>,
    #[serde(rename = "type")]
    pub engine_type: Option<String>,
    pub operating_hours: Option<f64>,
    pub fuel_consumption: Option<f64>,
    pub status: Option<Availability>,
    pub metadata: EngineMetadata,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl TryFrom<EngineDraft> for EngineRecord {
    type Error = ValidationError;

    /// Reports every invalid field at once
    fn try_from(draft: EngineDraft) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let engine_type = match draft.engine_type.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError {
                    field: "type".to_string(),
                    message: "Type is required".to_string(),
                });
                None
            }
            Some(raw) => match raw.parse::<EngineType>() {
                Ok(t) => Some(t),
                Err(message) => {
                    errors.push(FieldError {
                        field: "type".to_string(),
                        message,
                    });
                    None
                }
            },
        };

        let record = EngineRecord {
            id: trimmed(draft.id),
            designation: trimmed(draft.designation),
            family: trimmed(draft.family),
            engine_type: engine_type.unwrap_or(EngineType::Levage),
            operating_hours: draft.operating_hours.unwrap_or(0.0),
            fuel_consumption: draft.fuel_consumption.unwrap_or(0.0),
            status: draft.status.unwrap_or_default(),
            metadata: draft.metadata,
        };

        if let Err(e) = record.check() {
            errors.extend(e.field_errors());
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(ValidationError::Fields(errors))
        }
    }
}

impl From<&EngineRecord> for EngineDraft {
    fn from(record: &EngineRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            designation: Some(record.designation.clone()),
            family: Some(record.family.clone()),
            engine_type: Some(record.engine_type.to_string()),
            operating_hours: Some(record.operating_hours),
            fuel_consumption: Some(record.fuel_consumption),
            status: Some(record.status),
            metadata: record.metadata.clone(),
        }
    }
}
