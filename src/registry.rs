//! Request building for the facility registry and the eligibility check.
//!
//! These turn what a user picked (or what the patient record holds) into
//! the filter objects the HIE expects, rejecting incomplete input with a
//! message that can be shown as-is.

use serde::Deserialize;

use crate::session::SessionContext;
use crate::types::eligibility::{EligibilityFilterDto, RequestIdType};
use crate::types::facility::{FacilityFilterType, FacilitySearchFilter};
use crate::validation::{ValidationError, ValidationResult};

/// Map the registry's filter selector to the HIE filter type.
///
/// `registration_number` searches by registration number; `location`,
/// `facility_code` and anything else search by MFL code.
pub fn facility_filter_type(selected: &str) -> FacilityFilterType {
    match selected {
        "registration_number" => FacilityFilterType::RegistrationNumber,
        _ => FacilityFilterType::FacilityCode,
    }
}

/// Build a facility search filter from the registry form.
pub fn facility_search_filter(
    selected_filter: Option<&str>,
    value: &str,
    session: &SessionContext,
) -> ValidationResult<FacilitySearchFilter> {
    let selected = selected_filter
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::new("filterType", "Please select a filter type"))?;

    if value.trim().is_empty() {
        return Err(ValidationError::new(
            "filterValue",
            "Please select a filter value",
        ));
    }

    let location = session.location().ok_or_else(|| {
        ValidationError::new(
            "locationUuid",
            "Please make sure you have set your default facility location",
        )
    })?;

    Ok(FacilitySearchFilter {
        filter_type: facility_filter_type(selected),
        filter_value: value.trim().to_string(),
        location_uuid: location.to_string(),
    })
}

/// An identifier on a patient record, as exposed by the host's patient API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatientIdentifier {
    /// Identifier type name, e.g. `"CR Number"`, `"National ID"`.
    pub type_text: String,
    pub value: String,
}

impl PatientIdentifier {
    pub fn new(type_text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_text: type_text.into(),
            value: value.into(),
        }
    }
}

/// First identifier whose type name contains `name`, case-insensitively.
pub fn find_identifier<'a>(
    identifiers: &'a [PatientIdentifier],
    name: &str,
) -> Option<&'a PatientIdentifier> {
    let needle = name.trim().to_lowercase();
    identifiers
        .iter()
        .find(|id| id.type_text.trim().to_lowercase().contains(&needle))
}

/// Build the eligibility filter for a patient.
///
/// The client registry (CR) id is preferred; the national id is used when
/// the patient has no CR id. With neither, id type and number stay empty
/// and [`validate_eligibility_filter`] rejects the payload.
pub fn eligibility_filter(
    identifiers: &[PatientIdentifier],
    session: &SessionContext,
) -> EligibilityFilterDto {
    let resolved = find_identifier(identifiers, "CR")
        .map(|id| (RequestIdType::CrId, id))
        .or_else(|| find_identifier(identifiers, "National").map(|id| (RequestIdType::NationalId, id)));

    let (request_id_type, request_id_number) = match resolved {
        Some((kind, id)) => (kind.code().to_string(), id.value.trim().to_string()),
        None => (String::new(), String::new()),
    };

    EligibilityFilterDto {
        request_id_type,
        request_id_number,
        location_uuid: session.location().unwrap_or_default().to_string(),
    }
}

/// An eligibility filter is sendable only with location, id number and id type.
pub fn validate_eligibility_filter(filter: &EligibilityFilterDto) -> ValidationResult<()> {
    if filter.location_uuid.trim().is_empty() {
        return Err(ValidationError::new("locationUuid", "session location is required"));
    }
    if filter.request_id_number.trim().is_empty() {
        return Err(ValidationError::new(
            "requestIdNumber",
            "patient has no CR or national id",
        ));
    }
    if filter.request_id_type.trim().is_empty() {
        return Err(ValidationError::new("requestIdType", "identifier type is required"));
    }
    Ok(())
}
