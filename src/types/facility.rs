//! Facility registry records.

use serde::{Deserialize, Serialize};

use crate::tags::StatusFlag;

/// A health facility as known to the HIE facility registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HieFacility {
    pub id: String,
    pub facility_name: String,
    #[serde(default)]
    pub registration_number: String,
    /// Master facility list (MFL) code.
    pub facility_code: String,
    #[serde(default)]
    pub regulator: String,
    #[serde(default)]
    pub facility_level: String,
    #[serde(default)]
    pub facility_category: String,
    #[serde(default)]
    pub facility_owner: String,
    #[serde(default)]
    pub facility_type: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub sub_county: String,
    #[serde(default)]
    pub ward: String,
    #[serde(default)]
    pub found: Option<StatusFlag>,
    #[serde(default)]
    pub approved: Option<StatusFlag>,
    #[serde(default)]
    pub operational_status: String,
    #[serde(default)]
    pub current_license_expiry_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HieFacilitySearchResponse {
    #[serde(default)]
    pub message: Option<HieFacility>,
}

/// Which facility identifier a search filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacilityFilterType {
    FacilityCode,
    RegistrationNumber,
}

impl FacilityFilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityFilterType::FacilityCode => "facilityCode",
            FacilityFilterType::RegistrationNumber => "registrationNumber",
        }
    }
}

/// Query sent to the facility search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySearchFilter {
    pub filter_type: FacilityFilterType,
    pub filter_value: String,
    pub location_uuid: String,
}
