//! Insurance eligibility records (SHA/SHIF schemes) for a patient.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tags::{classify, Category, StatusFlag};

/// Identifier kinds understood by the eligibility endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestIdType {
    BirthCertificate,
    CrId,
    NationalId,
    Refugee,
    TemporaryId,
    TempDependantId,
    MandateNo,
    Passport,
    BirthCertificate2,
    HouseholdNumber,
}

impl RequestIdType {
    pub fn code(&self) -> u8 {
        match self {
            RequestIdType::BirthCertificate => 2,
            RequestIdType::CrId => 3,
            RequestIdType::NationalId => 4,
            RequestIdType::Refugee => 5,
            RequestIdType::TemporaryId => 6,
            RequestIdType::TempDependantId => 7,
            RequestIdType::MandateNo => 8,
            RequestIdType::Passport => 9,
            RequestIdType::BirthCertificate2 => 10,
            RequestIdType::HouseholdNumber => 11,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        let kind = match code {
            2 => RequestIdType::BirthCertificate,
            3 => RequestIdType::CrId,
            4 => RequestIdType::NationalId,
            5 => RequestIdType::Refugee,
            6 => RequestIdType::TemporaryId,
            7 => RequestIdType::TempDependantId,
            8 => RequestIdType::MandateNo,
            9 => RequestIdType::Passport,
            10 => RequestIdType::BirthCertificate2,
            11 => RequestIdType::HouseholdNumber,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for RequestIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query sent to the eligibility endpoint. Id type and number are strings
/// on the wire; an empty string means "not resolved".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityFilterDto {
    pub request_id_type: String,
    pub request_id_number: String,
    pub location_uuid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub possible_solution: Option<String>,
    /// `"1"` when coverage is active.
    #[serde(default)]
    pub status: Option<StatusFlag>,
}

impl Coverage {
    pub fn category(&self) -> Category {
        classify(self.status.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job_group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalContributor {
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cr_number: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub employer_details: Option<EmployerDetails>,
}

/// One insurance scheme the patient is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub scheme_name: String,
    /// `"BENEFICIARY"` or `"PRINCIPAL"`.
    #[serde(default)]
    pub member_type: String,
    /// e.g. `"SHIF"`.
    #[serde(default)]
    pub coverage_type: String,
    #[serde(default)]
    pub policy: Option<Policy>,
    pub coverage: Coverage,
    #[serde(default)]
    pub principal_contributor: Option<PrincipalContributor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HieClientEligibility {
    pub request_id_type: u8,
    pub request_id_number: String,
    #[serde(default)]
    pub member_cr_number: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub schemes: Vec<Scheme>,
}

impl HieClientEligibility {
    pub fn request_id_kind(&self) -> Option<RequestIdType> {
        RequestIdType::from_code(self.request_id_type)
    }

    /// Whether any scheme currently covers the patient.
    pub fn has_active_coverage(&self) -> bool {
        self.schemes.iter().any(|s| s.coverage.category().is_positive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELIGIBILITY_JSON: &str = r#"{
        "requestIdType": 3,
        "requestIdNumber": "CR1234567890",
        "memberCrNumber": "CR1234567890",
        "fullName": "John Kiprop",
        "schemes": [
            {
                "schemeName": "SHIF",
                "memberType": "BENEFICIARY",
                "coverageType": "SHIF",
                "policy": {"startDate": "2024-10-01", "endDate": "2025-09-30", "number": "P-1"},
                "coverage": {
                    "startDate": "2024-10-01",
                    "endDate": "2025-09-30",
                    "message": "Active",
                    "reason": "",
                    "possibleSolution": null,
                    "status": "1"
                },
                "principalContributor": {
                    "idNumber": "12345678",
                    "name": "Mary Kiprop",
                    "crNumber": "CR0987654321",
                    "relationship": "SPOUSE",
                    "employmentType": "EMPLOYED",
                    "employerDetails": {"name": "County Government", "jobGroup": "K"}
                }
            },
            {
                "schemeName": "Emergency, Chronic and Critical Illness Fund",
                "memberType": "BENEFICIARY",
                "coverageType": "ECCIF",
                "coverage": {"status": "0", "message": "Contributions not up to date"}
            }
        ]
    }"#;

    #[test]
    fn parse_eligibility_record() {
        let elig: HieClientEligibility = serde_json::from_str(ELIGIBILITY_JSON).unwrap();
        assert_eq!(elig.request_id_kind(), Some(RequestIdType::CrId));
        assert_eq!(elig.schemes.len(), 2);
        assert_eq!(elig.schemes[0].coverage.category(), Category::Positive);
        assert_eq!(elig.schemes[1].coverage.category(), Category::Negative);
        assert!(elig.schemes[1].policy.is_none());
        assert!(elig.has_active_coverage());
    }

    #[test]
    fn request_id_codes_round_trip() {
        for code in 2..=11 {
            let kind = RequestIdType::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(RequestIdType::from_code(1), None);
        assert_eq!(RequestIdType::NationalId.to_string(), "4");
    }
}
