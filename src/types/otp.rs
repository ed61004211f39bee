//! Custom OTP verification of a client's identity through the HIE.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity documents a client can be verified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationIdentifierType {
    #[serde(rename = "National ID")]
    NationalId,
    #[serde(rename = "Refugee ID")]
    RefugeeId,
    #[serde(rename = "Alien ID")]
    AlienId,
    #[serde(rename = "Mandate Number")]
    MandateNumber,
}

impl VerificationIdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationIdentifierType::NationalId => "National ID",
            VerificationIdentifierType::RefugeeId => "Refugee ID",
            VerificationIdentifierType::AlienId => "Alien ID",
            VerificationIdentifierType::MandateNumber => "Mandate Number",
        }
    }
}

impl fmt::Display for VerificationIdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCustomOtpDto {
    pub identification_number: String,
    pub identification_type: VerificationIdentifierType,
    pub location_uuid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCustomOtpResponse {
    pub message: String,
    /// Handle to quote back when validating the code.
    pub session_id: String,
    /// Phone number the code was sent to, e.g. `07******89`.
    pub masked_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateHieCustomOtpDto {
    pub session_id: String,
    pub otp: String,
    pub location_uuid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpValidationStatus {
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpValidationData {
    pub identification_type: String,
    pub identification_number: String,
    pub status: OtpValidationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateHieCustomOtpResponse {
    pub data: OtpValidationData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ValidateHieCustomOtpResponse {
    pub fn is_valid(&self) -> bool {
        self.data.status == OtpValidationStatus::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_dto_uses_display_names() {
        let dto = RequestCustomOtpDto {
            identification_number: "12345678".to_string(),
            identification_type: VerificationIdentifierType::NationalId,
            location_uuid: "18c343eb-b353-462a-9139-b16606e6b6c2".to_string(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["identificationType"], "National ID");
        assert_eq!(json["identificationNumber"], "12345678");
    }

    #[test]
    fn parse_validation_response() {
        let json = r#"{
            "data": {
                "identification_type": "National ID",
                "identification_number": "12345678",
                "status": "valid"
            },
            "source": "hie"
        }"#;
        let resp: ValidateHieCustomOtpResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_valid());
        assert_eq!(resp.source.as_deref(), Some("hie"));

        let invalid: ValidateHieCustomOtpResponse = serde_json::from_str(
            r#"{"data": {"identification_type": "National ID", "identification_number": "1", "status": "invalid"}}"#,
        )
        .unwrap();
        assert!(!invalid.is_valid());
    }
}
