//! Practitioner registry records returned by the HIE practitioner search.

use serde::{Deserialize, Deserializer, Serialize};

use crate::tags::StatusFlag;

/// Membership record held by the practitioner's licensing body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PractitionerMembership {
    pub id: String,
    /// Regulator status, e.g. `"Licensed"`.
    pub status: String,
    #[serde(default)]
    pub salutation: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub registration_id: String,
    #[serde(default)]
    pub external_reference_id: Option<String>,
    pub licensing_body: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub is_active: Option<StatusFlag>,
    #[serde(default)]
    pub is_withdrawn: Option<StatusFlag>,
    #[serde(default)]
    pub withdrawal_reason: Option<String>,
    #[serde(default)]
    pub withdrawal_date: Option<String>,
    #[serde(default)]
    pub license_expires_in_days: Option<String>,
}

/// A single practising license with its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractitionerLicense {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub external_reference_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub license_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub license_start: String,
    /// End of validity (`YYYY-MM-DD` or RFC 3339). May be empty on bad records.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub license_end: String,
}

/// Registry records send `null` for dates they do not have.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PractitionerLicense {
    pub fn new(
        id: &str,
        license_type: &str,
        license_start: &str,
        license_end: &str,
        external_reference_id: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            external_reference_id: external_reference_id.to_string(),
            license_type: license_type.to_string(),
            license_start: license_start.to_string(),
            license_end: license_end.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractitionerProfessionalDetails {
    pub professional_cadre: String,
    pub practice_type: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub subspecialty: Option<String>,
    #[serde(default)]
    pub discipline_name: Option<String>,
    #[serde(default)]
    pub educational_qualifications: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractitionerContacts {
    pub phone: String,
    pub email: String,
    pub postal_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractitionerIdentifiers {
    pub identification_type: String,
    pub identification_number: String,
    #[serde(default)]
    pub client_registry_id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
}

/// Full practitioner record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PractitionerMessage {
    pub membership: PractitionerMembership,
    #[serde(default)]
    pub licenses: Vec<PractitionerLicense>,
    pub professional_details: PractitionerProfessionalDetails,
    pub contacts: PractitionerContacts,
    pub identifiers: PractitionerIdentifiers,
}

/// `message` is either the record or an `{"error": ".."}` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum PractitionerPayload {
    Error { error: String },
    Found(Box<PractitionerMessage>),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PractitionerResponse {
    pub message: PractitionerPayload,
}

/// How a practitioner is looked up. Exactly one identifier is sent; when
/// several are set, national id wins over license number, which wins over
/// registration number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PractitionerSearchParams {
    pub national_id: Option<String>,
    pub license_number: Option<String>,
    pub registration_number: Option<String>,
    /// Ask the HIE to re-sync from the regulator instead of serving its cache.
    pub refresh: bool,
}

impl PractitionerSearchParams {
    pub fn by_national_id(id: impl Into<String>) -> Self {
        Self {
            national_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_license_number(number: impl Into<String>) -> Self {
        Self {
            license_number: Some(number.into()),
            ..Self::default()
        }
    }

    pub fn by_registration_number(number: impl Into<String>) -> Self {
        Self {
            registration_number: Some(number.into()),
            ..Self::default()
        }
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// The `(identifierType, identifierValue)` pair sent to the HIE, if any
    /// identifier is set.
    pub fn identifier(&self) -> Option<(&'static str, &str)> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }

        if let Some(id) = present(&self.national_id) {
            Some(("National ID", id))
        } else if let Some(number) = present(&self.license_number) {
            Some(("id", number))
        } else {
            present(&self.registration_number).map(|number| ("registration_number", number))
        }
    }
}

/// An active provider account in the local EMR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub location_id: i64,
    pub location_name: String,
    pub provider_id: i64,
    #[serde(default)]
    pub provider_names: Option<String>,
    pub national_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRACTITIONER_JSON: &str = r#"{
        "membership": {
            "id": "PUB-001",
            "status": "Licensed",
            "full_name": "Jane Wanjiku Doe",
            "first_name": "Jane",
            "middle_name": "Wanjiku",
            "last_name": "Doe",
            "registration_id": "A1234/2019",
            "licensing_body": "KMPDC",
            "is_active": 1,
            "is_withdrawn": 0,
            "license_expires_in_days": "120"
        },
        "licenses": [
            {
                "id": "LIC-1",
                "external_reference_id": "ext-1",
                "license_type": "Private Practice",
                "license_start": "2024-01-01",
                "license_end": "2024-12-31"
            }
        ],
        "professional_details": {
            "professional_cadre": "Medical Officer",
            "practice_type": "Public"
        },
        "contacts": {
            "phone": "0700000000",
            "email": "jane@example.org",
            "postal_address": "P.O. Box 1"
        },
        "identifiers": {
            "identification_type": "National ID",
            "identification_number": "12345678"
        }
    }"#;

    #[test]
    fn parse_practitioner_record() {
        let msg: PractitionerMessage = serde_json::from_str(PRACTITIONER_JSON).unwrap();
        assert_eq!(msg.membership.status, "Licensed");
        assert_eq!(msg.licenses.len(), 1);
        assert_eq!(msg.licenses[0].license_end, "2024-12-31");
        assert!(msg.membership.salutation.is_none());
    }

    #[test]
    fn null_license_fields_decode_as_empty() {
        let licenses: Vec<PractitionerLicense> = serde_json::from_str(
            r#"[
                {"id": "1", "license_type": null, "license_start": null, "license_end": null},
                {"id": "2", "license_type": "Private Practice", "license_end": "2099-01-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(licenses.len(), 2);
        assert_eq!(licenses[0].license_end, "");
        assert_eq!(licenses[0].license_type, "");
        assert_eq!(licenses[1].license_end, "2099-01-01");
    }

    #[test]
    fn parse_error_payload() {
        let resp: PractitionerResponse =
            serde_json::from_str(r#"{"message": {"error": "Practitioner not found"}}"#).unwrap();
        match resp.message {
            PractitionerPayload::Error { error } => assert_eq!(error, "Practitioner not found"),
            PractitionerPayload::Found(_) => panic!("expected error payload"),
        }
    }

    #[test]
    fn identifier_precedence() {
        let params = PractitionerSearchParams {
            national_id: Some("12345678".to_string()),
            license_number: Some("LIC-1".to_string()),
            registration_number: None,
            refresh: false,
        };
        assert_eq!(params.identifier(), Some(("National ID", "12345678")));

        let params = PractitionerSearchParams::by_license_number("LIC-1");
        assert_eq!(params.identifier(), Some(("id", "LIC-1")));

        let params = PractitionerSearchParams::by_registration_number("A1234/2019");
        assert_eq!(params.identifier(), Some(("registration_number", "A1234/2019")));

        let blank = PractitionerSearchParams {
            national_id: Some("  ".to_string()),
            ..PractitionerSearchParams::default()
        };
        assert_eq!(blank.identifier(), None);
    }
}
