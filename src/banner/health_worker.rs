//! Health-worker banner: the logged-in provider's registry standing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::BannerTag;
use crate::license::{is_expired, latest_license, LicenseEvaluator, LicenseNotice, NoticeKind};
use crate::tags::{classify, membership_status_category, TagType};
use crate::types::practitioner::{PractitionerLicense, PractitionerMessage, PractitionerSearchParams};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeType {
    pub display: String,
}

/// A provider attribute from the host EMR (`attributes[]` of a provider).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAttribute {
    pub attribute_type: AttributeType,
    pub value: String,
}

impl ProviderAttribute {
    pub fn new(display: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute_type: AttributeType {
                display: display.into(),
            },
            value: value.into(),
        }
    }
}

fn find_attribute<'a>(attributes: &'a [ProviderAttribute], name: &str) -> Option<&'a ProviderAttribute> {
    let needle = name.trim().to_lowercase();
    attributes.iter().find(|attr| {
        attr.attribute_type
            .display
            .trim()
            .to_lowercase()
            .contains(&needle)
    })
}

/// Search parameters for a provider, from their EMR attributes.
///
/// The national id attribute is preferred over the licence number. Returns
/// `None` when the provider has neither, in which case no search is made.
pub fn practitioner_search_params(
    attributes: &[ProviderAttribute],
    refresh: bool,
) -> Option<PractitionerSearchParams> {
    let params = if let Some(national_id) = find_attribute(attributes, "National Id") {
        PractitionerSearchParams::by_national_id(national_id.value.trim())
    } else {
        let licence = find_attribute(attributes, "Licence Number")?;
        PractitionerSearchParams::by_license_number(licence.value.trim())
    };
    Some(params.with_refresh(refresh))
}

/// Display model of the health-worker banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthWorkerBanner {
    pub tags: Vec<BannerTag>,
    /// License with the latest end date.
    pub latest_license: Option<PractitionerLicense>,
    /// Renewal notification, if one is due.
    pub notice: Option<LicenseNotice>,
}

impl HealthWorkerBanner {
    pub fn build(
        practitioner: &PractitionerMessage,
        evaluator: &LicenseEvaluator,
        now: DateTime<Utc>,
    ) -> Self {
        let membership = &practitioner.membership;
        let mut tags = vec![
            BannerTag::new(
                "Registration",
                format!("Registration ID: {}", membership.registration_id),
                TagType::Blue,
            ),
            BannerTag::new(
                "Status",
                format!("Membership: {}", membership.status),
                membership_status_category(&membership.status).tag_type(),
            ),
        ];

        let active = classify(membership.is_active.as_ref());
        tags.push(BannerTag::new(
            "Active",
            if active.is_positive() {
                "Membership: Active"
            } else {
                "Membership: Not Active"
            },
            active.tag_type(),
        ));

        if let Some(days) = membership
            .license_expires_in_days
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            tags.push(BannerTag::new(
                "Expiry",
                format!("Membership Expiry in {} days", days.trim()),
                TagType::Gray,
            ));
        }

        let latest = latest_license(&practitioner.licenses);
        if let Some(license) = latest {
            tags.push(BannerTag::new(
                "License",
                format!("License {}", license.id),
                TagType::Blue,
            ));
            let expired = is_expired(license, now);
            tags.push(BannerTag::new(
                "Expiry",
                format!("License Expiry {}", license.license_end),
                if expired { TagType::Red } else { TagType::Green },
            ));
        }

        let notice = evaluator.evaluate(&practitioner.licenses, now).notice();
        if let Some(n) = &notice {
            match n.kind {
                NoticeKind::Error => warn!(license_id = %n.license_id, "{}", n.title),
                NoticeKind::Warning => info!(license_id = %n.license_id, "{}", n.title),
            }
        }

        Self {
            tags,
            latest_license: latest.cloned(),
            notice,
        }
    }
}

#[cfg(feature = "client")]
mod fetch {
    use chrono::{DateTime, Utc};

    use super::HealthWorkerBanner;
    use crate::client::HieClient;
    use crate::errors::HieResult;
    use crate::license::LicenseEvaluator;
    use crate::session::SessionContext;
    use crate::types::practitioner::PractitionerSearchParams;

    impl HealthWorkerBanner {
        /// Search the registry for a practitioner and build their banner.
        pub async fn fetch(
            client: &HieClient,
            params: &PractitionerSearchParams,
            session: &SessionContext,
            evaluator: &LicenseEvaluator,
            now: DateTime<Utc>,
        ) -> HieResult<Self> {
            let location = session.require_location()?;
            let practitioner = client.search_practitioner(params, location).await?;
            Ok(Self::build(&practitioner, evaluator, now))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::StatusFlag;
    use crate::types::practitioner::{
        PractitionerContacts, PractitionerIdentifiers, PractitionerMembership,
        PractitionerProfessionalDetails,
    };
    use chrono::TimeZone;

    fn practitioner(status: &str, is_active: i64, licenses: Vec<PractitionerLicense>) -> PractitionerMessage {
        PractitionerMessage {
            membership: PractitionerMembership {
                id: "PUB-001".to_string(),
                status: status.to_string(),
                salutation: None,
                full_name: "Jane Doe".to_string(),
                gender: None,
                first_name: "Jane".to_string(),
                middle_name: None,
                last_name: "Doe".to_string(),
                registration_id: "A1234/2019".to_string(),
                external_reference_id: None,
                licensing_body: "KMPDC".to_string(),
                specialty: None,
                is_active: Some(StatusFlag::from(is_active)),
                is_withdrawn: Some(StatusFlag::from(0)),
                withdrawal_reason: None,
                withdrawal_date: None,
                license_expires_in_days: Some("45".to_string()),
            },
            licenses,
            professional_details: PractitionerProfessionalDetails {
                professional_cadre: "Medical Officer".to_string(),
                practice_type: "Public".to_string(),
                specialty: None,
                subspecialty: None,
                discipline_name: None,
                educational_qualifications: None,
            },
            contacts: PractitionerContacts {
                phone: "0700000000".to_string(),
                email: "jane@example.org".to_string(),
                postal_address: "P.O. Box 1".to_string(),
            },
            identifiers: PractitionerIdentifiers {
                identification_type: "National ID".to_string(),
                identification_number: "12345678".to_string(),
                client_registry_id: None,
                student_id: None,
            },
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn licensed_practitioner_with_valid_license() {
        let p = practitioner(
            "Licensed",
            1,
            vec![
                PractitionerLicense::new("7", "Private Practice", "2023-01-01", "2023-12-31", "e7"),
                PractitionerLicense::new("8", "Private Practice", "2024-01-01", "2024-12-31", "e8"),
            ],
        );
        let banner = HealthWorkerBanner::build(&p, &LicenseEvaluator::default(), now());

        let labels: Vec<&str> = banner.tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Registration ID: A1234/2019",
                "Membership: Licensed",
                "Membership: Active",
                "Membership Expiry in 45 days",
                "License 8",
                "License Expiry 2024-12-31",
            ]
        );
        assert_eq!(banner.tags[1].kind, TagType::Green);
        assert_eq!(banner.tags[2].kind, TagType::Green);
        assert_eq!(banner.tags[5].kind, TagType::Green);
        assert_eq!(banner.latest_license.as_ref().map(|l| l.id.as_str()), Some("8"));
        assert!(banner.notice.is_none());
    }

    #[test]
    fn expired_practitioner_gets_red_tags_and_error_notice() {
        let p = practitioner(
            "Suspended",
            0,
            vec![PractitionerLicense::new("7", "Private Practice", "2022-01-01", "2022-12-31", "e7")],
        );
        let banner = HealthWorkerBanner::build(&p, &LicenseEvaluator::default(), now());

        assert_eq!(banner.tags[1].kind, TagType::Red);
        assert_eq!(banner.tags[2].label, "Membership: Not Active");
        assert_eq!(banner.tags.last().map(|t| t.kind), Some(TagType::Red));
        let notice = banner.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.license_id, "7");
    }

    #[test]
    fn no_licenses_means_no_license_tags() {
        let p = practitioner("Licensed", 1, vec![]);
        let banner = HealthWorkerBanner::build(&p, &LicenseEvaluator::default(), now());
        assert_eq!(banner.tags.len(), 4);
        assert!(banner.latest_license.is_none());
        assert!(banner.notice.is_none());
    }

    #[test]
    fn search_params_prefer_national_id() {
        let attrs = vec![
            ProviderAttribute::new("Licence Number", "LIC-99"),
            ProviderAttribute::new(" National Id ", "12345678"),
        ];
        let params = practitioner_search_params(&attrs, true).unwrap();
        assert_eq!(params.national_id.as_deref(), Some("12345678"));
        assert!(params.license_number.is_none());
        assert!(params.refresh);
    }

    #[test]
    fn search_params_fall_back_to_licence_number() {
        let attrs = vec![ProviderAttribute::new("Provider Licence Number", "LIC-99")];
        let params = practitioner_search_params(&attrs, false).unwrap();
        assert_eq!(params.license_number.as_deref(), Some("LIC-99"));
        assert!(!params.refresh);

        assert!(practitioner_search_params(&[ProviderAttribute::new("Phone", "0700")], false).is_none());
    }

    #[test]
    fn provider_attributes_deserialize_from_emr_shape() {
        let json = r#"[{"attributeType": {"display": "National Id"}, "value": "12345678"}]"#;
        let attrs: Vec<ProviderAttribute> = serde_json::from_str(json).unwrap();
        assert_eq!(attrs[0].attribute_type.display, "National Id");
    }
}
