//! Patient eligibility banner: insurance scheme coverage at a glance.

use serde::Serialize;

use super::BannerTag;
use crate::tags::TagType;
use crate::types::eligibility::HieClientEligibility;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityBanner {
    pub tags: Vec<BannerTag>,
}

impl EligibilityBanner {
    /// One tag per scheme, or a single gray tag when the patient has none.
    pub fn build(eligibility: &HieClientEligibility) -> Self {
        if eligibility.schemes.is_empty() {
            return Self {
                tags: vec![BannerTag::new(
                    "Status",
                    "No Insurance schemes found",
                    TagType::Gray,
                )],
            };
        }

        let tags = eligibility
            .schemes
            .iter()
            .map(|scheme| {
                let category = scheme.coverage.category();
                let state = if category.is_positive() {
                    "Active"
                } else {
                    "Not Active"
                };
                BannerTag::new(
                    "Status",
                    format!("{} : {}", scheme.scheme_name, state),
                    category.tag_type(),
                )
            })
            .collect();

        Self { tags }
    }
}

#[cfg(feature = "client")]
mod fetch {
    use tracing::debug;

    use super::EligibilityBanner;
    use crate::client::HieClient;
    use crate::errors::HieResult;
    use crate::registry::{eligibility_filter, validate_eligibility_filter, PatientIdentifier};
    use crate::session::SessionContext;

    impl EligibilityBanner {
        /// Check a patient's eligibility and build the banner.
        ///
        /// Returns `Ok(None)` without calling the HIE when the patient has
        /// no usable identifier or the session has no location.
        pub async fn fetch(
            client: &HieClient,
            identifiers: &[PatientIdentifier],
            session: &SessionContext,
        ) -> HieResult<Option<Self>> {
            let filter = eligibility_filter(identifiers, session);
            if let Err(e) = validate_eligibility_filter(&filter) {
                debug!("skipping eligibility check: {e}");
                return Ok(None);
            }

            let eligibility = client.get_client_eligibility(&filter).await?;
            Ok(Some(Self::build(&eligibility)))
        }
    }
}
