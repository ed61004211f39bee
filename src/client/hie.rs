//! Async client for the HIE REST API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::errors::http_error;
use crate::config::HieConfig;
use crate::errors::{HieError, HieResult};
use crate::types::eligibility::{EligibilityFilterDto, HieClientEligibility};
use crate::types::facility::{FacilitySearchFilter, HieFacility, HieFacilitySearchResponse};
use crate::types::otp::{
    RequestCustomOtpDto, RequestCustomOtpResponse, ValidateHieCustomOtpDto,
    ValidateHieCustomOtpResponse,
};
use crate::types::practitioner::{
    PractitionerMessage, PractitionerPayload, PractitionerResponse, PractitionerSearchParams,
    Provider,
};
use crate::validation::{validate_identifier, validate_not_empty, validate_otp, ValidationError};

/// Client for the HIE registry endpoints.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HieClient {
    http: Client,
    base_url: String,
}

impl HieClient {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> HieResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HieError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &HieConfig) -> HieResult<Self> {
        Self::new(config.base_url(), Duration::from_secs(config.hie.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a response to `T`, turning non-success statuses into `HieError::Http`.
    async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> HieResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = http_error(status.as_u16(), &body);
            warn!("{what} failed: {err}");
            return Err(err);
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| HieError::Decode(format!("failed to parse {what} response: {e}")))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> HieResult<T> {
        let url = self.url(path);
        debug!("GET {url} ({what})");

        let resp = self.http.get(&url).query(query).send().await?;
        Self::decode(resp, what).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> HieResult<T> {
        let url = self.url(path);
        debug!("POST {url} ({what})");

        let resp = self.http.post(&url).json(body).send().await?;
        Self::decode(resp, what).await
    }

    /// Search the practitioner registry.
    ///
    /// One identifier is sent (national id, then license number, then
    /// registration number). `refresh` asks the HIE to re-sync from the
    /// regulator. An `{"message": {"error": ..}}` body becomes `HieError::Api`.
    pub async fn search_practitioner(
        &self,
        params: &PractitionerSearchParams,
        location_uuid: &str,
    ) -> HieResult<PractitionerMessage> {
        let (identifier_type, identifier_value) = params.identifier().ok_or_else(|| {
            ValidationError::new(
                "identifierValue",
                "one of national id, license number or registration number is required",
            )
        })?;
        validate_identifier(identifier_value, "identifierValue")?;
        validate_not_empty(location_uuid, "locationUuid")?;

        let refresh = params.refresh.to_string();
        let mut query = vec![
            ("identifierType", identifier_type),
            ("identifierValue", identifier_value),
            ("locationUuid", location_uuid),
        ];
        if params.refresh {
            query.push(("refresh", refresh.as_str()));
        }

        let resp: PractitionerResponse = self
            .get("practitioner/search", &query, "practitioner search")
            .await?;

        match resp.message {
            PractitionerPayload::Found(practitioner) => {
                debug!(
                    "found practitioner {} with {} license(s)",
                    practitioner.membership.registration_id,
                    practitioner.licenses.len()
                );
                Ok(*practitioner)
            }
            PractitionerPayload::Error { error } => {
                warn!("practitioner search rejected: {error}");
                Err(HieError::Api(error))
            }
        }
    }

    /// All active providers at a location.
    pub async fn get_all_providers(&self, location_uuid: &str) -> HieResult<Vec<Provider>> {
        validate_not_empty(location_uuid, "locationUuid")?;
        self.get(
            "amrs/providers/active",
            &[("locationUuid", location_uuid)],
            "active providers",
        )
        .await
    }

    /// Providers registered with a national id.
    ///
    /// Lookup failures are logged and yield an empty list: a missing match
    /// and an unreachable registry are handled the same way by callers.
    pub async fn get_provider_by_national_id(&self, national_id: &str) -> Vec<Provider> {
        let result: HieResult<Option<Vec<Provider>>> = self
            .get(
                "amrs/provider/national-id",
                &[("nationalId", national_id)],
                "provider by national id",
            )
            .await;

        match result {
            Ok(providers) => providers.unwrap_or_default(),
            Err(e) => {
                warn!("provider lookup by national id failed: {e}");
                Vec::new()
            }
        }
    }

    /// Look up a facility by MFL code or registration number.
    ///
    /// Returns `Ok(None)` when the registry answers without a facility.
    pub async fn fetch_facility_details(
        &self,
        filter: &FacilitySearchFilter,
    ) -> HieResult<Option<HieFacility>> {
        validate_identifier(&filter.filter_value, "filterValue")?;
        validate_not_empty(&filter.location_uuid, "locationUuid")?;

        let resp: HieFacilitySearchResponse = self
            .get(
                "facility/search",
                &[
                    ("filterType", filter.filter_type.as_str()),
                    ("filterValue", filter.filter_value.trim()),
                    ("locationUuid", filter.location_uuid.as_str()),
                ],
                "facility search",
            )
            .await?;
        Ok(resp.message)
    }

    /// Insurance eligibility of a client.
    pub async fn get_client_eligibility(
        &self,
        filter: &EligibilityFilterDto,
    ) -> HieResult<HieClientEligibility> {
        validate_not_empty(&filter.request_id_type, "requestIdType")?;
        validate_identifier(&filter.request_id_number, "requestIdNumber")?;
        validate_not_empty(&filter.location_uuid, "locationUuid")?;

        self.get(
            "client/eligibility",
            &[
                ("requestIdType", filter.request_id_type.as_str()),
                ("requestIdNumber", filter.request_id_number.as_str()),
                ("locationUuid", filter.location_uuid.as_str()),
            ],
            "client eligibility",
        )
        .await
    }

    /// Send a one-time password to the phone registered for an identity.
    pub async fn request_custom_otp(
        &self,
        dto: &RequestCustomOtpDto,
    ) -> HieResult<RequestCustomOtpResponse> {
        validate_identifier(&dto.identification_number, "identificationNumber")?;
        validate_not_empty(&dto.location_uuid, "locationUuid")?;
        self.post("client/send-custom-otp", dto, "custom OTP request")
            .await
    }

    /// Check an OTP against the session returned by [`Self::request_custom_otp`].
    pub async fn validate_custom_otp(
        &self,
        dto: &ValidateHieCustomOtpDto,
    ) -> HieResult<ValidateHieCustomOtpResponse> {
        validate_not_empty(&dto.session_id, "sessionId")?;
        validate_otp(&dto.otp, "otp")?;
        validate_not_empty(&dto.location_uuid, "locationUuid")?;
        self.post("client/validate-custom-otp", dto, "custom OTP validation")
            .await
    }
}
