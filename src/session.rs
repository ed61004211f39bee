//! Session values supplied by the host application.
//!
//! Banners and registry searches need the logged-in user's location and
//! provider. They are passed around explicitly as a [`SessionContext`]
//! rather than read from ambient host state.

use crate::errors::HieResult;
use crate::validation::validate_uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// UUID of the session location (facility the user is logged in at).
    pub location_uuid: Option<String>,
    /// UUID of the current provider account, when the user is a provider.
    pub provider_uuid: Option<String>,
}

impl SessionContext {
    pub fn new(location_uuid: impl Into<String>) -> Self {
        Self {
            location_uuid: Some(location_uuid.into()),
            provider_uuid: None,
        }
    }

    pub fn with_provider(mut self, provider_uuid: impl Into<String>) -> Self {
        self.provider_uuid = Some(provider_uuid.into());
        self
    }

    /// Location UUID, if one is set and non-blank.
    pub fn location(&self) -> Option<&str> {
        self.location_uuid.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Location UUID, validated. Errors when missing or malformed.
    pub fn require_location(&self) -> HieResult<&str> {
        let location = self.location().unwrap_or_default();
        validate_uuid(location, "locationUuid")?;
        Ok(location)
    }
}
