//! Banner display models.
//!
//! A banner is an ordered list of [`BannerTag`]s plus, for the health-worker
//! banner, an optional renewal notice. Rendering is left to the host UI.

pub mod eligibility;
pub mod health_worker;

use serde::Serialize;
use std::fmt;

use crate::tags::TagType;

pub use eligibility::EligibilityBanner;
pub use health_worker::{practitioner_search_params, HealthWorkerBanner, ProviderAttribute};

/// A single labelled, coloured tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerTag {
    /// Tooltip / accessible title.
    pub title: String,
    pub label: String,
    pub kind: TagType,
}

impl BannerTag {
    pub fn new(title: impl Into<String>, label: impl Into<String>, kind: TagType) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            kind,
        }
    }
}

impl fmt::Display for BannerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.label)
    }
}
