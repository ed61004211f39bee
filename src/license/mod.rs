//! Practitioner license evaluation.
//!
//! - `validity` → expiry checks, latest-license selection, [`LicenseEvaluator`]
//! - `notice`   → renewal notifications built from an evaluation

pub mod notice;
pub mod validity;

pub use notice::{LicenseNotice, NoticeKind};
pub use validity::{
    evaluate, is_expired, is_nearing_expiry, latest_license, license_end, LicenseEvaluation,
    LicenseEvaluator, DEFAULT_EXPIRY_WARNING_DAYS, MAX_EXPIRY_WARNING_DAYS,
};
