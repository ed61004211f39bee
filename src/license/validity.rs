//! Practitioner license validity evaluation.
//!
//! A license is *expired* when its end date lies strictly before the
//! evaluation instant; otherwise it is *valid*. End dates that are empty or
//! cannot be parsed make the license expired, and such licenses never take
//! part in end-date comparisons.
//!
//! All comparisons use full UTC instants, so two calendar dates are always
//! compared by their complete epoch difference.

use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;

use crate::dates::parse_instant;
use crate::types::practitioner::PractitionerLicense;

/// Default renewal-warning horizon.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;

/// Largest accepted renewal-warning horizon (ten years).
pub const MAX_EXPIRY_WARNING_DAYS: i64 = 3650;

/// Parsed end of a license's validity window.
pub fn license_end(license: &PractitionerLicense) -> Option<DateTime<Utc>> {
    parse_instant(&license.license_end)
}

/// `true` when the license ended before `now`, or its end date is unusable.
pub fn is_expired(license: &PractitionerLicense, now: DateTime<Utc>) -> bool {
    match license_end(license) {
        Some(end) => end < now,
        None => true,
    }
}

/// `true` when `0 < end - now <= window`.
pub fn is_nearing_expiry(license: &PractitionerLicense, now: DateTime<Utc>, window: Duration) -> bool {
    match license_end(license) {
        Some(end) => {
            let remaining = end - now;
            remaining > Duration::zero() && remaining <= window
        }
        None => false,
    }
}

/// Order two license ids: numerically when both are integers, otherwise
/// lexicographically.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// The license with the latest end date.
///
/// On equal end dates the larger id wins. Licenses without a usable end
/// date are never selected, so the result is `None` for an empty slice or
/// one where no end date parses. The slice is not reordered.
pub fn latest_license(licenses: &[PractitionerLicense]) -> Option<&PractitionerLicense> {
    licenses
        .iter()
        .filter_map(|license| license_end(license).map(|end| (end, license)))
        .max_by(|(end_a, a), (end_b, b)| end_a.cmp(end_b).then_with(|| compare_ids(&a.id, &b.id)))
        .map(|(_, license)| license)
}

/// Outcome of evaluating a practitioner's license set at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseEvaluation<'a> {
    /// At least one license is not expired.
    pub any_valid: bool,
    /// Set only when no license is valid: the one that expired last.
    pub most_recently_expired: Option<&'a PractitionerLicense>,
    /// Set only when some license is valid: valid licenses ending within the
    /// warning window, in input order.
    pub nearing_expiry: Vec<&'a PractitionerLicense>,
    /// Instant the evaluation was made at.
    pub evaluated_at: DateTime<Utc>,
    /// Warning horizon used for `nearing_expiry`.
    pub window: Duration,
}

impl<'a> LicenseEvaluation<'a> {
    /// Among the licenses nearing expiry, the one that ends first.
    pub fn soonest_expiring(&self) -> Option<&'a PractitionerLicense> {
        self.nearing_expiry
            .iter()
            .copied()
            .filter_map(|license| license_end(license).map(|end| (end, license)))
            .min_by(|(end_a, a), (end_b, b)| end_a.cmp(end_b).then_with(|| compare_ids(&b.id, &a.id)))
            .map(|(_, license)| license)
    }
}

/// Evaluates license sets against a configurable warning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseEvaluator {
    window: Duration,
}

impl Default for LicenseEvaluator {
    fn default() -> Self {
        Self::from_days(DEFAULT_EXPIRY_WARNING_DAYS)
    }
}

impl LicenseEvaluator {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Window of `days` days, clamped to `0..=MAX_EXPIRY_WARNING_DAYS`.
    pub fn from_days(days: i64) -> Self {
        Self::new(Duration::days(days.clamp(0, MAX_EXPIRY_WARNING_DAYS)))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Evaluate `licenses` at `now`.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use hie_registry::license::LicenseEvaluator;
    /// use hie_registry::types::practitioner::PractitionerLicense;
    ///
    /// let licenses = vec![
    ///     PractitionerLicense::new("1", "Private Practice", "2023-01-01", "2099-01-01", "ext-1"),
    ///     PractitionerLicense::new("2", "Public Practice", "2023-01-01", "2024-01-10", "ext-2"),
    /// ];
    /// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    ///
    /// let eval = LicenseEvaluator::default().evaluate(&licenses, now);
    /// assert!(eval.any_valid);
    /// assert_eq!(eval.nearing_expiry.len(), 1);
    /// assert_eq!(eval.nearing_expiry[0].id, "2");
    /// ```
    pub fn evaluate<'a>(
        &self,
        licenses: &'a [PractitionerLicense],
        now: DateTime<Utc>,
    ) -> LicenseEvaluation<'a> {
        let any_valid = licenses.iter().any(|license| !is_expired(license, now));

        let (most_recently_expired, nearing_expiry) = if any_valid {
            let nearing = licenses
                .iter()
                .filter(|license| is_nearing_expiry(license, now, self.window))
                .collect();
            (None, nearing)
        } else {
            (latest_license(licenses), Vec::new())
        };

        LicenseEvaluation {
            any_valid,
            most_recently_expired,
            nearing_expiry,
            evaluated_at: now,
            window: self.window,
        }
    }
}

/// Evaluate with the default 30-day warning window.
pub fn evaluate(licenses: &[PractitionerLicense], now: DateTime<Utc>) -> LicenseEvaluation<'_> {
    LicenseEvaluator::default().evaluate(licenses, now)
}
