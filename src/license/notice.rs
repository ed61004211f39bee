//! User-facing notifications derived from a license evaluation.

use chrono::Duration;
use serde::Serialize;

use super::validity::LicenseEvaluation;
use crate::dates::format_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeKind {
    /// No license is valid.
    Error,
    /// A valid license is about to run out.
    Warning,
}

/// A renewal notification for the health-worker banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseNotice {
    pub kind: NoticeKind,
    pub license_id: String,
    pub title: String,
    pub subtitle: String,
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Human form of a warning window, in the largest unit that divides it.
fn describe_window(window: Duration) -> String {
    let minutes = window.num_minutes();
    if minutes > 0 && minutes % (24 * 60) == 0 {
        plural(window.num_days(), "day")
    } else if minutes > 0 && minutes % 60 == 0 {
        plural(window.num_hours(), "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        plural(window.num_seconds(), "second")
    }
}

impl LicenseEvaluation<'_> {
    /// The notification to show, if any.
    ///
    /// With no valid license this names the most recently expired one. With
    /// several licenses nearing expiry it names the one ending first and
    /// mentions how many more are close behind.
    pub fn notice(&self) -> Option<LicenseNotice> {
        if !self.any_valid {
            let license = self.most_recently_expired?;
            return Some(LicenseNotice {
                kind: NoticeKind::Error,
                license_id: license.id.clone(),
                title: format!("Practitioner license {} expired", license.id),
                subtitle: format!(
                    "License {} ({}) expired on {}. Kindly renew.",
                    license.id,
                    license.license_type,
                    format_date(&license.license_end)
                ),
            });
        }

        let license = self.soonest_expiring()?;
        let mut subtitle = format!(
            "License {} ({}) expires on {}. Kindly make plans to renew.",
            license.id,
            license.license_type,
            format_date(&license.license_end)
        );
        let others = self.nearing_expiry.len() - 1;
        if others > 0 {
            subtitle.push_str(&format!(
                " {others} other license{} also expire{} within {}.",
                if others == 1 { "" } else { "s" },
                if others == 1 { "s" } else { "" },
                describe_window(self.window)
            ));
        }

        Some(LicenseNotice {
            kind: NoticeKind::Warning,
            license_id: license.id.clone(),
            title: format!("Practitioner license {} is almost expiring", license.id),
            subtitle,
        })
    }
}
