//! # Offline License Check Example
//!
//! Evaluates a practitioner's licenses without talking to the HIE. This is
//! what the health-worker banner does once the registry has answered.
//!
//! ## Running This Example
//!
//! ```bash
//! cargo run
//! ```
//!
//! Builds with `default-features = false`, so no HTTP stack is pulled in.

use chrono::{TimeZone, Utc};
use hie_registry::license::{latest_license, LicenseEvaluator, NoticeKind};
use hie_registry::types::practitioner::PractitionerLicense;

fn main() -> Result<(), serde_json::Error> {
    // Licenses as the practitioner registry returns them.
    let licenses: Vec<PractitionerLicense> = serde_json::from_str(
        r#"[
            {"id": "101", "license_type": "Private Practice", "license_start": "2022-01-01", "license_end": "2022-12-31"},
            {"id": "102", "license_type": "Private Practice", "license_start": "2023-01-01", "license_end": "2024-01-20"},
            {"id": "103", "license_type": "Public Practice",  "license_start": "2023-01-01", "license_end": "2024-12-31"}
        ]"#,
    )?;

    let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let evaluator = LicenseEvaluator::default();
    let evaluation = evaluator.evaluate(&licenses, now);

    println!("Evaluated {} license(s) at {}", licenses.len(), now);
    println!("  Any valid license:     {}", evaluation.any_valid);
    if let Some(latest) = latest_license(&licenses) {
        println!("  Latest license:        {} (ends {})", latest.id, latest.license_end);
    }
    for license in &evaluation.nearing_expiry {
        println!("  Nearing expiry:        {} (ends {})", license.id, license.license_end);
    }

    match evaluation.notice() {
        Some(notice) => {
            let marker = match notice.kind {
                NoticeKind::Error => "✗",
                NoticeKind::Warning => "!",
            };
            println!("\n{marker} {}\n  {}", notice.title, notice.subtitle);
        }
        None => println!("\n✓ No renewal action needed"),
    }

    Ok(())
}
