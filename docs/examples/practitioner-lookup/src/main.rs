//! # Practitioner Lookup Example
//!
//! Searches the HIE practitioner registry and prints the health-worker
//! banner, including any license renewal notice.
//!
//! ## Running This Example
//!
//! ```bash
//! HIE_BASE_URL=https://hie.example.org/api \
//! HIE_LOCATION_UUID=18c343eb-b353-462a-9139-b16606e6b6c2 \
//!   cargo run -- 12345678
//! ```

use chrono::Utc;
use hie_registry::banner::HealthWorkerBanner;
use hie_registry::client::HieClient;
use hie_registry::config::init_config;
use hie_registry::errors::{HieError, HieResult};
use hie_registry::logging::init_logging;
use hie_registry::types::practitioner::PractitionerSearchParams;

#[tokio::main]
async fn main() -> HieResult<()> {
    let config = init_config()?;
    init_logging(&config.logging)?;

    let national_id = std::env::args().nth(1).unwrap_or_else(|| "12345678".to_string());
    let client = HieClient::from_config(config)?;
    let session = config.default_session();
    let params = PractitionerSearchParams::by_national_id(national_id);

    match HealthWorkerBanner::fetch(&client, &params, &session, &config.evaluator(), Utc::now()).await {
        Ok(banner) => {
            for tag in &banner.tags {
                println!("{tag}");
            }
            if let Some(notice) = banner.notice {
                println!("\n{}\n  {}", notice.title, notice.subtitle);
            }
            Ok(())
        }
        Err(HieError::Api(message)) => {
            println!("Registry says: {message}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Lookup failed: {}", e.user_message());
            Err(e)
        }
    }
}
