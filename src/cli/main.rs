//! `hie_client` - command-line access to the HIE registry.
//!
//! Usage:
//!   hie_client practitioner --national-id 12345678
//!   hie_client facility --filter facility_code --value 15204
//!   hie_client eligibility --cr-id CR1234567890
//!   hie_client evaluate licenses.json --at 2024-01-01
//!
//! The session location comes from `--location`, else `HIE_LOCATION_UUID` /
//! `session.location_uuid` in `config.toml`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use hie_registry::banner::{EligibilityBanner, HealthWorkerBanner};
use hie_registry::client::HieClient;
use hie_registry::config::{init_config, HieConfig};
use hie_registry::dates::parse_instant;
use hie_registry::errors::{HieError, HieResult};
use hie_registry::license::LicenseEvaluator;
use hie_registry::logging::init_logging;
use hie_registry::registry::{facility_search_filter, PatientIdentifier};
use hie_registry::session::SessionContext;
use hie_registry::types::otp::{
    RequestCustomOtpDto, ValidateHieCustomOtpDto, VerificationIdentifierType,
};
use hie_registry::types::practitioner::{PractitionerLicense, PractitionerMessage, PractitionerSearchParams};
use hie_registry::validation::ValidationError;

#[derive(Parser)]
#[command(name = "hie_client", about = "Health Information Exchange registry client")]
struct Cli {
    /// Session location UUID (overrides configuration)
    #[arg(long, global = true)]
    location: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum IdType {
    NationalId,
    RefugeeId,
    AlienId,
    MandateNumber,
}

impl From<IdType> for VerificationIdentifierType {
    fn from(value: IdType) -> Self {
        match value {
            IdType::NationalId => VerificationIdentifierType::NationalId,
            IdType::RefugeeId => VerificationIdentifierType::RefugeeId,
            IdType::AlienId => VerificationIdentifierType::AlienId,
            IdType::MandateNumber => VerificationIdentifierType::MandateNumber,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Look up a practitioner and show their banner.
    Practitioner {
        #[arg(long)]
        national_id: Option<String>,
        #[arg(long)]
        license_number: Option<String>,
        #[arg(long)]
        registration_number: Option<String>,
        /// Re-sync from the regulator instead of the HIE cache
        #[arg(long)]
        refresh: bool,
    },
    /// List active providers at the session location.
    Providers,
    /// Find EMR providers by national id.
    ProviderByNationalId { national_id: String },
    /// Search the facility registry.
    Facility {
        /// location, facility_code or registration_number
        #[arg(long)]
        filter: String,
        #[arg(long)]
        value: String,
    },
    /// Check a patient's insurance eligibility.
    Eligibility {
        #[arg(long)]
        cr_id: Option<String>,
        #[arg(long)]
        national_id: Option<String>,
    },
    /// Send a verification OTP to the client's registered phone.
    OtpRequest {
        #[arg(long, value_enum, default_value = "national-id")]
        id_type: IdType,
        #[arg(long)]
        number: String,
    },
    /// Validate an OTP.
    OtpValidate {
        #[arg(long)]
        session_id: String,
        #[arg(long)]
        otp: String,
    },
    /// Evaluate licenses from a JSON file (a license array or a practitioner record).
    Evaluate {
        file: PathBuf,
        /// Evaluation date (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> HieResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn session_for(cli_location: Option<String>, config: &HieConfig) -> SessionContext {
    match cli_location {
        Some(location) => SessionContext::new(location),
        None => config.default_session(),
    }
}

fn read_licenses(file: &Path) -> HieResult<Vec<PractitionerLicense>> {
    let raw = std::fs::read_to_string(file)?;
    if let Ok(licenses) = serde_json::from_str::<Vec<PractitionerLicense>>(&raw) {
        return Ok(licenses);
    }
    let practitioner: PractitionerMessage = serde_json::from_str(&raw)?;
    Ok(practitioner.licenses)
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    any_valid: bool,
    most_recently_expired: Option<&'a PractitionerLicense>,
    nearing_expiry: Vec<&'a PractitionerLicense>,
    notice: Option<hie_registry::license::LicenseNotice>,
}

fn evaluate_file(file: &Path, at: Option<String>, evaluator: &LicenseEvaluator) -> HieResult<()> {
    let now: DateTime<Utc> = match at {
        Some(at) => parse_instant(&at).ok_or_else(|| ValidationError::new("at", "invalid date"))?,
        None => Utc::now(),
    };
    let licenses = read_licenses(file)?;
    let eval = evaluator.evaluate(&licenses, now);
    print_json(&EvaluationReport {
        any_valid: eval.any_valid,
        most_recently_expired: eval.most_recently_expired,
        nearing_expiry: eval.nearing_expiry.clone(),
        notice: eval.notice(),
    })
}

async fn run(cli: Cli, config: &HieConfig) -> HieResult<()> {
    let session = session_for(cli.location, config);
    let evaluator = config.evaluator();

    match cli.command {
        Command::Evaluate { file, at } => evaluate_file(&file, at, &evaluator),
        command => {
            let client = HieClient::from_config(config)?;
            run_remote(command, &client, &session, &evaluator).await
        }
    }
}

async fn run_remote(
    command: Command,
    client: &HieClient,
    session: &SessionContext,
    evaluator: &LicenseEvaluator,
) -> HieResult<()> {
    match command {
        Command::Practitioner {
            national_id,
            license_number,
            registration_number,
            refresh,
        } => {
            let params = PractitionerSearchParams {
                national_id,
                license_number,
                registration_number,
                refresh,
            };
            let banner =
                HealthWorkerBanner::fetch(client, &params, session, evaluator, Utc::now()).await?;
            for tag in &banner.tags {
                println!("{tag}");
            }
            if let Some(notice) = &banner.notice {
                println!("\n{}\n{}", notice.title, notice.subtitle);
            }
            Ok(())
        }
        Command::Providers => {
            let location = session.require_location()?;
            print_json(&client.get_all_providers(location).await?)
        }
        Command::ProviderByNationalId { national_id } => {
            print_json(&client.get_provider_by_national_id(&national_id).await)
        }
        Command::Facility { filter, value } => {
            let filter = facility_search_filter(Some(&filter), &value, session)?;
            match client.fetch_facility_details(&filter).await? {
                Some(facility) => print_json(&facility),
                None => {
                    println!("No facility found");
                    Ok(())
                }
            }
        }
        Command::Eligibility { cr_id, national_id } => {
            let mut identifiers = Vec::new();
            if let Some(cr) = cr_id {
                identifiers.push(PatientIdentifier::new("CR Number", cr));
            }
            if let Some(id) = national_id {
                identifiers.push(PatientIdentifier::new("National ID", id));
            }
            match EligibilityBanner::fetch(client, &identifiers, session).await? {
                Some(banner) => {
                    for tag in &banner.tags {
                        println!("{tag}");
                    }
                    Ok(())
                }
                None => Err(HieError::Validation(ValidationError::new(
                    "identifier",
                    "a CR id or national id and a session location are required",
                ))),
            }
        }
        Command::OtpRequest { id_type, number } => {
            let dto = RequestCustomOtpDto {
                identification_number: number,
                identification_type: id_type.into(),
                location_uuid: session.require_location()?.to_string(),
            };
            let resp = client.request_custom_otp(&dto).await?;
            info!("OTP sent to {}", resp.masked_phone);
            print_json(&resp)
        }
        Command::OtpValidate { session_id, otp } => {
            let dto = ValidateHieCustomOtpDto {
                session_id,
                otp,
                location_uuid: session.require_location()?.to_string(),
            };
            print_json(&client.validate_custom_otp(&dto).await?)
        }
        Command::Evaluate { file, at } => evaluate_file(&file, at, evaluator),
    }
}

#[tokio::main]
async fn main() -> HieResult<()> {
    let cli = Cli::parse();
    let config = init_config()?;
    init_logging(&config.logging)?;

    run(cli, config).await
}
