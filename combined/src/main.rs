//! Command-line front end for the user registry.
//!
//! Seeds an in-memory repository through the registration use case and
//! either reports each registration or runs a `find` query over the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use auth_service_lib::{AuthService, Authenticator, RegisterUserInput, RegisterUserOutput};
use common::{AppResult, ErrorBody, RegistryConfig};
use domain::Argon2Hasher;
use repository::{BaseRepository, FindInput, SortDir};
use user_service_lib::InMemoryUsersRepository;

#[derive(Parser)]
#[command(name = "user-registry")]
#[command(about = "In-memory user registry with filtered, sorted and paginated queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register every user in a seed file and report the outcome per entry
    Register {
        /// JSON array of registration inputs
        #[arg(long)]
        seed: PathBuf,
    },
    /// Seed the registry, then run a find query
    Find {
        #[arg(long)]
        seed: PathBuf,
        #[arg(long)]
        page: Option<u64>,
        /// Defaults to DEFAULT_PER_PAGE from the environment
        #[arg(long)]
        per_page: Option<u64>,
        /// Field to sort by (name, email, created_at, updated_at)
        #[arg(long)]
        sort: Option<String>,
        /// ASC or DESC
        #[arg(long)]
        sort_dir: Option<SortDir>,
        /// Case-insensitive text matched against name or email
        #[arg(long)]
        filter: Option<String>,
    },
}

/// One line of `register` output
#[derive(Serialize)]
struct RegisterReport {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl RegisterReport {
    fn new(email: String, result: AppResult<RegisterUserOutput>) -> Self {
        match result {
            Ok(output) => Self {
                email,
                user_id: Some(output.user_id),
                error: None,
            },
            Err(err) => Self {
                email,
                user_id: None,
                error: Some(err.body()),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RegistryConfig::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        service = %config.service_name,
        environment = %config.environment,
        "Starting"
    );

    let cli = Cli::parse();

    let repo = Arc::new(InMemoryUsersRepository::new());
    let auth = Authenticator::new(repo.clone(), Arc::new(Argon2Hasher));

    match cli.command {
        Commands::Register { seed } => {
            for report in seed_registry(&auth, &seed).await? {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        Commands::Find {
            seed,
            page,
            per_page,
            sort,
            sort_dir,
            filter,
        } => {
            seed_registry(&auth, &seed).await?;

            let input = FindInput {
                page,
                per_page: per_page.or(Some(config.default_per_page)),
                sort,
                sort_dir,
                filter,
            };
            debug!(?input, "Running find");

            let output = repo.find(input).await;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Register every entry of a seed file, in file order.
///
/// A rejected entry does not stop the run: it gets a report carrying the
/// error body so every line of the seed file is accounted for.
async fn seed_registry(
    auth: &Authenticator,
    path: &Path,
) -> Result<Vec<RegisterReport>, Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let inputs: Vec<RegisterUserInput> = serde_json::from_str(&raw)?;
    info!(count = inputs.len(), path = %path.display(), "Seeding registry");

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        let email = input.email.clone();
        reports.push(RegisterReport::new(email, auth.register(input).await));
    }

    Ok(reports)
}
