//! CLI entry point for falcon-api — a CrowdStrike Falcon policy/recon client.
//!
//! Authenticates via OAuth2 client credentials, then dispatches the chosen
//! subcommand against the Falcon API and prints the result's `resources`
//! as pretty JSON.
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (auth failure, API error, transport fault)
//! - 2: argument validation error (clap handles this automatically)

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use falcon_api::auth::TokenProvider;
use falcon_api::client::FalconClient;
use falcon_api::device_control::{self, PolicyQuery};
use falcon_api::dispatch::Dispatcher;
use falcon_api::envelope::Envelope;
use falcon_api::recon::{self, ReconQuery};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Falcon API client ID.
    #[arg(long, env = "FALCON_CLIENT_ID")]
    client_id: String,

    /// Falcon API client secret. Prefer setting via the FALCON_CLIENT_SECRET
    /// environment variable to avoid exposing the secret in process listings
    /// and shell history.
    #[arg(long, env = "FALCON_CLIENT_SECRET")]
    client_secret: String,

    /// API base URL, for non-default Falcon clouds (us-2, eu-1, us-gov-1).
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for device control policy IDs with an optional FQL filter.
    QueryPolicies {
        /// FQL filter expression (e.g. "platform_name:'Windows'").
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of IDs to return.
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Retrieve device control policies by their IDs.
    GetPolicies {
        /// One or more policy IDs.
        ids: Vec<String>,
    },
    /// Search for recon notification IDs with an optional FQL filter.
    QueryNotifications {
        /// FQL filter expression (e.g. "status:'new'").
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of IDs to return.
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Search for recon monitoring rule IDs with an optional FQL filter.
    QueryRules {
        /// FQL filter expression.
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of IDs to return.
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The token endpoint lives on the same base as the API, so a custom
    // base URL applies to both.
    let client = match &cli.base_url {
        Some(url) => FalconClient::with_base_url(
            TokenProvider::with_base_url(&cli.client_id, &cli.client_secret, url),
            url,
        ),
        None => FalconClient::new(TokenProvider::new(&cli.client_id, &cli.client_secret)),
    };
    let dispatcher = Dispatcher::new(client);

    let envelope = match cli.command {
        Command::QueryPolicies { filter, limit } => {
            let query = PolicyQuery {
                filter,
                limit,
                ..Default::default()
            };
            device_control::query_policies(&dispatcher, &query).await
        }
        Command::GetPolicies { ids } => device_control::get_policies(&dispatcher, ids).await,
        Command::QueryNotifications { filter, limit } => {
            let query = ReconQuery {
                filter,
                limit,
                ..Default::default()
            };
            recon::query_notifications(&dispatcher, &query).await
        }
        Command::QueryRules { filter, limit } => {
            let query = ReconQuery {
                filter,
                limit,
                ..Default::default()
            };
            recon::query_rules(&dispatcher, &query).await
        }
    };

    report(&envelope)
}

/// Prints the envelope's resources on success, or its error entries on
/// failure, and maps the outcome to an exit code.
fn report(envelope: &Envelope) -> ExitCode {
    if envelope.is_success() {
        match envelope.resources() {
            Some(resources) => match serde_json::to_string_pretty(resources) {
                Ok(rendered) => println!("{rendered}"),
                Err(_) => println!("{resources}"),
            },
            None => println!("(no resources returned)"),
        }
        ExitCode::SUCCESS
    } else {
        eprintln!("request failed with status {}", envelope.status_code);
        for error in envelope.errors() {
            eprintln!("  {}", error.message);
        }
        ExitCode::FAILURE
    }
}
