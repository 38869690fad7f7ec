//! Jira Resource
//!
//! Entry point for the Concourse `check`, `in` and `out` scripts.

use anyhow::{Context, Result};
use clap::Parser;
use jira_resource::cli::{with_script_name, Args, Command};
use jira_resource::{commands, logging, OutRequest, VersionRequest};
use jira_resource_client::auth::JiraAuth;
use jira_resource_client::JiraClient;
use jira_resource_core::BuildMetadata;
use serde::Serialize;
use std::io::Read;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_from(with_script_name(std::env::args_os()));

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request from stdin")?;

    match args.command {
        Command::Check => {
            let request: VersionRequest =
                serde_json::from_str(&input).context("Invalid check request")?;
            logging::init(request.source.debug);
            emit(&commands::check(&request))
        }
        Command::In { dir } => {
            let request: VersionRequest =
                serde_json::from_str(&input).context("Invalid in request")?;
            logging::init(request.source.debug);
            tracing::debug!("Nothing to fetch into {}", dir.display());
            emit(&commands::fetch(&request))
        }
        Command::Out { dir } => {
            let request: OutRequest =
                serde_json::from_str(&input).context("Invalid out request")?;
            logging::init(request.source.debug);

            request.source.validate()?;
            let credentials = request
                .source
                .credentials()
                .context("Missing Jira credentials")?;
            let auth = JiraAuth::basic(credentials.username, credentials.password);
            let client = JiraClient::new(request.source.base_url(), &auth)?;

            tracing::info!("Reconciling issues in project {}", request.source.project);
            let response =
                commands::out(&client, &request, &dir, BuildMetadata::from_env()).await?;
            emit(&response)
        }
    }
}

fn emit(response: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string(response)?);
    Ok(())
}
