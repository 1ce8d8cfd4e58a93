//! Places setup - run one cycle of the places setup flow
//!
//! Reads a JSON object of field values from stdin. Empty input asks for the
//! first display of the form. The outcome is printed as JSON on stdout; a
//! created entry is also written to the entry store.

use anyhow::{Context, Result};
use places_setup::config::{SetupConfig, ENTRIES_PATH_ENV};
use places_setup::store::{EntryStore, JsonEntryStore, StoredEntry};
use places_setup::{ConfigFlow, FlowOutcome, FormView, SubmittedValues};
use serde::Serialize;
use std::io;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// What the binary prints, tagged like [`FlowOutcome`]
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HostOutput<'a> {
    ShowForm(&'a FormView),
    CreateEntry(&'a StoredEntry),
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = SetupConfig::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {e}");
        SetupConfig::default()
    });

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run(&config).await {
        tracing::error!("Setup failed: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &SetupConfig) -> Result<()> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read submission from stdin")?;

    let values = if raw.trim().is_empty() {
        None
    } else {
        let values: SubmittedValues =
            serde_json::from_str(&raw).context("Submission must be a JSON object")?;
        Some(values)
    };

    let mut flow = ConfigFlow::places()?;
    let outcome = flow.submit(values).await?;

    match &outcome {
        FlowOutcome::ShowForm(view) => {
            println!("{}", serde_json::to_string_pretty(&HostOutput::ShowForm(view))?);
        }
        FlowOutcome::CreateEntry(entry) => {
            let path = config
                .resolve_entries_path(std::env::var(ENTRIES_PATH_ENV).ok())
                .context("No location available to store entries")?;
            let stored = JsonEntryStore::new(path).create(entry.clone()).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&HostOutput::CreateEntry(&stored))?
            );
        }
    }

    Ok(())
}
