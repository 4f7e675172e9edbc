//! ChamaLedger command-line interface.
//!
//! Thin presentation layer over `ledger-service`: parses arguments, opens
//! the file-backed store under the data directory, and renders the results.

mod cli;
mod commands;
mod format;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::App;
use ledger_service::{LedgerStore, MemberRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use storage_layer::{FileBackend, StorageBackend};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let data_dir = resolve_data_dir(args.data_dir);
    tracing::debug!(data_dir = %data_dir.display(), "opening ledger");

    let backend: Arc<dyn StorageBackend> = Arc::new(
        FileBackend::new(&data_dir)
            .with_context(|| format!("failed to open data directory {}", data_dir.display()))?,
    );
    let store = LedgerStore::open(Arc::clone(&backend))?;
    let registry = MemberRegistry::new(backend);

    App::new(store, registry).run(args.command)
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| dirs::data_dir().map(|dir| dir.join("chamaledger")))
        .unwrap_or_else(|| PathBuf::from(".chamaledger"))
}
