// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Warden demo server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_core::AccessDecisionManagerProvider;
use warden_server::{create_router, document_voters, DocumentStore};

mod version;

/// Warden server - document API protected by access decision voters.
#[derive(Parser, Debug)]
#[command(name = "warden-server", about = "Warden access decision demo server", version)]
struct Args {
	/// Config file path (defaults to /etc/warden/warden.toml)
	#[arg(long, env = "WARDEN_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for warden-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => warden_config::load_config_with_file(path)?,
		None => warden_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		strategy = %config.decision.settings.strategy,
		"starting warden-server"
	);

	// One manager for the whole process: configured voters first, then the
	// document voters.
	let adm = document_voters()
		.into_iter()
		.fold(
			AccessDecisionManagerProvider::new(config.decision.settings)
				.with_voter_specs(config.decision.voters.clone()),
			|provider, voter| provider.with_voter(voter),
		)
		.provide()?;

	let store = Arc::new(DocumentStore::new());
	let app = create_router(adm, store).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
