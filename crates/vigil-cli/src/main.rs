// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `vigil` inspects the reporter configuration an application would ship
//! and which execution contexts would get a client.

use std::convert::Infallible;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use semver::Version;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vigil_config::{ClientOptions, ExecutionContext, ReporterConfig, ReporterOptions, RuntimeConfig};
use vigil_module::{factory_fn, use_reporter, AppHost, ReporterModule};

/// Reporter configuration and installation inspector
#[derive(Parser, Debug)]
#[command(name = "vigil", version, about)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the resolved configuration as seen from a context
	Config {
		/// TOML config file
		#[arg(long, env = "VIGIL_CONFIG")]
		file: Option<PathBuf>,

		/// Execution context to view from (client or server)
		#[arg(long)]
		context: Option<ExecutionContext>,
	},

	/// Show which contexts install a reporter client
	Plan {
		/// TOML config file
		#[arg(long, env = "VIGIL_CONFIG")]
		file: Option<PathBuf>,

		/// Host framework version to check compatibility against
		#[arg(long, default_value = "3.0.0")]
		host_version: Version,
	},

	/// Print version information
	Version,
}

/// What installing in one context would produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContextPlan {
	context: ExecutionContext,
	installs: bool,
	token_configured: bool,
	option_keys: Vec<String>,
}

fn main() -> Result<()> {
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(fmt::layer().with_writer(std::io::stderr))
		.init();

	let cli = Cli::parse();
	debug!(?cli, "parsed arguments");

	match cli.command {
		Command::Config { file, context } => {
			let config = vigil_config::load_config(file.as_deref())
				.context("failed to load reporter configuration")?;
			let report = config_report(config, context)?;
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
		Command::Plan { file, host_version } => {
			let options = vigil_config::load_options(file.as_deref())
				.context("failed to load reporter configuration")?;
			let plans = plan(options, host_version)?;
			println!("{}", serde_json::to_string_pretty(&plans)?);
		}
		Command::Version => {
			println!("vigil {}", env!("CARGO_PKG_VERSION"));
		}
	}

	Ok(())
}

/// Public partition, plus the redacted private partition when viewed from
/// the server.
fn config_report(config: ReporterConfig, context: Option<ExecutionContext>) -> Result<Value> {
	let runtime = RuntimeConfig::from(config);
	let public = serde_json::to_value(runtime.public())?;

	let Some(context) = context else {
		return Ok(public);
	};

	let view = runtime.view(context);
	Ok(match view.private() {
		Some(private) => json!({
			"context": context,
			"public": public,
			"private": { "serverAccessToken": private.server_access_token },
		}),
		None => json!({ "context": context, "public": public }),
	})
}

/// Runs the module against an in-process host and a factory that only
/// records what it was given.
fn plan(options: ReporterOptions, host_version: Version) -> Result<Vec<ContextPlan>> {
	let mut host = AppHost::new(host_version);
	let module = ReporterModule::new();
	let spec = module.setup(options, &mut host)?;
	let runtime = host.runtime(&spec.config_key)?;

	let factory = factory_fn(|context, token: &str, options: &ClientOptions| {
		Ok::<_, Infallible>(ContextPlan {
			context,
			installs: true,
			token_configured: !token.is_empty(),
			option_keys: options.as_map().keys().cloned().collect(),
		})
	});

	let mut plans = Vec::with_capacity(ExecutionContext::ALL.len());
	for context in ExecutionContext::ALL {
		let scope = host.install_context(&spec.config_key, context, &runtime, &factory)?;
		let plan = match use_reporter(&scope) {
			Ok(client) => (*client).clone(),
			Err(_) => ContextPlan {
				context,
				installs: false,
				token_configured: false,
				option_keys: Vec::new(),
			},
		};
		plans.push(plan);
	}

	info!(
		mode = %runtime.mode(),
		contexts = ?runtime.mode().contexts(),
		installed = plans.iter().filter(|p| p.installs).count(),
		"plan complete"
	);
	Ok(plans)
}

#[cfg(test)]
mod tests {
	use super::*;
	use vigil_config::Mode;

	#[test]
	fn cli_parses_config_context() {
		let cli = Cli::try_parse_from(["vigil", "config", "--context", "server"]).unwrap();
		match cli.command {
			Command::Config { context, .. } => assert_eq!(context, Some(ExecutionContext::Server)),
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn cli_rejects_unknown_context() {
		assert!(Cli::try_parse_from(["vigil", "config", "--context", "edge"]).is_err());
	}

	#[test]
	fn server_report_redacts_token() {
		let config = ReporterOptions::new()
			.with_client_access_token("abc")
			.with_server_access_token("SRV_SECRET")
			.finalize();

		let report = config_report(config, Some(ExecutionContext::Server)).unwrap();

		assert_eq!(report["private"]["serverAccessToken"], "[REDACTED]");
		assert!(!report.to_string().contains("SRV_SECRET"));
	}

	#[test]
	fn client_report_has_no_private_partition() {
		let config = ReporterOptions::new().with_client_access_token("abc").finalize();

		let report = config_report(config, Some(ExecutionContext::Client)).unwrap();

		assert!(report.get("private").is_none());
		assert_eq!(report["public"]["clientAccessToken"], "abc");
	}

	#[test]
	fn plan_follows_mode() {
		let mut client_options = ClientOptions::new();
		client_options.insert("environment", json!("production"));
		let options = ReporterOptions::new()
			.with_client_access_token("abc")
			.with_mode(Mode::ClientOnly)
			.with_config(client_options);

		let plans = plan(options, Version::new(3, 1, 0)).unwrap();

		assert_eq!(
			plans,
			vec![
				ContextPlan {
					context: ExecutionContext::Client,
					installs: true,
					token_configured: true,
					option_keys: vec!["environment".to_string()],
				},
				ContextPlan {
					context: ExecutionContext::Server,
					installs: false,
					token_configured: false,
					option_keys: Vec::new(),
				},
			]
		);
	}

	#[test]
	fn plan_fails_on_incompatible_host() {
		assert!(plan(ReporterOptions::new(), Version::new(2, 0, 0)).is_err());
	}
}
