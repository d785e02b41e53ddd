// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Installer that runs once per execution context at application start.

use tracing::{debug, info, warn};
use vigil_config::{ExecutionContext, Mode, RuntimeConfig};

use crate::error::InstallError;
use crate::factory::ClientFactory;
use crate::scope::ReporterScope;

/// Outcome of a successful [`ReporterPlugin::install`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
	/// A client was constructed and published into the scope.
	Installed { context: ExecutionContext },
	/// The configured mode does not select this context; the scope stays
	/// empty.
	Skipped { context: ExecutionContext, mode: Mode },
}

/// Constructs the reporter client for a context and publishes it.
#[derive(Debug, Clone)]
pub struct ReporterPlugin<F> {
	factory: F,
}

impl<F: ClientFactory> ReporterPlugin<F> {
	pub fn new(factory: F) -> Self {
		Self { factory }
	}

	/// Installs a client into `scope` using the token for the scope's
	/// context and the shared client options.
	///
	/// The server context uses the private server token; the client context
	/// uses the public client token. Factory failures are propagated and
	/// leave the scope untouched.
	pub fn install(
		&self,
		scope: &ReporterScope<F::Client>,
		runtime: &RuntimeConfig,
	) -> Result<Installation, InstallError<F::Error>> {
		let Some(context) = scope.context() else {
			warn!("reporter install requested outside a known execution context");
			return Err(InstallError::UnknownContext);
		};

		if scope.is_settled() {
			return Err(InstallError::AlreadyInstalled(context));
		}

		let mode = runtime.mode();
		if !mode.includes(context) {
			debug!(%context, %mode, "mode excludes context, skipping reporter install");
			if !scope.mark_excluded() {
				return Err(InstallError::AlreadyInstalled(context));
			}
			return Ok(Installation::Skipped { context, mode });
		}

		let view = runtime.view(context);
		let token = view.access_token();
		let client = self
			.factory
			.create(context, token, view.client_options())
			.map_err(InstallError::Client)?;

		if scope.publish(client).is_none() {
			return Err(InstallError::AlreadyInstalled(context));
		}

		info!(
			%context,
			%mode,
			token_configured = !token.is_empty(),
			option_count = view.client_options().len(),
			"reporter installed"
		);
		Ok(Installation::Installed { context })
	}
}
