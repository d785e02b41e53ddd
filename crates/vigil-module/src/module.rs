// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build-time registration of the reporter with a host.

use tracing::info;
use vigil_config::ReporterOptions;

use crate::error::ModuleError;
use crate::host::{ExportSpec, Host, PluginSpec};
use crate::meta::ModuleMeta;

/// Name under which the accessor is exported to application code.
pub const ACCESSOR_NAME: &str = "use_reporter";

/// Registers reporter configuration, the accessor and the installer plugin
/// with a [`Host`].
#[derive(Debug, Clone, Default)]
pub struct ReporterModule {
	meta: ModuleMeta,
}

impl ReporterModule {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_meta(meta: ModuleMeta) -> Self {
		Self { meta }
	}

	pub fn meta(&self) -> &ModuleMeta {
		&self.meta
	}

	/// Runs the module against `host`.
	///
	/// The options are merged into the host's runtime configuration under
	/// the module's config key. The server token goes to the private
	/// namespace only. Host-declared values keep precedence over the
	/// options; earlier registrations lose to later ones field by field.
	///
	/// Returns the plugin registration, whose mode is the merged mode.
	pub fn setup<H>(&self, options: ReporterOptions, host: &mut H) -> Result<PluginSpec, ModuleError>
	where
		H: Host + ?Sized,
	{
		self.meta.check_compatibility(host.version())?;

		let key = &self.meta.config_key;
		let server_token_supplied = options.server_access_token.is_some();
		host.runtime_config_mut().register(key, options);

		let merged = host
			.runtime_config()
			.resolve(key)?
			.ok_or_else(|| ModuleError::NotRegistered(key.clone()))?;

		let runtime_dir = self.meta.runtime_dir.clone();
		host.add_transpile(runtime_dir.clone());
		host.add_export(ExportSpec {
			name: ACCESSOR_NAME.to_string(),
			as_name: ACCESSOR_NAME.to_string(),
			from: runtime_dir.join("composables"),
		});

		let plugin = PluginSpec {
			name: self.meta.name.clone(),
			config_key: key.clone(),
			src: runtime_dir.join("plugin"),
			mode: merged.mode,
		};
		host.add_plugin(plugin.clone());

		info!(
			module = %self.meta.name,
			version = %self.meta.version,
			config_key = %key,
			private_key = %self.meta.private_key(),
			mode = %merged.mode,
			server_token_supplied,
			"reporter module registered"
		);
		Ok(plugin)
	}
}
