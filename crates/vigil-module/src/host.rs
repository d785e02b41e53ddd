// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The host contract the module relies on, and an in-process host.

use std::path::PathBuf;
use std::sync::Arc;

use semver::Version;
use tracing::debug;
use vigil_config::{ExecutionContext, Mode, ReporterOptions, RuntimeConfig};

use crate::error::{InstallError, ModuleError};
use crate::factory::ClientFactory;
use crate::plugin::ReporterPlugin;
use crate::scope::ReporterScope;
use crate::store::RuntimeConfigStore;

/// A plugin the host runs at application start in the contexts its mode
/// selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSpec {
	pub name: String,
	pub config_key: String,
	pub src: PathBuf,
	/// Mode resolved when the plugin was registered. Installation reads the
	/// mode from the frozen runtime config instead.
	pub mode: Mode,
}

/// A function the host makes available to application code without an
/// explicit import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
	pub name: String,
	pub as_name: String,
	pub from: PathBuf,
}

/// What the module needs from the application framework hosting it.
pub trait Host {
	fn version(&self) -> &Version;
	fn runtime_config(&self) -> &RuntimeConfigStore;
	fn runtime_config_mut(&mut self) -> &mut RuntimeConfigStore;
	fn add_plugin(&mut self, plugin: PluginSpec);
	fn add_export(&mut self, export: ExportSpec);
	/// Marks a source directory to be excluded from dependency transforms.
	fn add_transpile(&mut self, path: PathBuf);
}

/// In-process [`Host`] that also runs the plugin pipeline for a context.
#[derive(Debug, Clone)]
pub struct AppHost {
	version: Version,
	runtime_config: RuntimeConfigStore,
	plugins: Vec<PluginSpec>,
	exports: Vec<ExportSpec>,
	transpile: Vec<PathBuf>,
}

impl AppHost {
	pub fn new(version: Version) -> Self {
		Self {
			version,
			runtime_config: RuntimeConfigStore::new(),
			plugins: Vec::new(),
			exports: Vec::new(),
			transpile: Vec::new(),
		}
	}

	/// Declares application-level runtime configuration for `key`. These
	/// values win over anything modules register.
	pub fn declare_runtime_config(&mut self, key: &str, options: ReporterOptions) -> &mut Self {
		self.runtime_config.declare(key, options);
		self
	}

	pub fn plugins(&self) -> &[PluginSpec] {
		&self.plugins
	}

	pub fn exports(&self) -> &[ExportSpec] {
		&self.exports
	}

	pub fn transpile_paths(&self) -> &[PathBuf] {
		&self.transpile
	}

	/// Freezes the configuration registered under `key`.
	pub fn runtime(&self, key: &str) -> Result<Arc<RuntimeConfig>, ModuleError> {
		self.runtime_config
			.runtime(key)?
			.map(Arc::new)
			.ok_or_else(|| ModuleError::NotRegistered(key.to_string()))
	}

	/// Creates the reporter scope for `context` and runs the plugin
	/// registered under `key`.
	///
	/// Whether the context gets a client is decided by the mode in `runtime`,
	/// so configuration declared after setup still applies. When no plugin is
	/// registered under `key`, the returned scope has no client and every
	/// access through it fails.
	pub fn install_context<F>(
		&self,
		key: &str,
		context: ExecutionContext,
		runtime: &RuntimeConfig,
		factory: F,
	) -> Result<ReporterScope<F::Client>, InstallError<F::Error>>
	where
		F: ClientFactory,
	{
		let scope = ReporterScope::new(context);

		let Some(plugin) = self.plugins.iter().find(|p| p.config_key == key) else {
			debug!(key, %context, "no reporter plugin registered");
			return Ok(scope);
		};

		debug!(plugin = %plugin.name, %context, "running reporter plugin");
		ReporterPlugin::new(factory).install(&scope, runtime)?;
		Ok(scope)
	}
}

impl Host for AppHost {
	fn version(&self) -> &Version {
		&self.version
	}

	fn runtime_config(&self) -> &RuntimeConfigStore {
		&self.runtime_config
	}

	fn runtime_config_mut(&mut self) -> &mut RuntimeConfigStore {
		&mut self.runtime_config
	}

	/// A second registration for the same plugin replaces the first.
	fn add_plugin(&mut self, plugin: PluginSpec) {
		match self
			.plugins
			.iter_mut()
			.find(|p| p.name == plugin.name && p.config_key == plugin.config_key)
		{
			Some(existing) => *existing = plugin,
			None => self.plugins.push(plugin),
		}
	}

	fn add_export(&mut self, export: ExportSpec) {
		if !self.exports.contains(&export) {
			self.exports.push(export);
		}
	}

	fn add_transpile(&mut self, path: PathBuf) {
		if !self.transpile.contains(&path) {
			self.transpile.push(path);
		}
	}
}
