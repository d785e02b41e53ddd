// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, inline layers, TOML files, environment.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, trace};

use crate::env::{env_var, load_token_env};
use crate::error::ConfigError;
use crate::layer::ReporterOptions;
use crate::mode::Mode;
use crate::options::ClientOptions;

/// Default TOML section and environment prefix.
pub const DEFAULT_SECTION: &str = "vigil";
pub const DEFAULT_ENV_PREFIX: &str = "VIGIL";

/// Source precedence levels (higher = overrides lower).
///
/// `Runtime` is configuration the host application declared itself; it wins
/// over options passed by modules. Sources with equal precedence merge in
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Module = 30,
	Runtime = 40,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ReporterOptions, ConfigError>;
}

/// Built-in defaults source. The defaults themselves are applied when the
/// merged layer is finalized, so this contributes an empty layer.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ReporterOptions, ConfigError> {
		Ok(ReporterOptions::default())
	}
}

/// A layer supplied directly by a caller.
pub struct InlineSource {
	name: String,
	precedence: Precedence,
	layer: ReporterOptions,
}

impl InlineSource {
	pub fn new(name: impl Into<String>, precedence: Precedence, layer: ReporterOptions) -> Self {
		Self {
			name: name.into(),
			precedence,
			layer,
		}
	}

	/// Options passed to the module at registration.
	pub fn module(layer: ReporterOptions) -> Self {
		Self::new("module", Precedence::Module, layer)
	}

	/// Options the host application declared in its own runtime config.
	pub fn runtime(layer: ReporterOptions) -> Self {
		Self::new("runtime", Precedence::Runtime, layer)
	}
}

impl ConfigSource for InlineSource {
	fn name(&self) -> &str {
		&self.name
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ReporterOptions, ConfigError> {
		Ok(self.layer.clone())
	}
}

/// TOML file configuration source.
///
/// Options are read from the `[vigil]` table when present, otherwise from the
/// top level of the file. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ReporterOptions, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ReporterOptions::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let parse_err = |e: toml::de::Error| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		};
		let mut table: toml::Table = toml::from_str(&content).map_err(parse_err)?;
		let value = match table.remove(DEFAULT_SECTION) {
			Some(section) => section,
			None => toml::Value::Table(table),
		};
		let layer: ReporterOptions = value.try_into().map_err(parse_err)?;

		trace!(section = DEFAULT_SECTION, "parsed reporter options from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `{PREFIX}_CLIENT_ACCESS_TOKEN`, `{PREFIX}_SERVER_ACCESS_TOKEN`
/// (or `{PREFIX}_SERVER_ACCESS_TOKEN_FILE`), `{PREFIX}_MODE`, and
/// `{PREFIX}_CLIENT_OPTIONS` holding a JSON object.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn var(&self, suffix: &str) -> String {
		format!("{}_{suffix}", self.prefix)
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new(DEFAULT_ENV_PREFIX)
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ReporterOptions, ConfigError> {
		debug!(prefix = %self.prefix, "loading environment variables");

		let mode = env_var(&self.var("MODE")).map(|v| v.parse::<Mode>()).transpose()?;

		let options_var = self.var("CLIENT_OPTIONS");
		let config = match env_var(&options_var) {
			Some(raw) => match serde_json::from_str::<Value>(&raw) {
				Ok(Value::Object(map)) => Some(ClientOptions::from_map(map)),
				Ok(_) => {
					return Err(ConfigError::invalid_value(
						options_var,
						"expected a JSON object",
					))
				}
				Err(e) => return Err(ConfigError::invalid_value(options_var, e.to_string())),
			},
			None => None,
		};

		Ok(ReporterOptions {
			client_access_token: env_var(&self.var("CLIENT_ACCESS_TOKEN")),
			server_access_token: load_token_env(&self.var("SERVER_ACCESS_TOKEN"))?,
			mode,
			config,
		})
	}
}
