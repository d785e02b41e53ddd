// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reporter configuration for vigil.
//!
//! This crate provides:
//! - The closed [`Mode`] / [`ExecutionContext`] pair that gates installation
//! - Partial option layers ([`ReporterOptions`]) with right-biased merging and
//!   a deep merge for the opaque client options
//! - Defaults applied by [`ReporterOptions::finalize`], which never fails
//! - The public/private split of [`RuntimeConfig`]; the server token lives
//!   only in the private partition and is a redacted [`AccessToken`]
//! - Layered sources (defaults, TOML file, module/runtime layers, environment)
//!
//! # Usage
//!
//! ```ignore
//! use vigil_config::{load_config, ExecutionContext, RuntimeConfig};
//!
//! let runtime = RuntimeConfig::from(load_config(Some("vigil.toml".as_ref()))?);
//! let view = runtime.view(ExecutionContext::Server);
//! println!("installing with mode {}", runtime.mode());
//! ```

pub mod env;
pub mod error;
pub mod layer;
pub mod mode;
pub mod options;
pub mod registry;
pub mod runtime;
pub mod secret;
pub mod sources;

pub use error::ConfigError;
pub use layer::{ReporterConfig, ReporterOptions};
pub use mode::{ExecutionContext, Mode};
pub use options::{ClientOptions, ACCESS_TOKEN_KEY};
pub use registry::ConfigRegistry;
pub use runtime::{ContextConfig, PrivateConfig, PublicConfig, RuntimeConfig};
pub use secret::{AccessToken, REDACTED};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, InlineSource, Precedence, TomlSource};

use std::path::Path;

/// Load configuration from defaults, an optional TOML file and the
/// environment.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`VIGIL_*`)
/// 2. Config file
/// 3. Built-in defaults
pub fn load_config(config_file: Option<&Path>) -> Result<ReporterConfig, ConfigError> {
	registry_for(config_file, sources::DEFAULT_ENV_PREFIX).load()
}

/// Like [`load_config`], but stops before defaults are applied so the result
/// can be handed to the module as a registration layer.
pub fn load_options(config_file: Option<&Path>) -> Result<ReporterOptions, ConfigError> {
	registry_for(config_file, sources::DEFAULT_ENV_PREFIX).load_layer()
}

fn registry_for(config_file: Option<&Path>, env_prefix: &str) -> ConfigRegistry {
	let mut registry = ConfigRegistry::new();
	registry.register(Box::new(DefaultsSource));
	if let Some(path) = config_file {
		registry.register(Box::new(TomlSource::new(path)));
	}
	registry.register(Box::new(EnvSource::new(env_prefix)));
	registry
}
