// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered collection of configuration sources.

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::layer::{ReporterConfig, ReporterOptions};
use crate::sources::ConfigSource;

/// Collects sources and merges them by precedence.
///
/// Sorting is stable, so sources sharing a precedence level are merged in the
/// order they were registered and the later one wins.
#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) -> &mut Self {
		self.sources.push(source);
		self
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Merges every source into one partial layer without applying defaults.
	pub fn load_layer(&self) -> Result<ReporterOptions, ConfigError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		ordered.sort_by_key(|s| s.precedence());

		let mut merged = ReporterOptions::default();
		for source in ordered {
			debug!(
				source = source.name(),
				precedence = ?source.precedence(),
				"loading configuration source"
			);
			merged.merge(source.load()?);
		}
		Ok(merged)
	}

	/// Merges every source and fills defaults.
	pub fn load(&self) -> Result<ReporterConfig, ConfigError> {
		let config = self.load_layer()?.finalize();

		info!(
			mode = %config.mode,
			client_token_configured = !config.client_access_token.is_empty(),
			server_token_configured = !config.server_access_token.is_empty(),
			client_options = config.client_options.len(),
			"reporter configuration loaded"
		);

		Ok(config)
	}
}
