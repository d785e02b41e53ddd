// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host-side runtime configuration store with public and private namespaces.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use vigil_config::{
	AccessToken, ConfigError, ConfigRegistry, InlineSource, ReporterConfig, ReporterOptions,
	RuntimeConfig,
};

use crate::meta::private_key_for;

#[derive(Debug, Clone, Default)]
struct Layers<T> {
	/// Declared by the host application itself; wins over `registered`.
	declared: T,
	/// Contributed by module registrations, later calls winning.
	registered: T,
}

/// Build-time runtime configuration, keyed by namespace.
///
/// Server tokens are kept in a separate private map, keyed
/// `__{key}ServerAccessToken`, and never enter the public namespaces, so
/// [`RuntimeConfigStore::public_payload`] cannot contain them.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfigStore {
	public: BTreeMap<String, Layers<ReporterOptions>>,
	private: BTreeMap<String, Layers<Option<AccessToken>>>,
}

impl RuntimeConfigStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records options the host application declared for `key`.
	pub fn declare(&mut self, key: &str, mut options: ReporterOptions) {
		let token = options.server_access_token.take();
		self.public
			.entry(key.to_string())
			.or_default()
			.declared
			.merge(options);
		if let Some(token) = token {
			self.private.entry(private_key_for(key)).or_default().declared = Some(token);
		}
	}

	/// Merges module options for `key` on top of earlier registrations.
	pub fn register(&mut self, key: &str, mut options: ReporterOptions) {
		let token = options.server_access_token.take();
		self.public
			.entry(key.to_string())
			.or_default()
			.registered
			.merge(options);
		if let Some(token) = token {
			self.private
				.entry(private_key_for(key))
				.or_default()
				.registered = Some(token);
		}
	}

	pub fn contains(&self, key: &str) -> bool {
		self.public.contains_key(key) || self.private.contains_key(&private_key_for(key))
	}

	/// Names of the private entries. Values are only reachable through
	/// [`RuntimeConfigStore::resolve`].
	pub fn private_keys(&self) -> impl Iterator<Item = &str> {
		self.private.keys().map(String::as_str)
	}

	/// Resolves the complete record for `key`, or `None` if nothing was
	/// declared or registered under it.
	pub fn resolve(&self, key: &str) -> Result<Option<ReporterConfig>, ConfigError> {
		if !self.contains(key) {
			return Ok(None);
		}

		let public = self.public.get(key).cloned().unwrap_or_default();
		let private = self
			.private
			.get(&private_key_for(key))
			.cloned()
			.unwrap_or_default();

		let mut registered = public.registered;
		registered.server_access_token = private.registered;
		let mut declared = public.declared;
		declared.server_access_token = private.declared;

		let mut registry = ConfigRegistry::new();
		registry
			.register(Box::new(InlineSource::module(registered)))
			.register(Box::new(InlineSource::runtime(declared)));
		registry.load().map(Some)
	}

	/// Freezes `key` into an immutable [`RuntimeConfig`].
	pub fn runtime(&self, key: &str) -> Result<Option<RuntimeConfig>, ConfigError> {
		Ok(self.resolve(key)?.map(RuntimeConfig::from))
	}

	/// Public configuration for every namespace, as shipped to browser
	/// sessions: `{ key: { mode, clientOptions, clientAccessToken } }`.
	pub fn public_payload(&self) -> Result<Map<String, Value>, ConfigError> {
		let mut payload = Map::new();
		for key in self.public.keys() {
			if let Some(runtime) = self.runtime(key)? {
				let value = serde_json::to_value(runtime.public()).map_err(|e| {
					ConfigError::invalid_value(key.clone(), format!("unserializable options: {e}"))
				})?;
				payload.insert(key.clone(), value);
			}
		}
		Ok(payload)
	}
}
