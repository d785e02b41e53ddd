// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial option layers and the fully resolved reporter configuration.

use serde::Deserialize;

use crate::mode::Mode;
use crate::options::ClientOptions;
use crate::runtime::{PrivateConfig, PublicConfig};
use crate::secret::AccessToken;

/// Reporter options as supplied by one caller (partial, for merging).
///
/// Every field is optional; unset fields fall back to the previous layer and
/// finally to the defaults applied by [`ReporterOptions::finalize`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterOptions {
	#[serde(default)]
	pub client_access_token: Option<String>,
	#[serde(default)]
	pub server_access_token: Option<AccessToken>,
	#[serde(default)]
	pub mode: Option<Mode>,
	#[serde(default, alias = "clientOptions")]
	pub config: Option<ClientOptions>,
}

impl ReporterOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_client_access_token(mut self, token: impl Into<String>) -> Self {
		self.client_access_token = Some(token.into());
		self
	}

	pub fn with_server_access_token(mut self, token: impl Into<String>) -> Self {
		self.server_access_token = Some(AccessToken::new(token));
		self
	}

	pub fn with_mode(mut self, mode: Mode) -> Self {
		self.mode = Some(mode);
		self
	}

	pub fn with_config(mut self, config: ClientOptions) -> Self {
		self.config = Some(config);
		self
	}

	/// Merges `other` on top of `self`: fields set in `other` win, unset
	/// fields keep their current value, and client options deep-merge.
	pub fn merge(&mut self, other: ReporterOptions) {
		if other.client_access_token.is_some() {
			self.client_access_token = other.client_access_token;
		}
		if other.server_access_token.is_some() {
			self.server_access_token = other.server_access_token;
		}
		if other.mode.is_some() {
			self.mode = other.mode;
		}
		if let Some(config) = other.config {
			self.config.get_or_insert_with(ClientOptions::new).merge_from(config);
		}
	}

	/// Fills unset fields with defaults. Never fails.
	pub fn finalize(self) -> ReporterConfig {
		ReporterConfig {
			client_access_token: self.client_access_token.unwrap_or_default(),
			server_access_token: self.server_access_token.unwrap_or_default(),
			mode: self.mode.unwrap_or_default(),
			client_options: self.config.unwrap_or_default(),
		}
	}
}

/// Fully resolved reporter configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReporterConfig {
	pub client_access_token: String,
	pub server_access_token: AccessToken,
	pub mode: Mode,
	pub client_options: ClientOptions,
}

impl ReporterConfig {
	/// Splits the record into its publicly readable and server-only parts.
	pub fn partition(self) -> (PublicConfig, PrivateConfig) {
		(
			PublicConfig {
				mode: self.mode,
				client_options: self.client_options,
				client_access_token: self.client_access_token,
			},
			PrivateConfig {
				server_access_token: self.server_access_token,
			},
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn arb_mode() -> impl Strategy<Value = Mode> {
		prop_oneof![Just(Mode::ClientOnly), Just(Mode::ServerOnly), Just(Mode::Both)]
	}

	fn arb_options() -> impl Strategy<Value = ReporterOptions> {
		(
			proptest::option::of("[a-z0-9]{0,12}"),
			proptest::option::of("[a-z0-9]{0,12}"),
			proptest::option::of(arb_mode()),
			proptest::option::of(prop::collection::btree_map("[a-z]{1,5}", any::<u32>(), 0..5)),
		)
			.prop_map(|(client, server, mode, config)| ReporterOptions {
				client_access_token: client,
				server_access_token: server.map(AccessToken::new),
				mode,
				config: config.map(|m| {
					ClientOptions::from_map(m.into_iter().map(|(k, v)| (k, json!(v))).collect())
				}),
			})
	}

	fn object(value: serde_json::Value) -> ClientOptions {
		ClientOptions::from_map(value.as_object().cloned().unwrap())
	}

	#[test]
	fn empty_layer_finalizes_to_defaults() {
		let config = ReporterOptions::default().finalize();
		assert_eq!(config.client_access_token, "");
		assert!(config.server_access_token.is_empty());
		assert_eq!(config.mode, Mode::Both);
		assert!(config.client_options.is_empty());
	}

	#[test]
	fn deserializes_camel_case_keys() {
		let layer: ReporterOptions = serde_json::from_value(json!({
			"clientAccessToken": "abc",
			"serverAccessToken": "srv",
			"mode": "client",
			"config": { "environment": "prod" }
		}))
		.unwrap();

		assert_eq!(layer.client_access_token.as_deref(), Some("abc"));
		assert_eq!(
			layer.server_access_token.as_ref().map(|t| t.expose()),
			Some("srv")
		);
		assert_eq!(layer.mode, Some(Mode::ClientOnly));
		assert_eq!(
			layer.config.as_ref().and_then(|c| c.get("environment")),
			Some(&json!("prod"))
		);
	}

	#[test]
	fn partition_keeps_server_token_private() {
		let config = ReporterOptions::new()
			.with_client_access_token("abc")
			.with_server_access_token("srv-secret")
			.finalize();

		let (public, private) = config.partition();
		assert_eq!(public.client_access_token, "abc");
		assert_eq!(private.server_access_token.expose(), "srv-secret");
		let json = serde_json::to_string(&public).unwrap();
		assert!(!json.contains("srv-secret"));
	}

	#[test]
	fn merge_deep_merges_client_options() {
		let mut first = ReporterOptions::new().with_config(object(
			json!({ "payload": { "environment": "staging" }, "verbose": true }),
		));
		first.merge(
			ReporterOptions::new().with_config(object(json!({ "payload": { "code_version": "abc" } }))),
		);

		let config = first.finalize().client_options;
		assert_eq!(
			config.get("payload"),
			Some(&json!({ "environment": "staging", "code_version": "abc" }))
		);
		assert_eq!(config.get("verbose"), Some(&json!(true)));
	}

	#[test]
	fn null_options_are_dropped_regardless_of_history() {
		let mut once = ReporterOptions::new();
		once.merge(ReporterOptions::new().with_config(object(json!({ "verbose": null, "a": 1 }))));

		let mut twice = ReporterOptions::new().with_config(object(json!({ "a": 0 })));
		twice.merge(ReporterOptions::new().with_config(object(json!({ "verbose": null, "a": 1 }))));

		let once = once.finalize().client_options;
		let twice = twice.finalize().client_options;
		assert!(once.get("verbose").is_none());
		assert_eq!(once, twice);
	}

	proptest! {
		#[test]
		fn finalize_preserves_explicit_fields(layer in arb_options()) {
			let config = layer.clone().finalize();

			if let Some(token) = &layer.client_access_token {
				prop_assert_eq!(&config.client_access_token, token);
			}
			if let Some(token) = &layer.server_access_token {
				prop_assert_eq!(config.server_access_token.expose(), token.expose());
			}
			if let Some(mode) = layer.mode {
				prop_assert_eq!(config.mode, mode);
			}
			if let Some(opts) = &layer.config {
				prop_assert_eq!(&config.client_options, opts);
			}
		}

		#[test]
		fn later_layer_wins_and_absent_fields_retain(first in arb_options(), second in arb_options()) {
			let mut merged = first.clone();
			merged.merge(second.clone());

			prop_assert_eq!(
				merged.client_access_token.clone(),
				second.client_access_token.clone().or(first.client_access_token.clone())
			);
			prop_assert_eq!(
				merged.server_access_token.clone(),
				second.server_access_token.clone().or(first.server_access_token.clone())
			);
			prop_assert_eq!(merged.mode, second.mode.or(first.mode));

			if let Some(opts) = &second.config {
				let merged_opts = merged.config.as_ref().unwrap();
				for (key, value) in opts.as_map() {
					prop_assert_eq!(merged_opts.get(key), Some(value));
				}
			}
			if let Some(opts) = &first.config {
				let merged_opts = merged.config.as_ref().unwrap();
				for key in opts.as_map().keys() {
					prop_assert!(merged_opts.get(key).is_some());
				}
			}
		}

		#[test]
		fn server_token_never_in_public_partition(
			layer in arb_options(),
			secret in "SRV_[A-Z0-9]{4,12}",
		) {
			let mut layer = layer;
			layer.server_access_token = Some(AccessToken::new(secret.clone()));
			let (public, private) = layer.finalize().partition();
			let json = serde_json::to_value(&public).unwrap();

			prop_assert_eq!(private.server_access_token.expose(), secret.as_str());
			prop_assert!(json.get("serverAccessToken").is_none());
			prop_assert!(!json.to_string().contains(&secret));
		}
	}
}
