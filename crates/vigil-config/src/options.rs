// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Opaque reporter client options and their deep merge.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Option key the reporter SDK reads its token from. Tokens are configured
/// separately per context, so this key is never carried in the options.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Open mapping of reporter SDK options.
///
/// Values are passed through untouched; no schema is enforced here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClientOptions(Map<String, Value>);

impl ClientOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds options from a JSON map, dropping the access token key.
	pub fn from_map(mut map: Map<String, Value>) -> Self {
		if map.remove(ACCESS_TOKEN_KEY).is_some() {
			warn!(
				key = ACCESS_TOKEN_KEY,
				"ignoring access token in client options; use clientAccessToken/serverAccessToken"
			);
		}
		Self(map)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Sets an option. Setting the access token key is ignored.
	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
		let key = key.into();
		if key == ACCESS_TOKEN_KEY {
			warn!(key = ACCESS_TOKEN_KEY, "ignoring access token in client options");
		} else {
			self.0.insert(key, value);
		}
		self
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Merges `newer` on top of `self`.
	///
	/// Objects merge key by key at every depth, arrays concatenate with the
	/// newer items first, and a `null` in `newer` leaves the older value.
	/// Anything else in `newer` replaces the older value.
	pub fn merge_from(&mut self, newer: ClientOptions) {
		merge_maps(&mut self.0, newer.0);
	}
}

impl From<Map<String, Value>> for ClientOptions {
	fn from(map: Map<String, Value>) -> Self {
		Self::from_map(map)
	}
}

impl<'de> Deserialize<'de> for ClientOptions {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Map::deserialize(deserializer).map(ClientOptions::from_map)
	}
}

fn merge_maps(base: &mut Map<String, Value>, newer: Map<String, Value>) {
	for (key, value) in newer {
		match base.get_mut(&key) {
			Some(existing) => merge_values(existing, value),
			None => {
				if !value.is_null() {
					base.insert(key, value);
				}
			}
		}
	}
}

fn merge_values(base: &mut Value, newer: Value) {
	match (base, newer) {
		(_, Value::Null) => {}
		(Value::Object(base_map), Value::Object(newer_map)) => merge_maps(base_map, newer_map),
		(Value::Array(base_items), Value::Array(mut newer_items)) => {
			newer_items.append(base_items);
			*base_items = newer_items;
		}
		(base, newer) => *base = newer,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn options(value: Value) -> ClientOptions {
		match value {
			Value::Object(map) => ClientOptions::from_map(map),
			_ => panic!("test options must be an object"),
		}
	}

	#[test]
	fn access_token_key_is_stripped() {
		let opts = options(json!({ "accessToken": "leak", "environment": "prod" }));
		assert!(opts.get(ACCESS_TOKEN_KEY).is_none());
		assert_eq!(opts.get("environment"), Some(&json!("prod")));
	}

	#[test]
	fn insert_refuses_access_token() {
		let mut opts = ClientOptions::new();
		opts.insert(ACCESS_TOKEN_KEY, json!("leak"));
		assert!(opts.is_empty());
	}

	#[test]
	fn nested_objects_merge_key_by_key() {
		let mut base = options(json!({
			"payload": { "environment": "staging", "person": { "id": 1 } },
			"captureUncaught": true
		}));
		base.merge_from(options(json!({
			"payload": { "environment": "production", "code_version": "abc" }
		})));

		assert_eq!(
			Value::Object(base.as_map().clone()),
			json!({
				"payload": {
					"environment": "production",
					"code_version": "abc",
					"person": { "id": 1 }
				},
				"captureUncaught": true
			})
		);
	}

	#[test]
	fn null_does_not_clear_older_value() {
		let mut base = options(json!({ "verbose": true }));
		base.merge_from(options(json!({ "verbose": null, "other": null })));
		assert_eq!(base.get("verbose"), Some(&json!(true)));
		assert!(base.get("other").is_none());
	}

	#[test]
	fn arrays_concatenate_newer_first() {
		let mut base = options(json!({ "ignoredMessages": ["a", "b"] }));
		base.merge_from(options(json!({ "ignoredMessages": ["c"] })));
		assert_eq!(base.get("ignoredMessages"), Some(&json!(["c", "a", "b"])));
	}

	#[test]
	fn scalar_replaces_object() {
		let mut base = options(json!({ "payload": { "a": 1 } }));
		base.merge_from(options(json!({ "payload": "flat" })));
		assert_eq!(base.get("payload"), Some(&json!("flat")));
	}

	#[test]
	fn deserialize_strips_access_token() {
		let opts: ClientOptions =
			serde_json::from_str(r#"{"accessToken":"x","enabled":false}"#).unwrap();
		assert_eq!(opts.len(), 1);
		assert_eq!(opts.get("enabled"), Some(&json!(false)));
	}

	proptest! {
		#[test]
		fn merge_keeps_untouched_keys(
			older in prop::collection::btree_map("[a-f]{1,4}", any::<i64>(), 0..8),
			newer in prop::collection::btree_map("[g-k]{1,4}", any::<i64>(), 0..8),
		) {
			let mut base = ClientOptions::from_map(
				older.iter().map(|(k, v)| (k.clone(), json!(v))).collect(),
			);
			base.merge_from(ClientOptions::from_map(
				newer.iter().map(|(k, v)| (k.clone(), json!(v))).collect(),
			));

			for (k, v) in &older {
				prop_assert_eq!(base.get(k), Some(&json!(v)));
			}
			for (k, v) in &newer {
				prop_assert_eq!(base.get(k), Some(&json!(v)));
			}
		}

		#[test]
		fn newer_scalar_wins(key in "[a-z]{1,6}", old in any::<i64>(), new in any::<i64>()) {
			let mut base = ClientOptions::new();
			base.insert(key.clone(), json!(old));
			let mut newer = ClientOptions::new();
			newer.insert(key.clone(), json!(new));

			base.merge_from(newer);
			prop_assert_eq!(base.get(&key), Some(&json!(new)));
		}
	}
}
