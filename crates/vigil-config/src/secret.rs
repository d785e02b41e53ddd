// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacted access token used for the server-side credential.
//!
//! [`AccessToken`] never prints or serializes its value: `Debug`, `Display`
//! and `Serialize` all emit [`REDACTED`]. Reading the token requires an
//! explicit [`AccessToken::expose`] call, and the backing memory is zeroed
//! on drop.
//!
//! ```
//! use vigil_config::AccessToken;
//!
//! let token = AccessToken::new("srv-123");
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(token.expose(), "srv-123");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder written wherever a token would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// A secret access token. Empty tokens are valid and mean "not configured".
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken {
	inner: String,
}

impl AccessToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			inner: token.into(),
		}
	}

	/// Explicitly access the token value.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AccessToken").field(&REDACTED).finish()
	}
}

impl fmt::Display for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl Serialize for AccessToken {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for AccessToken {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(AccessToken::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_is_redacted() {
		let token = AccessToken::new("super-secret-token");
		let debug = format!("{token:?}");
		assert!(!debug.contains("super-secret-token"));
		assert!(debug.contains(REDACTED));
	}

	#[test]
	fn default_is_empty() {
		assert!(AccessToken::default().is_empty());
		assert_eq!(AccessToken::default().expose(), "");
	}

	#[test]
	fn deserialize_keeps_value() {
		let token: AccessToken = serde_json::from_str(r#""srv-abc""#).unwrap();
		assert_eq!(token.expose(), "srv-abc");
	}

	proptest! {
		#[test]
		fn serialize_never_contains_token(inner in "[a-zA-Z0-9_-]{3,40}") {
			prop_assume!(!REDACTED.contains(&inner));

			let token = AccessToken::new(inner.clone());
			let json = serde_json::to_string(&token).unwrap();
			prop_assert!(!json.contains(&inner));
			prop_assert_eq!(format!("{token}"), REDACTED);
		}
	}
}
