// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration split into public and server-only partitions.
//!
//! [`RuntimeConfig`] is built once at bootstrap and never mutated. Code
//! running in a given [`ExecutionContext`] reads it through
//! [`RuntimeConfig::view`], which only hands out the private partition to
//! the server.

use serde::Serialize;

use crate::layer::ReporterConfig;
use crate::mode::{ExecutionContext, Mode};
use crate::options::ClientOptions;
use crate::secret::AccessToken;

/// Configuration readable from every execution context.
///
/// Serializes as `{ "mode", "clientOptions", "clientAccessToken" }`, the
/// payload handed to browser sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
	pub mode: Mode,
	pub client_options: ClientOptions,
	pub client_access_token: String,
}

/// Configuration readable only on the server. Deliberately not `Serialize`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrivateConfig {
	pub server_access_token: AccessToken,
}

/// Immutable, process-wide reporter configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeConfig {
	public: PublicConfig,
	private: PrivateConfig,
}

impl RuntimeConfig {
	pub fn new(public: PublicConfig, private: PrivateConfig) -> Self {
		Self { public, private }
	}

	pub fn public(&self) -> &PublicConfig {
		&self.public
	}

	pub fn mode(&self) -> Mode {
		self.public.mode
	}

	/// Returns what code running in `context` is allowed to see.
	pub fn view(&self, context: ExecutionContext) -> ContextConfig<'_> {
		match context {
			ExecutionContext::Client => ContextConfig::Client {
				public: &self.public,
			},
			ExecutionContext::Server => ContextConfig::Server {
				public: &self.public,
				private: &self.private,
			},
		}
	}
}

impl From<ReporterConfig> for RuntimeConfig {
	fn from(config: ReporterConfig) -> Self {
		let (public, private) = config.partition();
		Self { public, private }
	}
}

/// Context-scoped view over [`RuntimeConfig`].
#[derive(Debug, Clone, Copy)]
pub enum ContextConfig<'a> {
	Client {
		public: &'a PublicConfig,
	},
	Server {
		public: &'a PublicConfig,
		private: &'a PrivateConfig,
	},
}

impl<'a> ContextConfig<'a> {
	pub fn context(&self) -> ExecutionContext {
		match *self {
			Self::Client { .. } => ExecutionContext::Client,
			Self::Server { .. } => ExecutionContext::Server,
		}
	}

	pub fn public(&self) -> &'a PublicConfig {
		match *self {
			Self::Client { public } | Self::Server { public, .. } => public,
		}
	}

	/// Server-only partition; `None` in the client context.
	pub fn private(&self) -> Option<&'a PrivateConfig> {
		match *self {
			Self::Client { .. } => None,
			Self::Server { private, .. } => Some(private),
		}
	}

	/// Token the reporter client for this context is constructed with.
	pub fn access_token(&self) -> &'a str {
		match *self {
			Self::Client { public } => &public.client_access_token,
			Self::Server { private, .. } => private.server_access_token.expose(),
		}
	}

	pub fn client_options(&self) -> &'a ClientOptions {
		&self.public().client_options
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::ReporterOptions;
	use serde_json::json;

	fn runtime(client: &str, server: &str) -> RuntimeConfig {
		ReporterOptions::new()
			.with_client_access_token(client)
			.with_server_access_token(server)
			.finalize()
			.into()
	}

	#[test]
	fn client_view_has_no_private_partition() {
		let config = runtime("abc", "srv");
		let view = config.view(ExecutionContext::Client);
		assert!(view.private().is_none());
		assert_eq!(view.access_token(), "abc");
		assert_eq!(view.context(), ExecutionContext::Client);
	}

	#[test]
	fn server_view_uses_server_token() {
		let config = runtime("abc", "srv");
		let view = config.view(ExecutionContext::Server);
		assert_eq!(view.access_token(), "srv");
		assert!(view.private().is_some());
	}

	#[test]
	fn public_payload_shape() {
		let config = runtime("abc", "");
		let payload = serde_json::to_value(config.public()).unwrap();
		assert_eq!(
			payload,
			json!({ "mode": "all", "clientOptions": {}, "clientAccessToken": "abc" })
		);
	}
}
