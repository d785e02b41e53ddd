// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur while loading reporter configuration.
///
/// Filling defaults never fails; these only come from reading sources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Failed to read a config file that exists.
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Unknown mode string.
	#[error("invalid mode '{0}': expected one of client, server, all")]
	InvalidMode(String),

	/// Unknown execution context name.
	#[error("unknown execution context '{0}'")]
	UnknownContext(String),

	/// An environment variable held a value that could not be parsed.
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// Loading a secret from the environment failed.
	#[error("secret error: {0}")]
	Secret(String),
}

impl ConfigError {
	/// Create an invalid value error
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}
