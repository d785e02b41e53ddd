// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment helpers, including `VAR` / `VAR_FILE` token loading.

use std::path::PathBuf;
use std::{env, fs};

use crate::error::ConfigError;
use crate::secret::AccessToken;

/// Reads a non-empty environment variable.
pub fn env_var(name: &str) -> Option<String> {
	env::var(name).ok().filter(|s| !s.is_empty())
}

/// Loads a token from `{var}_FILE` (path to a file) or `{var}` (value).
///
/// The file variant wins when both are set, and a single trailing newline is
/// stripped from file contents. Unlike [`env_var`], an explicitly empty
/// `{var}` yields an empty token rather than `None`.
pub fn load_token_env(var: &str) -> Result<Option<AccessToken>, ConfigError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path) = env::var(&file_var) {
		if path.is_empty() {
			return Err(ConfigError::Secret(format!("{file_var} is set but empty")));
		}

		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|e| {
			ConfigError::Secret(format!("failed to read {}: {e}", path.display()))
		})?;
		let token = content.strip_suffix('\n').unwrap_or(&content);
		return Ok(Some(AccessToken::new(token)));
	}

	Ok(env::var(var).ok().map(AccessToken::new))
}
