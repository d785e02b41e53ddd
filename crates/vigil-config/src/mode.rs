// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Execution contexts and the install mode that gates them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment a piece of application code runs in.
///
/// The host decides which one is current; this crate never detects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
	/// Browser session.
	Client,
	/// Server-side request processing.
	Server,
}

impl ExecutionContext {
	pub const ALL: [ExecutionContext; 2] = [ExecutionContext::Client, ExecutionContext::Server];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Client => "client",
			Self::Server => "server",
		}
	}
}

impl fmt::Display for ExecutionContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ExecutionContext {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"client" => Ok(Self::Client),
			"server" => Ok(Self::Server),
			_ => Err(ConfigError::UnknownContext(s.to_string())),
		}
	}
}

/// Which execution contexts receive a reporter client.
///
/// Parsing is case-insensitive on every path (`FromStr`, TOML, JSON);
/// serialization always writes the lowercase wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Mode {
	#[serde(rename = "client")]
	ClientOnly,
	#[serde(rename = "server")]
	ServerOnly,
	#[default]
	#[serde(rename = "all")]
	Both,
}

impl Mode {
	/// Returns true if a client should be installed in `context`.
	pub fn includes(&self, context: ExecutionContext) -> bool {
		match (self, context) {
			(Mode::Both, _) => true,
			(Mode::ClientOnly, ExecutionContext::Client) => true,
			(Mode::ServerOnly, ExecutionContext::Server) => true,
			(Mode::ClientOnly, ExecutionContext::Server) => false,
			(Mode::ServerOnly, ExecutionContext::Client) => false,
		}
	}

	/// Contexts this mode installs in, client first.
	pub fn contexts(&self) -> Vec<ExecutionContext> {
		ExecutionContext::ALL
			.into_iter()
			.filter(|ctx| self.includes(*ctx))
			.collect()
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::ClientOnly => "client",
			Self::ServerOnly => "server",
			Self::Both => "all",
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Mode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"client" => Ok(Self::ClientOnly),
			"server" => Ok(Self::ServerOnly),
			"all" => Ok(Self::Both),
			_ => Err(ConfigError::InvalidMode(s.to_string())),
		}
	}
}

impl<'de> Deserialize<'de> for Mode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}
