// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Module identity and host compatibility.

use std::path::PathBuf;

use semver::{Comparator, Op, Prerelease, Version, VersionReq};

use crate::error::ModuleError;

/// Name the module registers under.
pub const MODULE_NAME: &str = "vigil";
/// Runtime config namespace holding the public reporter options.
pub const DEFAULT_CONFIG_KEY: &str = "reporter";
/// Host major version the module is written against.
pub const SUPPORTED_HOST_MAJOR: u64 = 3;

/// Static description of the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMeta {
	pub name: String,
	pub version: String,
	/// Namespace under which options are read and runtime config is written.
	pub config_key: String,
	pub compatibility: VersionReq,
	/// Directory with the plugin and accessor sources handed to the host.
	pub runtime_dir: PathBuf,
}

impl Default for ModuleMeta {
	fn default() -> Self {
		Self {
			name: MODULE_NAME.to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			config_key: DEFAULT_CONFIG_KEY.to_string(),
			compatibility: caret(SUPPORTED_HOST_MAJOR),
			runtime_dir: PathBuf::from("runtime"),
		}
	}
}

impl ModuleMeta {
	pub fn with_config_key(mut self, key: impl Into<String>) -> Self {
		self.config_key = key.into();
		self
	}

	pub fn with_compatibility(mut self, req: VersionReq) -> Self {
		self.compatibility = req;
		self
	}

	/// Private runtime key the server token is written to.
	pub fn private_key(&self) -> String {
		private_key_for(&self.config_key)
	}

	pub fn check_compatibility(&self, host: &Version) -> Result<(), ModuleError> {
		if self.compatibility.matches(host) {
			Ok(())
		} else {
			Err(ModuleError::IncompatibleHost {
				module: self.name.clone(),
				required: self.compatibility.clone(),
				found: host.clone(),
			})
		}
	}
}

/// `__{key}ServerAccessToken`, e.g. `__reporterServerAccessToken`.
pub fn private_key_for(config_key: &str) -> String {
	format!("__{config_key}ServerAccessToken")
}

fn caret(major: u64) -> VersionReq {
	VersionReq {
		comparators: vec![Comparator {
			op: Op::Caret,
			major,
			minor: None,
			patch: None,
			pre: Prerelease::EMPTY,
		}],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_meta() {
		let meta = ModuleMeta::default();
		assert_eq!(meta.name, "vigil");
		assert_eq!(meta.config_key, "reporter");
		assert_eq!(meta.private_key(), "__reporterServerAccessToken");
		assert_eq!(meta.compatibility.to_string(), "^3");
	}

	#[test]
	fn accepts_supported_host() {
		let meta = ModuleMeta::default();
		assert!(meta.check_compatibility(&Version::new(3, 12, 4)).is_ok());
	}

	#[test]
	fn rejects_other_major() {
		let meta = ModuleMeta::default();
		let err = meta.check_compatibility(&Version::new(2, 17, 0)).unwrap_err();
		assert!(matches!(err, ModuleError::IncompatibleHost { .. }));
		assert!(err.to_string().contains("^3"));
	}
}
