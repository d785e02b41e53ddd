// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for module setup, plugin installation and client access.

use thiserror::Error;
use vigil_config::{ConfigError, ExecutionContext};

/// Errors raised while registering the module with a host.
#[derive(Debug, Error)]
pub enum ModuleError {
	/// The host version is outside the module's compatibility range.
	#[error("{module} requires host {required}, found {found}")]
	IncompatibleHost {
		module: String,
		required: semver::VersionReq,
		found: semver::Version,
	},

	/// No configuration was registered under the given key.
	#[error("no reporter configuration registered under '{0}'")]
	NotRegistered(String),

	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Errors raised by the installer.
///
/// `E` is the client factory's own error type; it is carried unchanged.
#[derive(Debug, Error)]
pub enum InstallError<E>
where
	E: std::error::Error + 'static,
{
	/// The client factory failed.
	#[error("reporter client construction failed: {0}")]
	Client(#[source] E),

	/// The installer already ran for this scope.
	#[error("reporter already installed for the {0} context")]
	AlreadyInstalled(ExecutionContext),

	/// The scope was created for a context name the host did not recognise.
	#[error("cannot install reporter outside a known execution context")]
	UnknownContext,
}

impl<E> InstallError<E>
where
	E: std::error::Error + 'static,
{
	/// Returns the factory error, if that is what failed.
	pub fn client_error(&self) -> Option<&E> {
		match self {
			Self::Client(e) => Some(e),
			_ => None,
		}
	}
}

/// Errors raised by the accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
	/// No client has been published for this context: the installer has not
	/// run, the mode excluded the context, or the context is unknown.
	#[error("reporter not initialized for {}", context_label(.context))]
	NotInitialized { context: Option<ExecutionContext> },
}

fn context_label(context: &Option<ExecutionContext>) -> String {
	match context {
		Some(ctx) => format!("the {ctx} context"),
		None => "an unknown context".to_string(),
	}
}
