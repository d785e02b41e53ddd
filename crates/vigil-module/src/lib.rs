// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error reporter integration for an application host.
//!
//! This crate provides:
//! - [`ReporterModule`], which registers configuration, the accessor export
//!   and the installer plugin with a [`Host`] at build time
//! - [`ReporterPlugin`], which constructs one client per execution context
//!   when the configured mode selects it
//! - [`ReporterScope`], the per-context capability that owns the installed
//!   client and hands it out through [`use_reporter`]
//!
//! # Usage
//!
//! ```ignore
//! use semver::Version;
//! use vigil_config::{ExecutionContext, Mode, ReporterOptions};
//! use vigil_module::{use_reporter, AppHost, ReporterModule};
//!
//! let mut host = AppHost::new(Version::new(3, 4, 0));
//! ReporterModule::new().setup(
//! 	ReporterOptions::new().with_client_access_token("abc").with_mode(Mode::Both),
//! 	&mut host,
//! )?;
//!
//! let runtime = host.runtime("reporter")?;
//! let scope = host.install_context("reporter", ExecutionContext::Server, &runtime, &factory)?;
//! let reporter = use_reporter(&scope)?;
//! ```

pub mod error;
pub mod factory;
pub mod host;
pub mod meta;
pub mod module;
pub mod plugin;
pub mod scope;
pub mod store;

pub use error::{AccessError, InstallError, ModuleError};
pub use factory::{factory_fn, ClientFactory, FnFactory};
pub use host::{AppHost, ExportSpec, Host, PluginSpec};
pub use meta::{private_key_for, ModuleMeta, DEFAULT_CONFIG_KEY, MODULE_NAME};
pub use module::{ReporterModule, ACCESSOR_NAME};
pub use plugin::{Installation, ReporterPlugin};
pub use scope::ReporterScope;
pub use store::RuntimeConfigStore;

use std::sync::Arc;

/// Returns the reporter client installed in `scope`.
///
/// See [`ReporterScope::use_reporter`].
pub fn use_reporter<C>(scope: &ReporterScope<C>) -> Result<Arc<C>, AccessError> {
	scope.use_reporter()
}
