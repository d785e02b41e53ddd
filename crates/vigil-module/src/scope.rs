// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-context slot holding the installed reporter client.
//!
//! A scope is created once per execution context (one per browser session,
//! one per server process). The installer publishes into it exactly once;
//! afterwards every accessor call returns the same shared client.

use std::sync::{Arc, OnceLock};

use vigil_config::ExecutionContext;

use crate::error::AccessError;

#[derive(Debug)]
enum ScopeState<C> {
	Installed(Arc<C>),
	/// The plugin's mode does not select this context.
	Excluded,
}

/// Application-scoped reporter slot for one execution context.
#[derive(Debug)]
pub struct ReporterScope<C> {
	context: Option<ExecutionContext>,
	state: OnceLock<ScopeState<C>>,
}

impl<C> ReporterScope<C> {
	pub fn new(context: ExecutionContext) -> Self {
		Self {
			context: Some(context),
			state: OnceLock::new(),
		}
	}

	/// Builds a scope from a host-supplied context name. Unrecognised names
	/// give a scope that can never be installed into.
	pub fn for_context_name(name: &str) -> Self {
		Self {
			context: name.parse().ok(),
			state: OnceLock::new(),
		}
	}

	pub fn context(&self) -> Option<ExecutionContext> {
		self.context
	}

	pub fn is_installed(&self) -> bool {
		matches!(self.state.get(), Some(ScopeState::Installed(_)))
	}

	/// True once the installer has run, whether it published a client or
	/// skipped the context.
	pub fn is_settled(&self) -> bool {
		self.state.get().is_some()
	}

	/// Publishes `client`. Returns `None` if the scope was already settled,
	/// in which case `client` is dropped.
	pub(crate) fn publish(&self, client: C) -> Option<Arc<C>> {
		let client = Arc::new(client);
		self.state
			.set(ScopeState::Installed(Arc::clone(&client)))
			.ok()
			.map(|()| client)
	}

	/// Records that the mode excluded this context. Returns false if the
	/// scope was already settled.
	pub(crate) fn mark_excluded(&self) -> bool {
		self.state.set(ScopeState::Excluded).is_ok()
	}

	/// Returns the installed client.
	///
	/// Every call on the same scope yields the same [`Arc`]. Fails with
	/// [`AccessError::NotInitialized`] when the installer has not run, the
	/// mode excluded this context, or the context is unknown.
	pub fn use_reporter(&self) -> Result<Arc<C>, AccessError> {
		match self.state.get() {
			Some(ScopeState::Installed(client)) => Ok(Arc::clone(client)),
			_ => Err(AccessError::NotInitialized {
				context: self.context,
			}),
		}
	}
}
