// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Seam to the reporter SDK's client constructor.

use vigil_config::{ClientOptions, ExecutionContext};

/// Constructs a reporter client for one execution context.
///
/// The factory sees the token chosen for the context (possibly empty) and
/// the shared client options. What an empty token means is the SDK's call.
pub trait ClientFactory {
	type Client;
	type Error: std::error::Error + 'static;

	fn create(
		&self,
		context: ExecutionContext,
		access_token: &str,
		options: &ClientOptions,
	) -> Result<Self::Client, Self::Error>;
}

impl<F: ClientFactory + ?Sized> ClientFactory for &F {
	type Client = F::Client;
	type Error = F::Error;

	fn create(
		&self,
		context: ExecutionContext,
		access_token: &str,
		options: &ClientOptions,
	) -> Result<Self::Client, Self::Error> {
		(**self).create(context, access_token, options)
	}
}

/// Adapts a closure into a [`ClientFactory`].
pub struct FnFactory<F>(F);

/// Wraps `f` as a client factory.
///
/// ```
/// use std::convert::Infallible;
/// use vigil_module::factory_fn;
///
/// let factory = factory_fn(|_ctx, token: &str, _opts: &_| {
/// 	Ok::<_, Infallible>(token.to_string())
/// });
/// # let _ = factory;
/// ```
pub fn factory_fn<F, C, E>(f: F) -> FnFactory<F>
where
	F: Fn(ExecutionContext, &str, &ClientOptions) -> Result<C, E>,
	E: std::error::Error + 'static,
{
	FnFactory(f)
}

impl<F, C, E> ClientFactory for FnFactory<F>
where
	F: Fn(ExecutionContext, &str, &ClientOptions) -> Result<C, E>,
	E: std::error::Error + 'static,
{
	type Client = C;
	type Error = E;

	fn create(
		&self,
		context: ExecutionContext,
		access_token: &str,
		options: &ClientOptions,
	) -> Result<C, E> {
		(self.0)(context, access_token, options)
	}
}
