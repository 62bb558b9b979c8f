//! Client configuration: base URL, auth endpoint paths, and transport limits.

// std
use std::time::Duration;
// self
use crate::{_prelude::*, error::ConfigError};

/// Validated client configuration produced by [`ClientConfigBuilder`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
	base_url: Url,
	refresh_url: Url,
	login_url: Url,
	timeout: Option<Duration>,
}
impl ClientConfig {
	/// Default path of the Google OAuth login entry point.
	pub const DEFAULT_LOGIN_PATH: &'static str = "/auth/google";
	/// Default path of the token refresh endpoint.
	pub const DEFAULT_REFRESH_PATH: &'static str = "/auth/refresh-token";

	/// Starts a builder for the provided API base URL.
	pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder {
			base_url: base_url.into(),
			refresh_path: Self::DEFAULT_REFRESH_PATH.into(),
			login_path: Self::DEFAULT_LOGIN_PATH.into(),
			timeout: None,
		}
	}

	/// Returns the API base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Returns the fully resolved refresh endpoint.
	pub fn refresh_url(&self) -> &Url {
		&self.refresh_url
	}

	/// Returns the fully resolved login entry point, without login query parameters.
	pub fn login_url(&self) -> &Url {
		&self.login_url
	}

	/// Returns the request timeout applied to the default transport, if configured.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	/// Resolves an endpoint path against the base URL.
	///
	/// Paths are joined verbatim under the base URL's path, so a base of `https://host/api`
	/// resolves `/quizzes` to `https://host/api/quizzes`.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		resolve(&self.base_url, path)
	}
}

fn resolve(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let joined = format!(
		"{}/{}",
		base.as_str().trim_end_matches('/'),
		path.trim_start_matches('/'),
	);

	Url::parse(&joined)
		.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	base_url: String,
	refresh_path: String,
	login_path: String,
	timeout: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Overrides the login entry path.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Applies a request timeout to the default transport.
	///
	/// The timeout also bounds the refresh call, which in turn bounds how long concurrent
	/// requests can stay parked behind an in-flight refresh.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Validates the endpoints and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url =
			Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let refresh_url = resolve(&base_url, &self.refresh_path)?;
		let login_url = resolve(&base_url, &self.login_path)?;

		Ok(ClientConfig { base_url, refresh_url, login_url, timeout: self.timeout })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_resolve_the_auth_endpoints() {
		let config = ClientConfig::builder("http://localhost:3334")
			.build()
			.expect("Default config should build.");

		assert_eq!(config.refresh_url().as_str(), "http://localhost:3334/auth/refresh-token");
		assert_eq!(config.login_url().as_str(), "http://localhost:3334/auth/google");
	}

	#[test]
	fn endpoint_joining_preserves_the_base_path() {
		let config = ClientConfig::builder("https://api.example.com/v1/")
			.build()
			.expect("Config with base path should build.");
		let url = config.endpoint("/quizzes").expect("Endpoint should resolve.");

		assert_eq!(url.as_str(), "https://api.example.com/v1/quizzes");
	}

	#[test]
	fn invalid_base_url_is_rejected() {
		let err = ClientConfig::builder("not a url")
			.build()
			.expect_err("An unparsable base URL must be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
	}
}
