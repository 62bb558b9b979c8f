//! Client-level error types shared across the request, refresh, and session paths.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential-storage failure.
	#[error("{0}")]
	Store(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS); no refresh is attempted for these.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The session could not be renewed; credentials were cleared and the embedder was told to
	/// return to the unauthenticated surface.
	#[error("Session expired and could not be refreshed: {reason}.")]
	AuthExpired {
		/// Summary of the terminal refresh failure.
		reason: String,
	},
	/// A request retried once with a freshly issued token was still rejected.
	#[error("API rejected the request with HTTP {status} after a token refresh.")]
	Unauthorized {
		/// HTTP status code returned on the retried request (401 or 403).
		status: u16,
	},
	/// Any non-auth failure status surfaced by a typed endpoint helper.
	#[error("API returned HTTP {status}: {message}.")]
	Http {
		/// HTTP status code of the failed response.
		status: u16,
		/// Response body, decoded lossily for diagnostics.
		message: String,
	},
	/// The API returned a body that could not be decoded into the expected shape.
	#[error("API returned a malformed JSON body.")]
	ResponseParse {
		/// Structured parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response carrying the malformed body.
		status: Option<u16>,
	},
}

/// Configuration and request-construction failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint path does not resolve against the base URL.
	#[error("Endpoint path `{path}` does not resolve against the base URL.")]
	InvalidEndpoint {
		/// Offending endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A request payload could not be serialized to JSON.
	#[error("Request payload could not be serialized.")]
	SerializePayload {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_converts_with_source() {
		let store_error =
			crate::store::StoreError::Backend { message: "snapshot unreachable".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Store(_)));
		assert!(error.to_string().contains("snapshot unreachable"));

		let source = StdError::source(&error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn auth_expired_mentions_the_reason() {
		let error = Error::AuthExpired { reason: "no refresh token is stored".into() };

		assert!(error.to_string().contains("no refresh token is stored"));
	}
}
