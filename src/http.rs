//! Transport primitives for Quiz Master API calls.
//!
//! The module exposes [`ApiTransport`] so downstream crates can integrate custom HTTP stacks.
//! The client never talks to a concrete HTTP library directly: it hands a fully built
//! [`Request`] to the transport and receives a buffered [`Response`] back, which keeps the
//! bearer-attachment and refresh logic independent of the transport choice.

// crates.io
use http::{Request, Response};
// self
use crate::_prelude::*;

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<Response<Vec<u8>>, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// in-flight request, and the returned futures must be `Send` so client futures can hop
/// executors. Responses are fully buffered; the client inspects the status before handing the
/// body to callers.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes the request and buffers the response.
	fn execute(&self, request: Request<Vec<u8>>) -> TransportFuture<'_, Self::TransportError>;
}

/// Maps transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a transport error into a client error.
	fn map_transport_error(&self, error: E) -> Error;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Configure timeouts and TLS on the inner [`ReqwestClient`]; the request timeout is what bounds
/// how long a refresh call—and therefore any request parked behind it—can take.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	type TransportError = ReqwestError;

	fn execute(&self, request: Request<Vec<u8>>) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = Response::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, error: ReqwestError) -> Error {
		if error.is_builder() {
			crate::error::ConfigError::http_client_build(error).into()
		} else {
			crate::error::TransportError::network(error).into()
		}
	}
}
