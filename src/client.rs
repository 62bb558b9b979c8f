//! Authenticated Quiz Master API client: bearer attachment, single-flight refresh, and session
//! lifecycle.

pub mod refresh;
pub mod request;
pub mod session;

pub use refresh::RefreshMetrics;
pub use request::{ApiRequest, ApiResponse};
pub use session::{NoopSessionObserver, SessionObserver};

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Role, TokenSecret},
	client::refresh::RefreshGate,
	config::ClientConfig,
	http::{ApiTransport, TransportErrorMapper},
	store::CredentialStore,
};
#[cfg(feature = "reqwest")]
use crate::{
	error::ConfigError,
	http::{ReqwestTransport, ReqwestTransportErrorMapper},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = ApiClient<ReqwestTransport, ReqwestTransportErrorMapper>;

/// Issues authenticated requests against one Quiz Master API deployment.
///
/// The client owns the transport, the credential store, and the refresh gate so the request
/// path can focus on bearer attachment and retry logic. All shared state lives behind `Arc`s;
/// clones observe the same session and the same single-flight refresh coordination.
#[derive(Clone)]
pub struct ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Transport used for every outbound API request.
	pub transport: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Credential store persisting the access/refresh pair and role marker.
	pub store: Arc<dyn CredentialStore>,
	/// Validated endpoint configuration.
	pub config: ClientConfig,
	/// Shared counters for refresh flow outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	pub(crate) observer: Arc<dyn SessionObserver>,
	pub(crate) refresh_gate: Arc<RefreshGate>,
}
impl<C, M> ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_transport(
		store: Arc<dyn CredentialStore>,
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			transport: transport.into(),
			transport_mapper: mapper.into(),
			store,
			config,
			refresh_metrics: Default::default(),
			observer: Arc::new(NoopSessionObserver),
			refresh_gate: Default::default(),
		}
	}

	/// Sets or replaces the session observer notified on logout.
	pub fn with_session_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Returns the stored credential record, if a session is active.
	pub fn credentials(&self) -> Result<Option<CredentialRecord>> {
		Ok(self.store.load()?)
	}

	/// Returns the stored role marker, if a session is active and the role is known.
	pub fn role(&self) -> Result<Option<Role>> {
		Ok(self.store.load()?.and_then(|record| record.role))
	}

	pub(crate) fn access_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.store.load()?.map(|record| record.access_token))
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport, ReqwestTransportErrorMapper> {
	/// Creates a new client for the provided store and configuration.
	///
	/// The client provisions its own reqwest-backed transport, honoring the configured request
	/// timeout. Use [`ApiClient::with_transport`] to supply a custom transport instead.
	pub fn new(
		store: Arc<dyn CredentialStore>,
		config: ClientConfig,
	) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = config.timeout() {
			builder = builder.timeout(timeout);
		}

		let client = builder.build()?;

		Ok(Self::with_transport(
			store,
			config,
			ReqwestTransport::with_client(client),
			ReqwestTransportErrorMapper,
		))
	}
}
impl<C, M> Debug for ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("config", &self.config).finish()
	}
}
