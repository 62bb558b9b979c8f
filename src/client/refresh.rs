//! Coordinated token refresh with single-flight deduplication and FIFO replay.
//!
//! The client guarantees that at most one refresh call is in flight per session. The first
//! request rejected with 401/403 acquires the gate and performs the refresh; every request
//! rejected while that call is in flight parks on the same gate (the waiter queue) and is woken
//! in FIFO order once the rotation lands. Waiters re-check the rotation epoch on wake: if it
//! moved, they replay with the freshly stored token instead of refreshing again; if it did not
//! (the refresh failed and forced a logout), they observe the empty store and fail with
//! `AuthExpired` without touching the network.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::{ApiClient, ApiRequest, ApiResponse},
	http::{ApiTransport, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Single-flight refresh coordination owned by one client instance.
///
/// `flight` serializes refresh attempts; its waiter list is the queue of parked requests.
/// `epoch` counts successful rotations so a waiter can tell whether the refresh it parked
/// behind already produced a fresh token.
#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
	pub(crate) flight: AsyncMutex<()>,
	epoch: Mutex<u64>,
}
impl RefreshGate {
	pub(crate) fn epoch(&self) -> u64 {
		*self.epoch.lock()
	}

	fn advance(&self) {
		*self.epoch.lock() += 1;
	}
}

/// Success body of the refresh endpoint; field names are fixed by the API contract.
#[derive(Debug, Deserialize)]
pub(crate) struct RefreshGrant {
	pub access_token: String,
	pub refresh_token: String,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Forces a token rotation, serialized behind the same gate as automatic refreshes.
	///
	/// Returns the newly issued access token. On failure the stored credentials are cleared,
	/// the session observer is notified, and the caller receives [`Error::AuthExpired`].
	pub async fn refresh(&self) -> Result<TokenSecret> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _flight = self.refresh_gate.flight.lock().await;

				self.refresh_locked().await
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Joins the in-flight refresh, if any, or performs one.
	///
	/// `observed_epoch` is the gate epoch sampled before the failed request went out. If the
	/// epoch moved by the time the gate is acquired, a rotation already happened and the stored
	/// token is reused as-is; the rejected request must not trigger a second refresh with it.
	pub(crate) async fn join_refresh(&self, observed_epoch: u64) -> Result<TokenSecret> {
		let _flight = self.refresh_gate.flight.lock().await;

		match self.access_token()? {
			// A rotation landed while this request was parked; replay with its token.
			Some(token) if self.refresh_gate.epoch() != observed_epoch => Ok(token),
			_ => self.refresh_locked().await,
		}
	}

	async fn refresh_locked(&self) -> Result<TokenSecret> {
		self.refresh_metrics.record_attempt();

		let record = self.store.load().map_err(|err| {
			self.refresh_metrics.record_failure();

			Error::from(err)
		})?;
		let Some(record) = record else {
			self.refresh_metrics.record_failure();
			self.force_logout();

			return Err(Error::AuthExpired { reason: "no refresh token is stored".into() });
		};
		let wire_request = ApiRequest::post(self.config.refresh_url().path())
			.to_http(self.config.refresh_url().clone(), Some(&record.refresh_token))
			.map_err(|err| {
				self.refresh_metrics.record_failure();

				Error::from(err)
			})?;
		let response = match self.transport.execute(wire_request).await {
			Ok(response) => ApiResponse::from_http(response),
			Err(err) => {
				let mapped = self.transport_mapper.map_transport_error(err);

				self.refresh_metrics.record_failure();
				self.force_logout();

				return Err(Error::AuthExpired {
					reason: format!("refresh call failed ({mapped})"),
				});
			},
		};

		if !response.is_success() {
			self.refresh_metrics.record_failure();
			self.force_logout();

			return Err(Error::AuthExpired {
				reason: format!("refresh endpoint returned HTTP {}", response.status()),
			});
		}

		let grant: RefreshGrant = match response.json() {
			Ok(grant) => grant,
			Err(err) => {
				self.refresh_metrics.record_failure();
				self.force_logout();

				return Err(Error::AuthExpired {
					reason: format!("refresh endpoint returned a malformed body ({err})"),
				});
			},
		};
		let rotated = record.rotated(grant.access_token, grant.refresh_token);
		let access = rotated.access_token.clone();

		self.store.save(rotated).map_err(|err| {
			self.refresh_metrics.record_failure();

			Error::from(err)
		})?;
		self.refresh_gate.advance();
		self.refresh_metrics.record_success();

		Ok(access)
	}
}
