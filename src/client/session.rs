//! Session lifecycle: login entry URL, login completion, and logout.

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Role},
	client::ApiClient,
	http::{ApiTransport, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

const LOGIN_ACCESS_TYPE: &str = "offline";
const LOGIN_PROMPT: &str = "select_account";

/// Hook notified when the client ends the session.
///
/// Logout is a navigation concern as much as a storage one: browser shells redirect to the
/// unauthenticated landing surface, desktop shells swap views. The client only clears
/// credentials; embedders implement this trait to drive whatever "return to login" means for
/// their surface. Implementations must tolerate repeated notifications.
pub trait SessionObserver
where
	Self: Send + Sync,
{
	/// Called after stored credentials are cleared, whether by an explicit logout or a terminal
	/// refresh failure.
	fn logged_out(&self);
}

/// Observer that ignores session transitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSessionObserver;
impl SessionObserver for NoopSessionObserver {
	fn logged_out(&self) {}
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the Google OAuth entry URL the embedder should navigate to for login.
	pub fn login_url(&self) -> Url {
		let mut url = self.config.login_url().clone();

		url.query_pairs_mut()
			.append_pair("prompt", LOGIN_PROMPT)
			.append_pair("access_type", LOGIN_ACCESS_TYPE);

		url
	}

	/// Persists the credential pair and role handed back by the login callback.
	pub fn complete_login(
		&self,
		access_token: impl Into<String>,
		refresh_token: impl Into<String>,
		role: Role,
	) -> Result<()> {
		self.store
			.save(CredentialRecord::new(access_token, refresh_token).with_role(role))
			.map_err(Into::into)
	}

	/// Ends the session: clears stored credentials and notifies the session observer.
	///
	/// Logging out with no stored credentials is a no-op on storage and still notifies the
	/// observer, so embedders always land on the unauthenticated surface.
	pub fn logout(&self) -> Result<()> {
		const KIND: FlowKind = FlowKind::Logout;

		let _span = FlowSpan::new(KIND, "logout").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		match self.store.clear() {
			Ok(()) => {
				self.observer.logged_out();
				obs::record_flow_outcome(KIND, FlowOutcome::Success);

				Ok(())
			},
			Err(err) => {
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);

				Err(err.into())
			},
		}
	}

	/// Best-effort logout used by terminal refresh failures; the auth error being surfaced must
	/// not be masked by a storage failure here.
	pub(crate) fn force_logout(&self) {
		let _ = self.logout();
	}
}
