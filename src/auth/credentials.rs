//! Credential pair record persisted by the client between sessions.

// self
use crate::{
	_prelude::*,
	auth::{Role, TokenSecret},
};

/// Access/refresh token pair plus the role marker, as held in durable storage.
///
/// The record is replaced wholesale by a successful login or refresh and removed by logout; the
/// two secrets always rotate together.
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
	/// Short-lived secret attached to every API request.
	pub access_token: TokenSecret,
	/// Longer-lived secret used solely to obtain a new access token.
	pub refresh_token: TokenSecret,
	/// Role marker reported by the login callback, when known.
	pub role: Option<Role>,
	/// Instant the current pair was issued or last rotated.
	pub issued_at: OffsetDateTime,
}
impl CredentialRecord {
	/// Creates a record for a freshly issued credential pair, stamped with the current clock.
	pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
			role: None,
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Attaches the role marker reported at login.
	pub fn with_role(mut self, role: Role) -> Self {
		self.role = Some(role);

		self
	}

	/// Overrides the issuance instant.
	pub fn with_issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = instant;

		self
	}

	/// Produces the record that replaces this one after a successful refresh.
	///
	/// Both secrets rotate; the role marker survives the rotation.
	pub(crate) fn rotated(
		&self,
		access_token: impl Into<String>,
		refresh_token: impl Into<String>,
	) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
			role: self.role,
			issued_at: OffsetDateTime::now_utc(),
		}
	}
}
impl Debug for CredentialRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialRecord")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &"<redacted>")
			.field("role", &self.role)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}
