//! Storage contracts and built-in credential store implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::CredentialRecord};

/// Durable key-value backend holding the credential record between sessions.
///
/// The contract is synchronous: backends are expected to answer from process memory and flush
/// snapshots eagerly, the way browser-local storage does. All three operations must be usable
/// from any thread; the client calls them from concurrent request paths.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the stored credential record, if present.
	fn load(&self) -> Result<Option<CredentialRecord>, StoreError>;

	/// Persists or replaces the credential record.
	fn save(&self, record: CredentialRecord) -> Result<(), StoreError>;

	/// Removes the credential record. Clearing an empty store succeeds.
	fn clear(&self) -> Result<(), StoreError>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage medium.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
