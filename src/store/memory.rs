//! Thread-safe in-memory [`CredentialStore`] implementation for tests and embedders with their
//! own persistence.

// self
use crate::{
	_prelude::*,
	auth::CredentialRecord,
	store::{CredentialStore, StoreError},
};

/// Keeps the credential record in process memory; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<CredentialRecord>>>);
impl CredentialStore for MemoryStore {
	fn load(&self) -> Result<Option<CredentialRecord>, StoreError> {
		Ok(self.0.read().clone())
	}

	fn save(&self, record: CredentialRecord) -> Result<(), StoreError> {
		*self.0.write() = Some(record);

		Ok(())
	}

	fn clear(&self) -> Result<(), StoreError> {
		*self.0.write() = None;

		Ok(())
	}
}
