//! Rust client for the Quiz Master API—bearer-token sessions, single-flight token refresh, and
//! transport-aware observability in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::CredentialRecord,
		client::{ApiClient, ReqwestApiClient},
		config::ClientConfig,
		store::{CredentialStore, MemoryStore},
	};

	/// Constructs a [`ReqwestApiClient`] backed by an in-memory credential store pointed at the
	/// provided mock server base URL.
	pub fn build_test_client(base_url: &str) -> (ReqwestApiClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let config = ClientConfig::builder(base_url)
			.build()
			.expect("Test client config should build from the mock server URL.");
		let client =
			ApiClient::new(store, config).expect("Reqwest test client should build successfully.");

		(client, store_backend)
	}

	/// Seeds the store with a credential pair so requests go out with a bearer token attached.
	pub fn seed_credentials(store: &MemoryStore, access: &str, refresh: &str) {
		store
			.save(CredentialRecord::new(access, refresh))
			.expect("Seeding test credentials should succeed.");
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
