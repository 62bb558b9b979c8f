#![cfg(feature = "reqwest")]

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use httpmock::prelude::*;
// self
use quiz_master_client::{
	auth::Role,
	client::{ApiClient, ReqwestApiClient, SessionObserver},
	config::ClientConfig,
	error::Error,
	store::{CredentialStore, MemoryStore},
};

#[derive(Debug, Default)]
struct CountingObserver(AtomicUsize);
impl CountingObserver {
	fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}
impl SessionObserver for CountingObserver {
	fn logged_out(&self) {
		self.0.fetch_add(1, Ordering::SeqCst);
	}
}

fn build_client(base_url: &str) -> (ReqwestApiClient, Arc<MemoryStore>, Arc<CountingObserver>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn CredentialStore> = store_backend.clone();
	let observer = Arc::new(CountingObserver::default());
	let config =
		ClientConfig::builder(base_url).build().expect("Client config should build.");
	let client = ApiClient::new(store, config)
		.expect("Reqwest client should build successfully.")
		.with_session_observer(observer.clone());

	(client, store_backend, observer)
}

#[test]
fn login_url_points_at_the_google_entry() {
	let (client, _store, _observer) = build_client("http://localhost:3334");
	let url = client.login_url();

	assert_eq!(url.path(), "/auth/google");
	assert!(url.query_pairs().any(|(k, v)| k == "prompt" && v == "select_account"));
	assert!(url.query_pairs().any(|(k, v)| k == "access_type" && v == "offline"));
}

#[test]
fn complete_login_persists_the_pair_and_role() {
	let (client, store, _observer) = build_client("http://localhost:3334");

	client
		.complete_login("callback-access", "callback-refresh", Role::Teacher)
		.expect("Login completion should persist credentials.");

	let record = store
		.load()
		.expect("Store should load after login.")
		.expect("Credentials should be present after login.");

	assert_eq!(record.access_token.expose(), "callback-access");
	assert_eq!(record.refresh_token.expose(), "callback-refresh");
	assert_eq!(record.role, Some(Role::Teacher));
	assert_eq!(client.role().expect("Role lookup should succeed."), Some(Role::Teacher));
}

#[test]
fn logout_clears_credentials_and_notifies_every_time() {
	let (client, store, observer) = build_client("http://localhost:3334");

	client
		.complete_login("access", "refresh", Role::Student)
		.expect("Login completion should persist credentials.");
	client.logout().expect("Logout should succeed.");

	assert!(store.load().expect("Store should load.").is_none());
	assert_eq!(observer.count(), 1);

	// Logging out again is a storage no-op but still sends the embedder to the landing surface.
	client.logout().expect("Repeated logout should succeed.");

	assert!(store.load().expect("Store should load.").is_none());
	assert_eq!(observer.count(), 2);
}

#[tokio::test]
async fn typed_helpers_map_post_retry_rejections_to_unauthorized() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_client(&server.base_url());

	store
		.save(quiz_master_client::auth::CredentialRecord::new("A1", "R1"))
		.expect("Seeding credentials should succeed.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes");
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"A2\",\"refresh_token\":\"R2\"}");
		})
		.await;

	let err = client
		.list_quizzes()
		.await
		.expect_err("A post-retry rejection must surface as Unauthorized.");

	assert!(matches!(err, Error::Unauthorized { status: 401 }));
}
