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
	auth::CredentialRecord,
	client::{ApiClient, ApiRequest, ReqwestApiClient, SessionObserver},
	config::ClientConfig,
	error::Error,
	store::{CredentialStore, MemoryStore},
};

const REFRESH_BODY: &str = "{\"access_token\":\"A2\",\"refresh_token\":\"R2\"}";

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

fn build_client(server: &MockServer) -> (ReqwestApiClient, Arc<MemoryStore>, Arc<CountingObserver>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn CredentialStore> = store_backend.clone();
	let observer = Arc::new(CountingObserver::default());
	let config = ClientConfig::builder(server.base_url())
		.build()
		.expect("Client config should build from the mock server URL.");
	let client = ApiClient::new(store, config)
		.expect("Reqwest client should build successfully.")
		.with_session_observer(observer.clone());

	(client, store_backend, observer)
}

fn seed(store: &MemoryStore, access: &str, refresh: &str) {
	store
		.save(CredentialRecord::new(access, refresh))
		.expect("Seeding credentials should succeed.");
}

#[tokio::test]
async fn retry_uses_the_rotated_token_and_persists_it() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_client(&server);

	seed(&store, "A1", "R1");

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer A1");
			then.status(401);
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer A2");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token").header("authorization", "Bearer R1");
			then.status(200).header("content-type", "application/json").body(REFRESH_BODY);
		})
		.await;
	let response = client
		.request(ApiRequest::get("/quizzes"))
		.await
		.expect("Request should succeed after the transparent refresh.");

	assert_eq!(response.status().as_u16(), 200);

	stale.assert_async().await;
	refresh.assert_async().await;
	fresh.assert_async().await;

	let record = store
		.load()
		.expect("Store should load after rotation.")
		.expect("Rotated credentials should be present.");

	assert_eq!(record.access_token.expose(), "A2");
	assert_eq!(record.refresh_token.expose(), "R2");
}

#[tokio::test]
async fn concurrent_rejections_share_one_refresh() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_client(&server);

	seed(&store, "A1", "R1");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer A1");
			then.status(401);
		})
		.await;

	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer A2");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token").header("authorization", "Bearer R1");
			then.status(200)
				.header("content-type", "application/json")
				.body(REFRESH_BODY)
				.delay(std::time::Duration::from_millis(250));
		})
		.await;
	let (first, second) = tokio::join!(
		client.request(ApiRequest::get("/quizzes")),
		client.request(ApiRequest::get("/quizzes")),
	);
	let first = first.expect("First concurrent request should succeed.");
	let second = second.expect("Second concurrent request should succeed.");

	assert_eq!(first.status().as_u16(), 200);
	assert_eq!(second.status().as_u16(), 200);

	refresh.assert_calls_async(1).await;
	fresh.assert_calls_async(2).await;

	assert_eq!(client.refresh_metrics.attempts(), 1);
	assert_eq!(client.refresh_metrics.successes(), 1);
}

#[tokio::test]
async fn second_rejection_after_refresh_is_terminal() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_client(&server);

	seed(&store, "A1", "R1");

	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token");
			then.status(200).header("content-type", "application/json").body(REFRESH_BODY);
		})
		.await;
	let response = client
		.request(ApiRequest::get("/quizzes"))
		.await
		.expect("A rejection after the single retry should surface as a normal failed response.");

	assert_eq!(response.status().as_u16(), 401);

	// Original attempt plus exactly one replay; the second 401 must not refresh again.
	protected.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;
}

#[tokio::test]
async fn missing_credentials_fail_without_a_refresh_call() {
	let server = MockServer::start_async().await;
	let (client, store, observer) = build_client(&server);
	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token");
			then.status(200).header("content-type", "application/json").body(REFRESH_BODY);
		})
		.await;
	let err = client
		.request(ApiRequest::get("/quizzes"))
		.await
		.expect_err("Without stored credentials the rejection must be terminal.");

	assert!(matches!(err, Error::AuthExpired { .. }));

	protected.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert!(store.load().expect("Store should load.").is_none());
	assert_eq!(observer.count(), 1);
}

#[tokio::test]
async fn refresh_failure_logs_out_and_rejects_waiters() {
	let server = MockServer::start_async().await;
	let (client, store, observer) = build_client(&server);

	seed(&store, "A1", "R1");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes");
			then.status(401);
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token");
			then.status(500).delay(std::time::Duration::from_millis(250));
		})
		.await;
	let (first, second) = tokio::join!(
		client.request(ApiRequest::get("/quizzes")),
		client.request(ApiRequest::get("/quizzes")),
	);
	let first = first.expect_err("First request must observe the terminal refresh failure.");
	let second = second.expect_err("Parked request must be rejected, not left waiting.");

	assert!(matches!(first, Error::AuthExpired { .. }));
	assert!(matches!(second, Error::AuthExpired { .. }));

	// The parked request observes the logout instead of issuing its own refresh call.
	refresh.assert_calls_async(1).await;

	assert!(store.load().expect("Store should load.").is_none());
	assert_eq!(observer.count(), 2);
	assert_eq!(client.refresh_metrics.failures(), 2);
}

#[tokio::test]
async fn explicit_refresh_rotates_the_stored_pair() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_client(&server);

	seed(&store, "A1", "R1");

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh-token").header("authorization", "Bearer R1");
			then.status(200).header("content-type", "application/json").body(REFRESH_BODY);
		})
		.await;
	let token = client.refresh().await.expect("Explicit refresh should succeed.");

	assert_eq!(token.expose(), "A2");

	refresh.assert_async().await;

	let record = store
		.load()
		.expect("Store should load after rotation.")
		.expect("Rotated credentials should be present.");

	assert_eq!(record.access_token.expose(), "A2");
	assert_eq!(record.refresh_token.expose(), "R2");
	assert_eq!(client.refresh_metrics.successes(), 1);
}
