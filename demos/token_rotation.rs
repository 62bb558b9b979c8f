//! Demonstrates the transparent token rotation: a request rejected with 401 triggers exactly
//! one refresh call and is replayed with the newly issued access token.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use quiz_master_client::{
	auth::CredentialRecord,
	client::{ApiClient, ApiRequest},
	config::ClientConfig,
	store::{CredentialStore, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer expired-access");
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer fresh-access");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;

	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/refresh-token")
				.header("authorization", "Bearer valid-refresh");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"fresh-access\",\"refresh_token\":\"rotated-refresh\"}",
			);
		})
		.await;
	let store_backend = Arc::new(MemoryStore::default());

	store_backend.save(CredentialRecord::new("expired-access", "valid-refresh"))?;

	let store: Arc<dyn CredentialStore> = store_backend.clone();
	let config = ClientConfig::builder(server.base_url()).build()?;
	let client = ApiClient::new(store, config)?;
	let response = client.request(ApiRequest::get("/quizzes")).await?;

	refresh_mock.assert_calls_async(1).await;

	println!("Replayed request finished with HTTP {}.", response.status());
	println!(
		"Refresh endpoint was called once; {} refresh attempt(s) recorded locally.",
		client.refresh_metrics.attempts(),
	);

	let record = store_backend.load()?.expect("Rotation should leave credentials stored.");

	println!("Stored refresh token rotated: {}.", record.refresh_token.expose() == "rotated-refresh");

	Ok(())
}
