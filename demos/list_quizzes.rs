//! Demonstrates building a client against a mock Quiz Master API and listing quizzes with a
//! stored bearer token attached automatically.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use quiz_master_client::{
	auth::{CredentialRecord, Role},
	client::ApiClient,
	config::ClientConfig,
	store::{CredentialStore, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/quizzes").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"[{\"id\":\"quiz-1\",\"title\":\"Fractions\",\"topic\":\"math\",\
				 \"difficulty\":\"easy\",\"questionCount\":5,\
				 \"questionType\":\"multiple-choice\",\"createdBy\":\"teacher-1\"}]",
			);
		})
		.await;

	let store_backend = Arc::new(MemoryStore::default());

	store_backend
		.save(CredentialRecord::new("demo-access", "demo-refresh").with_role(Role::Teacher))?;

	let store: Arc<dyn CredentialStore> = store_backend;
	let config = ClientConfig::builder(server.base_url()).build()?;
	let client = ApiClient::new(store, config)?;
	let quizzes = client.list_quizzes().await?;

	println!("Fetched {} quiz(es); first title: {}.", quizzes.len(), quizzes[0].title);
	println!("Login entry for new sessions: {}.", client.login_url());

	Ok(())
}
