//! Typed endpoint helpers covering the quiz, question, and answer surfaces.
//!
//! Every helper goes through [`ApiClient::request`], so bearer attachment and the
//! single-flight refresh apply uniformly; UI layers never touch tokens or auth statuses
//! themselves. Helpers convert non-2xx responses into [`Error::Http`] (or
//! [`Error::Unauthorized`] when a retried request is still rejected) and decode success bodies
//! into the types of [`types`].

pub mod types;

pub use types::*;

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest, ApiResponse, request::is_auth_failure},
	http::{ApiTransport, TransportErrorMapper},
};

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + ApiTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the quizzes visible to the current session.
	pub async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
		expect_success(self.request(ApiRequest::get("/quizzes")).await?)?.json()
	}

	/// Creates a quiz and returns the stored version.
	pub async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz> {
		expect_success(self.request(ApiRequest::post("/quizzes").json(quiz)?).await?)?.json()
	}

	/// Deletes a quiz.
	pub async fn delete_quiz(&self, quiz_id: &str) -> Result<()> {
		expect_success(self.request(ApiRequest::delete(format!("/quizzes/{quiz_id}"))).await?)?;

		Ok(())
	}

	/// Asks the platform to generate questions for a quiz from its topic.
	pub async fn generate_questions(&self, quiz_id: &str) -> Result<Vec<Question>> {
		expect_success(self.request(ApiRequest::post(format!("/questions/{quiz_id}"))).await?)?
			.json()
	}

	/// Persists a reviewed batch of generated questions.
	pub async fn save_questions(&self, quiz_id: &str, questions: &[Question]) -> Result<()> {
		expect_success(
			self.request(ApiRequest::post(format!("/questions/save/{quiz_id}")).json(questions)?)
				.await?,
		)?;

		Ok(())
	}

	/// Fetches the questions of a quiz, as shown to a student taking it.
	pub async fn list_questions(&self, quiz_id: &str) -> Result<Vec<Question>> {
		expect_success(self.request(ApiRequest::get(format!("/questions/{quiz_id}"))).await?)?
			.json()
	}

	/// Submits a student's answers and returns the grading summary.
	pub async fn submit_answers(
		&self,
		quiz_id: &str,
		answers: &[AnswerChoice],
	) -> Result<QuizResult> {
		expect_success(
			self.request(
				ApiRequest::post(format!("/questions/{quiz_id}/responses")).json(answers)?,
			)
			.await?,
		)?
		.json()
	}

	/// Fetches the per-student ranking of a quiz for teacher dashboards.
	pub async fn quiz_ranking(&self, quiz_id: &str) -> Result<Vec<RankingEntry>> {
		expect_success(self.request(ApiRequest::get(format!("/answer/ranking/{quiz_id}"))).await?)?
			.json()
	}

	/// Fetches the best graded answers recorded for a quiz.
	pub async fn best_answers(&self, quiz_id: &str) -> Result<Vec<AnswerReview>> {
		expect_success(self.request(ApiRequest::get(format!("/answer/best/{quiz_id}"))).await?)?
			.json()
	}

	/// Fetches the current student's reviewed attempts at a quiz.
	pub async fn my_answers(&self, quiz_id: &str) -> Result<Vec<QuizReview>> {
		expect_success(self.request(ApiRequest::get(format!("/answer/{quiz_id}"))).await?)?.json()
	}
}

fn expect_success(response: ApiResponse) -> Result<ApiResponse> {
	let status = response.status();

	if response.is_success() {
		Ok(response)
	} else if is_auth_failure(status) {
		Err(Error::Unauthorized { status: status.as_u16() })
	} else {
		Err(Error::Http { status: status.as_u16(), message: response.text() })
	}
}
