//! Wire types for the quiz, question, and answer endpoints.

// self
use crate::_prelude::*;

/// Quiz difficulty levels offered by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
	/// Introductory questions.
	Easy,
	/// Standard classroom difficulty.
	Medium,
	/// Challenge questions.
	Hard,
}

/// Question formats supported by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
	/// Lettered alternatives with one correct choice.
	MultipleChoice,
	/// A single true/false statement.
	TrueFalse,
}

/// Quiz as listed and managed by teacher dashboards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
	/// Server-assigned quiz identifier.
	pub id: String,
	/// Display title.
	pub title: String,
	/// Topic the questions are generated from.
	pub topic: String,
	/// Difficulty applied to generated questions.
	pub difficulty: Difficulty,
	/// Number of questions the quiz holds.
	pub question_count: u32,
	/// Format of the generated questions.
	pub question_type: QuestionKind,
	/// Identifier of the teacher who created the quiz.
	pub created_by: String,
	/// Shareable link students use to take the quiz, once published.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub share_link: Option<String>,
}

/// Payload for creating a quiz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
	/// Display title.
	pub title: String,
	/// Topic to generate questions from.
	pub topic: String,
	/// Difficulty applied to generated questions.
	pub difficulty: Difficulty,
	/// Number of questions to generate.
	pub question_count: u32,
	/// Format of the generated questions.
	pub question_type: QuestionKind,
}

/// One lettered alternative of a multiple-choice question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
	/// Alternative letter ("A", "B", ...).
	pub letter: String,
	/// Alternative text.
	pub text: String,
}

/// Question belonging to a quiz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
	/// Server-assigned question identifier.
	pub id: String,
	/// Identifier of the owning quiz.
	pub quiz_id: String,
	/// Question prompt shown to students.
	pub prompt: String,
	/// Question format.
	pub kind: QuestionKind,
	/// Alternatives to choose from.
	pub alternatives: Vec<Alternative>,
	/// Correct answer letter; only present on teacher and review surfaces.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub correct_answer: Option<String>,
	/// Explanation shown during answer review, when available.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub explanation: Option<String>,
}

/// One selected answer submitted by a student.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerChoice {
	/// Question being answered.
	pub question_id: String,
	/// Letter of the chosen alternative.
	pub selected_answer: String,
}

/// Per-question verdict returned after submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionVerdict {
	/// Question the verdict refers to.
	pub question_id: String,
	/// Letter the student chose.
	pub selected_answer: String,
	/// Whether the choice was correct.
	pub correct: bool,
}

/// Grading summary returned after a quiz submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
	/// Per-question verdicts, in submission order.
	pub verdicts: Vec<QuestionVerdict>,
	/// Number of correct answers.
	pub correct: u32,
	/// Number of wrong answers.
	pub wrong: u32,
}

/// One row of the per-quiz student ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
	/// Student identifier.
	pub student_id: String,
	/// Student display name.
	pub name: String,
	/// Student email.
	pub email: String,
	/// Number of correct answers across attempts.
	pub correct: u32,
	/// Number of attempts the student made.
	pub attempts: u32,
	/// Preformatted performance percentage (for example `"87.50%"`).
	pub performance: String,
}

/// One reviewed answer, pairing the student's choice with the graded question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReview {
	/// Letter the student chose.
	pub selected_answer: String,
	/// Whether the choice was correct.
	pub correct: bool,
	/// The question, including the correct answer and explanation.
	pub question: Question,
}

/// A student's reviewed attempt at one quiz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReview {
	/// Quiz the attempt belongs to.
	pub quiz: Quiz,
	/// Reviewed answers, in question order.
	pub answers: Vec<AnswerReview>,
}
