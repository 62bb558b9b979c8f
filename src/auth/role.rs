//! Account role marker stored alongside the credential pair.

// self
use crate::_prelude::*;

/// Account role attached to a login session.
///
/// The API reports the role during login completion; the client persists it so embedders can
/// pick the right dashboard surface without another round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Teacher account: creates quizzes and reviews per-student rankings.
	Teacher,
	/// Student account: takes quizzes and reviews past answers.
	Student,
}
impl Role {
	/// Returns the stable marker string used in persisted storage.
	pub const fn as_str(self) -> &'static str {
		match self {
			Role::Teacher => "teacher",
			Role::Student => "student",
		}
	}
}
impl Display for Role {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Role {
	type Err = RoleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"teacher" => Ok(Role::Teacher),
			"student" => Ok(Role::Student),
			_ => Err(RoleParseError { value: s.to_owned() }),
		}
	}
}

/// Error returned when a role marker string is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown role marker `{value}`.")]
pub struct RoleParseError {
	/// The unrecognized marker value.
	pub value: String,
}
