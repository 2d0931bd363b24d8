use std::fmt;

use crate::RenderedFields;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
	pub deck: String,
	pub model: String,
	pub fields: RenderedFields,
	pub tags: Vec<String>,
}

/// Why the flashcard application refused a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRejection {
	Duplicate,
	MissingDeck,
	MissingModel,
	EmptyNote,
	Other(String),
}
impl fmt::Display for TargetRejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Duplicate => f.write_str("duplicate"),
			Self::MissingDeck => f.write_str("missing_deck"),
			Self::MissingModel => f.write_str("missing_model"),
			Self::EmptyNote => f.write_str("empty_note"),
			Self::Other(message) => f.write_str(message),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
	#[error("Target rejected the note: {0}")]
	Rejected(TargetRejection),
	#[error("Target is unavailable: {message}")]
	Unavailable { message: String },
}

/// Write access to the flashcard application. Returns the created note id.
pub trait FlashcardTarget {
	fn create_note(
		&self,
		note: &NoteRequest,
	) -> impl Future<Output = Result<i64, TargetError>> + Send;
}
