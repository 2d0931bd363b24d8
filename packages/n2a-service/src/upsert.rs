use n2a_config::DuplicatePolicy;
use n2a_domain::{FlashcardTarget, NoteRequest, TargetError, TargetRejection};

/// Outcome of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult {
	Created { note_id: i64 },
	/// The note already exists and the duplicate policy is `skip`.
	Skipped,
	Failed(TargetError),
}

/// Submits one note. Rejections are returned as results, never as errors.
pub async fn upsert<T>(target: &T, note: &NoteRequest, policy: DuplicatePolicy) -> SyncResult
where
	T: FlashcardTarget,
{
	match target.create_note(note).await {
		Ok(note_id) => SyncResult::Created { note_id },
		Err(TargetError::Rejected(TargetRejection::Duplicate))
			if policy == DuplicatePolicy::Skip =>
			SyncResult::Skipped,
		Err(err) => SyncResult::Failed(err),
	}
}
