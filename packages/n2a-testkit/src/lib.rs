//! In-memory stand-ins for Notion and Anki.

use std::{
	collections::{HashMap, HashSet},
	sync::{Mutex, MutexGuard, PoisonError},
};

use n2a_domain::{
	FlashcardTarget, NoteRequest, QueryPage, RawRecord, SourceDatabase, SourceError, TargetError,
	TargetRejection,
};

const CURSOR_PREFIX: &str = "page-";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Paged record source. Databases not registered answer with a 404 status error.
#[derive(Debug, Default)]
pub struct FakeSource {
	pages: HashMap<String, Vec<Vec<RawRecord>>>,
	failures: HashMap<String, SourceError>,
	queries: Mutex<Vec<(String, Option<String>)>>,
}
impl FakeSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Splits `records` into pages of `page_size` (at least one page, possibly empty).
	pub fn with_records(
		mut self,
		database_id: &str,
		records: Vec<RawRecord>,
		page_size: usize,
	) -> Self {
		let pages = if records.is_empty() {
			vec![Vec::new()]
		} else {
			records.chunks(page_size.max(1)).map(<[RawRecord]>::to_vec).collect()
		};

		self.pages.insert(database_id.to_string(), pages);

		self
	}

	pub fn with_failure(mut self, database_id: &str, error: SourceError) -> Self {
		self.failures.insert(database_id.to_string(), error);

		self
	}

	/// Every `(database_id, cursor)` pair queried so far.
	pub fn queries(&self) -> Vec<(String, Option<String>)> {
		lock(&self.queries).clone()
	}
}
impl SourceDatabase for FakeSource {
	async fn query(
		&self,
		database_id: &str,
		cursor: Option<&str>,
	) -> Result<QueryPage, SourceError> {
		lock(&self.queries).push((database_id.to_string(), cursor.map(str::to_string)));

		if let Some(error) = self.failures.get(database_id) {
			return Err(error.clone());
		}

		let Some(pages) = self.pages.get(database_id) else {
			return Err(SourceError::Status {
				status: 404,
				message: format!("object_not_found: {database_id}"),
			});
		};
		let index = match cursor {
			None => 0,
			Some(cursor) => cursor
				.strip_prefix(CURSOR_PREFIX)
				.and_then(|index| index.parse::<usize>().ok())
				.ok_or_else(|| SourceError::Status {
					status: 400,
					message: format!("validation_error: bad cursor {cursor}"),
				})?,
		};
		let records = pages.get(index).cloned().unwrap_or_default();
		let next_cursor =
			(index + 1 < pages.len()).then(|| format!("{CURSOR_PREFIX}{}", index + 1));

		Ok(QueryPage { records, next_cursor })
	}
}

/// Note store that enforces decks, models and per-deck first-field uniqueness like Anki.
#[derive(Debug, Default)]
pub struct FakeTarget {
	decks: HashSet<String>,
	models: HashSet<String>,
	notes: Mutex<Vec<NoteRequest>>,
	attempts: Mutex<Vec<NoteRequest>>,
}
impl FakeTarget {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_deck(mut self, deck: &str) -> Self {
		self.decks.insert(deck.to_string());

		self
	}

	pub fn with_model(mut self, model: &str) -> Self {
		self.models.insert(model.to_string());

		self
	}

	/// Notes accepted so far.
	pub fn notes(&self) -> Vec<NoteRequest> {
		lock(&self.notes).clone()
	}

	/// Every create request, accepted or not.
	pub fn attempts(&self) -> Vec<NoteRequest> {
		lock(&self.attempts).clone()
	}

	fn first_field(note: &NoteRequest) -> &str {
		note.fields.iter().next().map(|(_, text)| text).unwrap_or_default()
	}
}
impl FlashcardTarget for FakeTarget {
	async fn create_note(&self, note: &NoteRequest) -> Result<i64, TargetError> {
		lock(&self.attempts).push(note.clone());

		if !self.decks.contains(&note.deck) {
			return Err(TargetError::Rejected(TargetRejection::MissingDeck));
		}
		if !self.models.contains(&note.model) {
			return Err(TargetError::Rejected(TargetRejection::MissingModel));
		}

		let first = Self::first_field(note);

		if first.trim().is_empty() {
			return Err(TargetError::Rejected(TargetRejection::EmptyNote));
		}

		let mut notes = lock(&self.notes);

		if notes.iter().any(|existing| {
			existing.deck == note.deck
				&& existing.model == note.model
				&& Self::first_field(existing) == first
		}) {
			return Err(TargetError::Rejected(TargetRejection::Duplicate));
		}

		notes.push(note.clone());

		Ok(notes.len() as i64)
	}
}
