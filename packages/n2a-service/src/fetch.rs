use std::collections::VecDeque;

use n2a_domain::{RawRecord, SourceDatabase, SourceError};

/// Lazily walks every page of one database query.
///
/// Nothing is requested until the first [`RecordPager::next`]. After the last page, or after
/// any error, the pager only yields `Ok(None)`.
pub struct RecordPager<'a, S> {
	source: &'a S,
	database_id: &'a str,
	buffer: VecDeque<RawRecord>,
	cursor: Option<String>,
	done: bool,
	pages: usize,
}
impl<S> RecordPager<'_, S>
where
	S: SourceDatabase,
{
	pub async fn next(&mut self) -> Result<Option<RawRecord>, SourceError> {
		loop {
			if let Some(record) = self.buffer.pop_front() {
				return Ok(Some(record));
			}
			if self.done {
				return Ok(None);
			}

			let page = match self.source.query(self.database_id, self.cursor.as_deref()).await {
				Ok(page) => page,
				Err(err) => {
					self.done = true;

					return Err(err);
				},
			};

			self.pages += 1;
			self.buffer.extend(page.records);

			match page.next_cursor {
				Some(next) if self.cursor.as_deref() == Some(next.as_str()) => {
					tracing::warn!(
						database_id = self.database_id,
						cursor = %next,
						"Source returned the same cursor twice. Stopping pagination."
					);

					self.done = true;
				},
				Some(next) => self.cursor = Some(next),
				None => self.done = true,
			}
		}
	}

	/// Pages fetched so far.
	pub fn pages(&self) -> usize {
		self.pages
	}
}

pub fn fetch<'a, S>(source: &'a S, database_id: &'a str) -> RecordPager<'a, S>
where
	S: SourceDatabase,
{
	RecordPager {
		source,
		database_id,
		buffer: VecDeque::new(),
		cursor: None,
		done: false,
		pages: 0,
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use n2a_domain::QueryPage;

	use super::*;

	/// Always claims another page behind the same cursor.
	struct StuckSource {
		calls: Mutex<usize>,
	}
	impl SourceDatabase for StuckSource {
		async fn query(
			&self,
			_database_id: &str,
			_cursor: Option<&str>,
		) -> Result<QueryPage, SourceError> {
			*self.calls.lock().expect("lock poisoned") += 1;

			Ok(QueryPage {
				records: vec![RawRecord::new("r")],
				next_cursor: Some("same".to_string()),
			})
		}
	}

	#[tokio::test]
	async fn repeated_cursor_ends_pagination() {
		let source = StuckSource { calls: Mutex::new(0) };
		let mut pager = fetch(&source, "db");
		let mut seen = 0;

		while let Some(_record) = pager.next().await.expect("query failed") {
			seen += 1;
		}

		assert_eq!(seen, 2);
		assert_eq!(pager.pages(), 2);
		assert_eq!(*source.calls.lock().expect("lock poisoned"), 2);
	}
}
