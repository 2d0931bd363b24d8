use crate::RawRecord;

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
	pub records: Vec<RawRecord>,
	/// Cursor for the following page; `None` once the result set is exhausted.
	pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
	#[error("Source returned HTTP {status}: {message}")]
	Status { status: u16, message: String },
	#[error("Source request failed: {message}")]
	Transport { message: String },
	#[error("Source response is invalid: {message}")]
	InvalidResponse { message: String },
}

/// Read access to a paginated database of records.
pub trait SourceDatabase {
	fn query(
		&self,
		database_id: &str,
		cursor: Option<&str>,
	) -> impl Future<Output = Result<QueryPage, SourceError>> + Send;
}
