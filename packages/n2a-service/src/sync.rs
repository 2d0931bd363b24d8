use n2a_config::{DuplicatePolicy, MappingRule};
use n2a_domain::{FlashcardTarget, NoteRequest, SourceDatabase, SourceError, project, project_tags};

use crate::{SyncResult, fetch, upsert};

/// Tally for one mapping rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleReport {
	pub deck: String,
	pub database_id: String,
	pub records: usize,
	pub created: usize,
	pub skipped: usize,
	pub failed: usize,
	/// Set when the source query failed and the rule was abandoned.
	pub source_error: Option<SourceError>,
}
impl RuleReport {
	fn new(rule: &MappingRule) -> Self {
		Self { deck: rule.deck.clone(), database_id: rule.source_id.clone(), ..Default::default() }
	}

	fn record(&mut self, result: &SyncResult) {
		match result {
			SyncResult::Created { .. } => self.created += 1,
			SyncResult::Skipped => self.skipped += 1,
			SyncResult::Failed(_) => self.failed += 1,
		}
	}

	pub fn abandoned(&self) -> bool {
		self.source_error.is_some()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
	pub rules: Vec<RuleReport>,
}
impl SyncReport {
	pub fn created(&self) -> usize {
		self.rules.iter().map(|rule| rule.created).sum()
	}

	pub fn skipped(&self) -> usize {
		self.rules.iter().map(|rule| rule.skipped).sum()
	}

	pub fn failed(&self) -> usize {
		self.rules.iter().map(|rule| rule.failed).sum()
	}

	pub fn abandoned(&self) -> usize {
		self.rules.iter().filter(|rule| rule.abandoned()).count()
	}

	pub fn log_summary(&self) {
		for rule in &self.rules {
			tracing::info!(
				deck = %rule.deck,
				database_id = %rule.database_id,
				records = rule.records,
				created = rule.created,
				skipped = rule.skipped,
				failed = rule.failed,
				abandoned = rule.abandoned(),
				"Mapping summary."
			);
		}

		tracing::info!(
			created = self.created(),
			skipped = self.skipped(),
			failed = self.failed(),
			abandoned = self.abandoned(),
			"Sync finished."
		);
	}
}

/// Runs mapping rules one after another against a source and a target.
pub struct Syncer<'a, S, T> {
	source: &'a S,
	target: &'a T,
	on_duplicate: DuplicatePolicy,
}
impl<'a, S, T> Syncer<'a, S, T>
where
	S: SourceDatabase,
	T: FlashcardTarget,
{
	pub fn new(source: &'a S, target: &'a T, on_duplicate: DuplicatePolicy) -> Self {
		Self { source, target, on_duplicate }
	}

	pub async fn run(&self, rules: &[MappingRule]) -> SyncReport {
		let mut report = SyncReport::default();

		for rule in rules {
			report.rules.push(self.sync_rule(rule).await);
		}

		report
	}

	/// Syncs one rule. A source failure ends this rule only.
	pub async fn sync_rule(&self, rule: &MappingRule) -> RuleReport {
		let mut report = RuleReport::new(rule);
		let mut pager = fetch(self.source, &rule.source_id);

		loop {
			let record = match pager.next().await {
				Ok(Some(record)) => record,
				Ok(None) => break,
				Err(err) => {
					tracing::error!(
						deck = %rule.deck,
						database_id = %rule.source_id,
						error = %err,
						"Source query failed. Skipping the rest of this mapping."
					);

					report.source_error = Some(err);

					break;
				},
			};

			report.records += 1;

			let note = NoteRequest {
				deck: rule.deck.clone(),
				model: rule.model.clone(),
				fields: project(rule, &record),
				tags: project_tags(rule, &record),
			};
			let result = upsert(self.target, &note, self.on_duplicate).await;

			match &result {
				SyncResult::Created { note_id } => {
					tracing::debug!(deck = %rule.deck, record_id = %record.id, note_id, "Note added.");
				},
				SyncResult::Skipped => {
					tracing::debug!(deck = %rule.deck, record_id = %record.id, "Note already exists.");
				},
				SyncResult::Failed(err) => {
					tracing::warn!(
						deck = %rule.deck,
						record_id = %record.id,
						error = %err,
						"Failed to add note."
					);
				},
			}

			report.record(&result);
		}

		tracing::info!(
			deck = %rule.deck,
			database_id = %rule.source_id,
			pages = pager.pages(),
			records = report.records,
			"Mapping processed."
		);

		report
	}
}
