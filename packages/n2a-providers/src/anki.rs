use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{Value, json};

use n2a_config::DuplicateScope;
use n2a_domain::{FlashcardTarget, NoteRequest, TargetError, TargetRejection};

use crate::{Error, Result};

const DUPLICATE_NOTE: &str = "cannot create note because it is a duplicate";
const EMPTY_NOTE: &str = "cannot create note because it is empty";
const MISSING_DECK: &str = "deck was not found";
const MISSING_MODEL: &str = "model was not found";

/// AnkiConnect client. Every call is a single JSON-RPC style POST.
#[derive(Debug, Clone)]
pub struct AnkiClient {
	client: Client,
	url: Url,
	api_version: u32,
	duplicate_scope: DuplicateScope,
	check_children: bool,
}
impl AnkiClient {
	pub fn new(cfg: &n2a_config::Anki) -> Result<Self> {
		let url = Url::parse(&cfg.url).map_err(|err| Error::InvalidConfig {
			message: format!("anki.url is not a valid URL: {err}."),
		})?;
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			client,
			url,
			api_version: cfg.api_version,
			duplicate_scope: cfg.duplicate_scope,
			check_children: cfg.check_children,
		})
	}

	fn add_note_body(&self, note: &NoteRequest) -> Value {
		json!({
			"action": "addNote",
			"version": self.api_version,
			"params": {
				"note": {
					"deckName": note.deck,
					"modelName": note.model,
					"fields": note.fields,
					"tags": note.tags,
					"options": {
						"allowDuplicate": false,
						"duplicateScope": self.duplicate_scope.as_str(),
						"checkChildren": self.check_children,
					},
				},
			},
		})
	}
}
impl FlashcardTarget for AnkiClient {
	async fn create_note(&self, note: &NoteRequest) -> Result<i64, TargetError> {
		let body = self.add_note_body(note);
		let res = self
			.client
			.post(self.url.clone())
			.json(&body)
			.send()
			.await
			.map_err(unavailable)?;
		let json: Value =
			res.error_for_status().map_err(unavailable)?.json().await.map_err(unavailable)?;

		parse_add_note_response(&json)
	}
}

/// Maps an AnkiConnect error string onto a rejection reason.
pub fn classify_error(message: &str) -> TargetRejection {
	let lowered = message.to_lowercase();

	if lowered.contains(DUPLICATE_NOTE) {
		TargetRejection::Duplicate
	} else if lowered.contains(MISSING_DECK) {
		TargetRejection::MissingDeck
	} else if lowered.contains(MISSING_MODEL) {
		TargetRejection::MissingModel
	} else if lowered.contains(EMPTY_NOTE) {
		TargetRejection::EmptyNote
	} else {
		TargetRejection::Other(message.to_string())
	}
}

fn unavailable(err: reqwest::Error) -> TargetError {
	TargetError::Unavailable { message: err.to_string() }
}

fn parse_add_note_response(json: &Value) -> Result<i64, TargetError> {
	if let Some(message) = json.get("error").and_then(Value::as_str) {
		return Err(TargetError::Rejected(classify_error(message)));
	}

	json.get("result").and_then(Value::as_i64).ok_or_else(|| TargetError::Unavailable {
		message: "AnkiConnect reply is missing the note id.".to_string(),
	})
}
