use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};

use n2a_domain::{FlashcardTarget, NoteRequest, RenderedFields, TargetError, TargetRejection};
use n2a_providers::anki::AnkiClient;

#[derive(Clone, Default)]
struct MockAnki {
	requests: Arc<Mutex<Vec<Value>>>,
}

async fn rpc(State(state): State<MockAnki>, Json(body): Json<Value>) -> Json<Value> {
	state.requests.lock().await.push(body.clone());

	let note = &body["params"]["note"];
	let reply = match note["deckName"].as_str() {
		Some("Missing") => json!({ "result": null, "error": "deck was not found: Missing" }),
		Some("Dup") => json!({
			"result": null,
			"error": "cannot create note because it is a duplicate"
		}),
		_ => json!({ "result": 1_700_000_000_001_i64, "error": null }),
	};

	Json(reply)
}

async fn spawn_mock(state: MockAnki) -> String {
	let app = Router::new().route("/", post(rpc)).with_state(state);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind mock server.");
	let addr = listener.local_addr().expect("Failed to read mock address.");

	tokio::spawn(async move {
		axum::serve(listener, app).await.expect("Mock server failed.");
	});

	format!("http://{addr}/")
}

fn note(deck: &str) -> NoteRequest {
	let mut fields = RenderedFields::default();

	fields.push("Front", "capital of France");
	fields.push("Back", "Paris");

	NoteRequest { deck: deck.to_string(), model: "Basic".to_string(), fields, tags: Vec::new() }
}

fn client(url: String) -> AnkiClient {
	AnkiClient::new(&n2a_config::Anki { url, ..Default::default() })
		.expect("Failed to build Anki client.")
}

#[tokio::test]
async fn created_note_returns_id_and_sends_add_note() {
	let state = MockAnki::default();
	let client = client(spawn_mock(state.clone()).await);
	let note_id = client.create_note(&note("D")).await.expect("Create failed.");

	assert_eq!(note_id, 1_700_000_000_001);

	let requests = state.requests.lock().await;

	assert_eq!(requests[0]["action"], "addNote");
	assert_eq!(requests[0]["version"], 6);
	assert_eq!(
		requests[0]["params"]["note"]["fields"],
		json!({ "Front": "capital of France", "Back": "Paris" })
	);
	assert_eq!(requests[0]["params"]["note"]["options"]["checkChildren"], true);
}

#[tokio::test]
async fn rejections_are_classified() {
	let client = client(spawn_mock(MockAnki::default()).await);

	assert_eq!(
		client.create_note(&note("Missing")).await,
		Err(TargetError::Rejected(TargetRejection::MissingDeck))
	);
	assert_eq!(
		client.create_note(&note("Dup")).await,
		Err(TargetError::Rejected(TargetRejection::Duplicate))
	);
}

#[tokio::test]
async fn unreachable_anki_is_unavailable() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind.");
	let addr = listener.local_addr().expect("Failed to read address.");

	drop(listener);

	let err = client(format!("http://{addr}/"))
		.create_note(&note("D"))
		.await
		.expect_err("Expected unavailable error.");

	assert!(matches!(err, TargetError::Unavailable { .. }), "Unexpected error: {err:?}");
}
