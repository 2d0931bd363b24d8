use std::{collections::HashMap, time::Duration};

use reqwest::{Client, Url};
use serde_json::{Value, json};

use n2a_domain::{PropertyValue, QueryPage, RawRecord, SourceDatabase, SourceError};

use crate::{Error, Result};

/// Database query client for the Notion REST API.
#[derive(Debug, Clone)]
pub struct NotionClient {
	client: Client,
	api_base: Url,
	page_size: u32,
}
impl NotionClient {
	pub fn new(cfg: &n2a_config::Notion, token: &str) -> Result<Self> {
		let api_base = Url::parse(&cfg.api_base).map_err(|err| Error::InvalidConfig {
			message: format!("notion.api_base is not a valid URL: {err}."),
		})?;

		if api_base.cannot_be_a_base() {
			return Err(Error::InvalidConfig {
				message: "notion.api_base must be an http(s) base URL.".to_string(),
			});
		}

		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(crate::auth_headers(token, &cfg.api_version)?)
			.build()?;

		Ok(Self { client, api_base, page_size: cfg.page_size })
	}

	/// `{api_base}/v1/databases/{id}/query`, with the id escaped as a single path segment.
	fn query_url(&self, database_id: &str) -> Url {
		let mut url = self.api_base.clone();

		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().extend(["v1", "databases", database_id, "query"]);
		}

		url
	}
}
impl SourceDatabase for NotionClient {
	async fn query(
		&self,
		database_id: &str,
		cursor: Option<&str>,
	) -> Result<QueryPage, SourceError> {
		let url = self.query_url(database_id);
		let mut body = json!({ "page_size": self.page_size });

		if let Some(cursor) = cursor {
			body["start_cursor"] = Value::String(cursor.to_string());
		}

		tracing::debug!(database_id, cursor, "Querying Notion database.");

		let res = self.client.post(url).json(&body).send().await.map_err(transport_error)?;
		let status = res.status();

		if !status.is_success() {
			let text = res.text().await.unwrap_or_default();

			return Err(SourceError::Status {
				status: status.as_u16(),
				message: error_message(&text),
			});
		}

		let json: Value = res
			.json()
			.await
			.map_err(|err| SourceError::InvalidResponse { message: err.to_string() })?;

		parse_query_response(&json)
	}
}

fn transport_error(err: reqwest::Error) -> SourceError {
	SourceError::Transport { message: err.to_string() }
}

/// Notion error bodies look like `{"code": "...", "message": "..."}`.
fn error_message(body: &str) -> String {
	let Ok(json) = serde_json::from_str::<Value>(body) else {
		return body.trim().to_string();
	};

	match (json.get("code").and_then(Value::as_str), json.get("message").and_then(Value::as_str)) {
		(Some(code), Some(message)) => format!("{code}: {message}"),
		(None, Some(message)) => message.to_string(),
		_ => body.trim().to_string(),
	}
}

fn parse_query_response(json: &Value) -> Result<QueryPage, SourceError> {
	let results = json.get("results").and_then(Value::as_array).ok_or_else(|| {
		SourceError::InvalidResponse { message: "Query response is missing results array.".into() }
	})?;
	let mut records = Vec::with_capacity(results.len());

	for item in results {
		records.push(parse_page(item)?);
	}

	let has_more = json.get("has_more").and_then(Value::as_bool).unwrap_or(false);
	let next_cursor = if has_more {
		json.get("next_cursor").and_then(Value::as_str).map(str::to_string)
	} else {
		None
	};

	Ok(QueryPage { records, next_cursor })
}

fn parse_page(item: &Value) -> Result<RawRecord, SourceError> {
	let id = item.get("id").and_then(Value::as_str).ok_or_else(|| {
		SourceError::InvalidResponse { message: "Query result is missing page id.".into() }
	})?;
	let properties = item
		.get("properties")
		.and_then(Value::as_object)
		.map(|properties| {
			properties
				.iter()
				.map(|(name, value)| (name.clone(), parse_property(value)))
				.collect::<HashMap<_, _>>()
		})
		.unwrap_or_default();

	Ok(RawRecord { id: id.to_string(), properties })
}

fn parse_property(value: &Value) -> PropertyValue {
	let kind = value.get("type").and_then(Value::as_str).unwrap_or("unknown");
	let body = value.get(kind);

	match kind {
		"title" => PropertyValue::Title(plain_texts(body)),
		"rich_text" => PropertyValue::RichText(plain_texts(body)),
		"select" => PropertyValue::Select(option_name(body)),
		"status" => PropertyValue::Status(option_name(body)),
		"multi_select" => PropertyValue::MultiSelect(
			body.and_then(Value::as_array)
				.map(|options| {
					options.iter().filter_map(|option| option_name(Some(option))).collect()
				})
				.unwrap_or_default(),
		),
		"number" => PropertyValue::Number(body.and_then(Value::as_f64)),
		"unique_id" => PropertyValue::UniqueId {
			prefix: body.and_then(|id| id.get("prefix")).and_then(Value::as_str).map(str::to_string),
			number: body.and_then(|id| id.get("number")).and_then(Value::as_u64),
		},
		"url" => PropertyValue::Url(string_of(body)),
		"email" => PropertyValue::Email(string_of(body)),
		"phone_number" => PropertyValue::PhoneNumber(string_of(body)),
		"checkbox" => PropertyValue::Checkbox(body.and_then(Value::as_bool).unwrap_or(false)),
		other => PropertyValue::Unsupported(other.to_string()),
	}
}

fn plain_texts(body: Option<&Value>) -> Vec<String> {
	body.and_then(Value::as_array)
		.map(|segments| {
			segments
				.iter()
				.filter_map(|segment| segment.get("plain_text").and_then(Value::as_str))
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default()
}

fn option_name(body: Option<&Value>) -> Option<String> {
	body.and_then(|option| option.get("name")).and_then(Value::as_str).map(str::to_string)
}

fn string_of(body: Option<&Value>) -> Option<String> {
	body.and_then(Value::as_str).map(str::to_string)
}
