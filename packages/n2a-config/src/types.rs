use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub service: Service,
	pub notion: Notion,
	pub anki: Anki,
	pub sync: SyncPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Notion {
	pub api_base: String,
	/// Sent as the `Notion-Version` header.
	pub api_version: String,
	/// Name of the environment variable holding the integration token.
	pub token_env: String,
	/// Records requested per query; Notion caps this at 100.
	pub page_size: u32,
	pub timeout_ms: u64,
}
impl Default for Notion {
	fn default() -> Self {
		Self {
			api_base: "https://api.notion.com".to_string(),
			api_version: "2022-06-28".to_string(),
			token_env: "NOTION_TOKEN".to_string(),
			page_size: 100,
			timeout_ms: 30_000,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Anki {
	/// AnkiConnect endpoint.
	pub url: String,
	pub api_version: u32,
	pub duplicate_scope: DuplicateScope,
	pub check_children: bool,
	pub timeout_ms: u64,
}
impl Default for Anki {
	fn default() -> Self {
		Self {
			url: "http://127.0.0.1:8765".to_string(),
			api_version: 6,
			duplicate_scope: DuplicateScope::Deck,
			check_children: true,
			timeout_ms: 30_000,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SyncPolicy {
	pub on_duplicate: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateScope {
	#[default]
	Deck,
	Collection,
}
impl DuplicateScope {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Deck => "deck",
			Self::Collection => "collection",
		}
	}
}

/// What a duplicate rejection from Anki counts as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	#[default]
	Skip,
	Fail,
}
