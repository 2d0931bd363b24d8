use reqwest::header::AUTHORIZATION;

use n2a_providers::NOTION_VERSION;

#[test]
fn builds_bearer_auth_header() {
	let headers = n2a_providers::auth_headers("secret", "2022-06-28")
		.expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
	assert!(value.is_sensitive());
	assert_eq!(headers.get(NOTION_VERSION).expect("Missing version header."), "2022-06-28");
}

#[test]
fn rejects_token_with_control_characters() {
	let result = n2a_providers::auth_headers("bad\ntoken", "2022-06-28");

	assert!(matches!(result, Err(n2a_providers::Error::InvalidHeaderValue(_))));
}

#[test]
fn anki_client_rejects_invalid_url() {
	let cfg = n2a_config::Anki { url: "not a url".to_string(), ..Default::default() };
	let result = n2a_providers::anki::AnkiClient::new(&cfg);

	assert!(matches!(result, Err(n2a_providers::Error::InvalidConfig { .. })));
}

#[test]
fn notion_client_rejects_invalid_api_base() {
	for api_base in ["not a url", "mailto:notion@example.com"] {
		let cfg = n2a_config::Notion { api_base: api_base.to_string(), ..Default::default() };
		let result = n2a_providers::notion::NotionClient::new(&cfg, "token");

		assert!(
			matches!(result, Err(n2a_providers::Error::InvalidConfig { .. })),
			"Expected {api_base} to be rejected."
		);
	}
}
