pub mod anki;
pub mod notion;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

pub const NOTION_VERSION: HeaderName = HeaderName::from_static("notion-version");

/// Headers every Notion request carries.
pub fn auth_headers(token: &str, api_version: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let mut bearer: HeaderValue = format!("Bearer {token}").parse()?;

	bearer.set_sensitive(true);
	headers.insert(AUTHORIZATION, bearer);
	headers.insert(NOTION_VERSION, api_version.parse()?);

	Ok(headers)
}
