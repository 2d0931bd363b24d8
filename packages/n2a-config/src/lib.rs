mod error;
mod mapping;
mod types;

pub use error::{Error, Result};
pub use mapping::{FieldMap, MappingRule, parse_mappings};
pub use types::{Anki, DuplicatePolicy, DuplicateScope, Notion, Service, Settings, SyncPolicy};

use std::{env, fs, path::Path};

/// Loads the settings file, or the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<Settings> {
	let mut cfg = match path {
		Some(path) => {
			let raw = fs::read_to_string(path)
				.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

			toml::from_str(&raw)
				.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?
		},
		None => Settings::default(),
	};

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn load_mappings(path: &Path) -> Result<Vec<MappingRule>> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse_mappings(&raw)
}

/// Reads the Notion token from the environment variable named in the settings.
pub fn notion_token(cfg: &Notion) -> Result<String> {
	check_token(&cfg.token_env, env::var(&cfg.token_env).ok())
}

pub fn validate(cfg: &Settings) -> Result<()> {
	for (label, value) in [
		("service.log_level", &cfg.service.log_level),
		("notion.api_base", &cfg.notion.api_base),
		("notion.api_version", &cfg.notion.api_version),
		("notion.token_env", &cfg.notion.token_env),
		("anki.url", &cfg.anki.url),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !(1..=100).contains(&cfg.notion.page_size) {
		return Err(Error::Validation {
			message: "notion.page_size must be in the range 1-100.".to_string(),
		});
	}
	if cfg.notion.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "notion.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.anki.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "anki.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.anki.api_version == 0 {
		return Err(Error::Validation {
			message: "anki.api_version must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Settings) {
	cfg.notion.api_base = cfg.notion.api_base.trim().trim_end_matches('/').to_string();
	cfg.anki.url = cfg.anki.url.trim().to_string();
}

fn check_token(name: &str, value: Option<String>) -> Result<String> {
	match value.map(|token| token.trim().to_string()) {
		Some(token) if !token.is_empty() => Ok(token),
		_ => Err(Error::MissingToken { name: name.to_string() }),
	}
}
