use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use n2a_providers::{anki::AnkiClient, notion::NotionClient};
use n2a_service::Syncer;

/// Copy Notion database rows into Anki notes.
#[derive(Debug, Parser)]
#[command(
	version = n2a_cli::VERSION,
	rename_all = "kebab",
	styles = n2a_cli::styles(),
)]
pub struct Args {
	/// JSON document with the Notion to Anki mappings.
	#[arg(value_name = "MAPPINGS")]
	pub mappings: PathBuf,
	/// Optional TOML settings file.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let settings = n2a_config::load(args.config.as_deref())?;

	init_tracing(&settings);

	let rules = n2a_config::load_mappings(&args.mappings)?;
	let token = n2a_config::notion_token(&settings.notion)?;
	let notion = NotionClient::new(&settings.notion, &token)?;
	let anki = AnkiClient::new(&settings.anki)?;

	tracing::info!(mappings = rules.len(), anki = %settings.anki.url, "Starting sync.");

	let report = Syncer::new(&notion, &anki, settings.sync.on_duplicate).run(&rules).await;

	report.log_summary();

	Ok(())
}

fn init_tracing(settings: &n2a_config::Settings) {
	let filter = EnvFilter::try_new(&settings.service.log_level)
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_mappings_and_config() {
		let args = Args::try_parse_from(["notion2anki", "mappings.json", "-c", "settings.toml"])
			.expect("parse failed");

		assert_eq!(args.mappings, PathBuf::from("mappings.json"));
		assert_eq!(args.config, Some(PathBuf::from("settings.toml")));
	}

	#[test]
	fn mappings_path_is_required() {
		assert!(Args::try_parse_from(["notion2anki"]).is_err());
	}
}
