use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use n2a_config::{DuplicatePolicy, DuplicateScope, Error, Settings};

fn write_temp_config(payload: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("n2a_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_str(payload: &str) -> n2a_config::Result<Settings> {
	let path = write_temp_config(payload);
	let result = n2a_config::load(Some(&path));

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn defaults_apply_without_a_file() {
	let cfg = n2a_config::load(None).expect("Failed to load default settings.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.notion.api_base, "https://api.notion.com");
	assert_eq!(cfg.notion.token_env, "NOTION_TOKEN");
	assert_eq!(cfg.notion.page_size, 100);
	assert_eq!(cfg.anki.url, "http://127.0.0.1:8765");
	assert_eq!(cfg.anki.api_version, 6);
	assert_eq!(cfg.anki.duplicate_scope, DuplicateScope::Deck);
	assert!(cfg.anki.check_children);
	assert_eq!(cfg.sync.on_duplicate, DuplicatePolicy::Skip);
}

#[test]
fn partial_file_keeps_other_defaults() {
	let cfg = load_str(
		r#"
[notion]
page_size = 25

[anki]
duplicate_scope = "collection"

[sync]
on_duplicate = "fail"
"#,
	)
	.expect("Failed to load settings.");

	assert_eq!(cfg.notion.page_size, 25);
	assert_eq!(cfg.notion.api_version, "2022-06-28");
	assert_eq!(cfg.anki.duplicate_scope, DuplicateScope::Collection);
	assert_eq!(cfg.anki.timeout_ms, 30_000);
	assert_eq!(cfg.sync.on_duplicate, DuplicatePolicy::Fail);
}

#[test]
fn api_base_trailing_slash_is_removed() {
	let cfg = load_str("[notion]\napi_base = \"http://localhost:9000/\"\n")
		.expect("Failed to load settings.");

	assert_eq!(cfg.notion.api_base, "http://localhost:9000");
}

#[test]
fn page_size_must_be_in_range() {
	for size in [0, 101] {
		let err = load_str(&format!("[notion]\npage_size = {size}\n"))
			.expect_err("Expected page_size validation error.");

		assert!(
			err.to_string().contains("notion.page_size must be in the range 1-100."),
			"Unexpected error message: {err}"
		);
	}
}

#[test]
fn zero_timeouts_are_rejected() {
	let err = load_str("[anki]\ntimeout_ms = 0\n").expect_err("Expected timeout error.");

	assert!(err.to_string().contains("anki.timeout_ms must be greater than zero."), "{err}");

	let err = load_str("[notion]\ntimeout_ms = 0\n").expect_err("Expected timeout error.");

	assert!(err.to_string().contains("notion.timeout_ms must be greater than zero."), "{err}");
}

#[test]
fn empty_strings_are_rejected() {
	let err = load_str("[anki]\nurl = \"  \"\n").expect_err("Expected validation error.");

	assert!(err.to_string().contains("anki.url must be non-empty."), "{err}");
}

#[test]
fn unknown_duplicate_policy_is_a_parse_error() {
	let err = load_str("[sync]\non_duplicate = \"overwrite\"\n").expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err:?}");
}
