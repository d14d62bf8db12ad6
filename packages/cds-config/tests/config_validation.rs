use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use cds_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml() -> String {
	SAMPLE_CONFIG_TEMPLATE_TOML.to_string()
}

fn sample_toml_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn sample_toml_without(section: &[&str], key: &str) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{name}]."));
	}

	table.remove(key);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("cds_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> cds_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = cds_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(&sample_toml()).expect("Failed to parse test config.")
}

#[test]
fn sample_config_is_valid() {
	let cfg = load_payload(sample_toml()).expect("Sample config must load.");

	assert_eq!(cfg.storage.redis.url, "redis://127.0.0.1:6379/0");
	assert_eq!(cfg.storage.bootstrap.probe_document_id, "NCT00000107");
	assert_eq!(cfg.storage.bootstrap.probe_topic_id, 1);
	assert_eq!(cfg.filter.smoker_keywords, vec!["smoking".to_string(), "smoke".to_string()]);
	assert_eq!(cfg.filter.unknown_age, -1.0);
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("cds_config_test_missing_file.toml");

	let err = cds_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nlog_level = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn redis_url_must_use_redis_scheme() {
	let payload = sample_toml_with(
		&["storage", "redis"],
		"url",
		Value::String("http://127.0.0.1:6379".to_string()),
	);
	let err = load_payload(payload).expect_err("Expected redis url validation error.");

	assert!(
		err.to_string().contains("storage.redis.url must use one of"),
		"Unexpected error: {err}"
	);
}

#[test]
fn redis_url_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.storage.redis.url = "   ".to_string();

	let err = cds_config::validate(&cfg).expect_err("Expected redis url validation error.");

	assert!(
		err.to_string().contains("storage.redis.url must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn log_level_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.service.log_level = String::new();

	let err = cds_config::validate(&cfg).expect_err("Expected log level validation error.");

	assert!(
		err.to_string().contains("service.log_level must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn blank_bootstrap_paths_are_normalized_to_none() {
	let payload = sample_toml_with(
		&["storage", "bootstrap"],
		"collection_path",
		Value::String("  ".to_string()),
	);
	let cfg = load_payload(payload).expect("Config must load.");

	assert!(cfg.storage.bootstrap.collection_path.is_none());
	assert!(cfg.storage.bootstrap.topics_path.is_some());
}

#[test]
fn bootstrap_section_is_optional() {
	let mut root: Value = toml::from_str(&sample_toml()).expect("Failed to parse template config.");

	root.get_mut("storage")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [storage].")
		.remove("bootstrap");

	let payload = toml::to_string(&root).expect("Failed to render template config.");
	let cfg = load_payload(payload).expect("Config must load.");

	assert!(cfg.storage.bootstrap.collection_path.is_none());
	assert!(cfg.storage.bootstrap.topics_path.is_none());
	assert_eq!(cfg.storage.bootstrap.probe_document_id, "NCT00000107");
}

#[test]
fn filter_keywords_default_when_omitted() {
	let payload = sample_toml_without(&["filter"], "drinker_keywords");
	let cfg = load_payload(payload).expect("Config must load.");

	assert_eq!(cfg.filter.drinker_keywords, vec!["alcohol".to_string()]);
}

#[test]
fn filter_keywords_are_trimmed_and_lowercased() {
	let payload = sample_toml_with(
		&["filter"],
		"smoker_keywords",
		Value::Array(vec![Value::String(" Tobacco ".to_string())]),
	);
	let cfg = load_payload(payload).expect("Config must load.");

	assert_eq!(cfg.filter.smoker_keywords, vec!["tobacco".to_string()]);
}

#[test]
fn filter_keywords_must_not_be_blank() {
	let payload = sample_toml_with(
		&["filter"],
		"drinker_keywords",
		Value::Array(vec![Value::String("alcohol".to_string()), Value::String(" ".to_string())]),
	);
	let err = load_payload(payload).expect_err("Expected keyword validation error.");

	assert!(
		err.to_string().contains("filter.drinker_keywords must not contain blank keywords."),
		"Unexpected error: {err}"
	);
}

#[test]
fn filter_keywords_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.filter.smoker_keywords.clear();

	let err = cds_config::validate(&cfg).expect_err("Expected keyword validation error.");

	assert!(
		err.to_string().contains("filter.smoker_keywords must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn unknown_age_must_be_finite() {
	let mut cfg = base_config();

	cfg.filter.unknown_age = f64::NAN;

	let err = cds_config::validate(&cfg).expect_err("Expected unknown age validation error.");

	assert!(
		err.to_string().contains("filter.unknown_age must be a finite number."),
		"Unexpected error: {err}"
	);
}
