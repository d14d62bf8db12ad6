use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub filter: Filter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub redis: Redis,
	#[serde(default)]
	pub bootstrap: Bootstrap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Redis {
	/// Connection URL; the path selects the logical database, e.g. `redis://127.0.0.1:6379/0`.
	pub url: String,
}

/// Files used to populate an empty store on startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
	/// Optional. Line-delimited JSON trial documents.
	pub collection_path: Option<PathBuf>,
	/// Optional. CSV patient topics with a `qid` column.
	pub topics_path: Option<PathBuf>,
	/// Document looked up to decide whether the collection is already loaded.
	#[serde(default = "default_probe_document_id")]
	pub probe_document_id: String,
	/// Topic looked up to decide whether the topics are already loaded.
	#[serde(default = "default_probe_topic_id")]
	pub probe_topic_id: i64,
}
impl Default for Bootstrap {
	fn default() -> Self {
		Self {
			collection_path: None,
			topics_path: None,
			probe_document_id: default_probe_document_id(),
			probe_topic_id: default_probe_topic_id(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Filter {
	#[serde(default = "default_smoker_keywords")]
	pub smoker_keywords: Vec<String>,
	#[serde(default = "default_drinker_keywords")]
	pub drinker_keywords: Vec<String>,
	/// Patient age value meaning "age not known".
	#[serde(default = "default_unknown_age")]
	pub unknown_age: f64,
}
impl Default for Filter {
	fn default() -> Self {
		Self {
			smoker_keywords: default_smoker_keywords(),
			drinker_keywords: default_drinker_keywords(),
			unknown_age: default_unknown_age(),
		}
	}
}

fn default_probe_document_id() -> String {
	"NCT00000107".to_string()
}

fn default_probe_topic_id() -> i64 {
	1
}

fn default_smoker_keywords() -> Vec<String> {
	vec!["smoking".to_string(), "smoke".to_string()]
}

fn default_drinker_keywords() -> Vec<String> {
	vec!["alcohol".to_string()]
}

fn default_unknown_age() -> f64 {
	-1.0
}
