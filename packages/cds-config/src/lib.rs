mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Bootstrap, Config, Filter, Redis, Service, Storage};

use std::{fs, path::Path};

const REDIS_SCHEMES: [&str; 3] = ["redis://", "rediss://", "redis+unix://"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	let url = cfg.storage.redis.url.trim();

	if url.is_empty() {
		return Err(Error::Validation {
			message: "storage.redis.url must be non-empty.".to_string(),
		});
	}
	if !REDIS_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
		return Err(Error::Validation {
			message: "storage.redis.url must use one of redis://, rediss://, or redis+unix://."
				.to_string(),
		});
	}
	if cfg.storage.bootstrap.probe_document_id.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.bootstrap.probe_document_id must be non-empty.".to_string(),
		});
	}

	for (label, keywords) in [
		("filter.smoker_keywords", &cfg.filter.smoker_keywords),
		("filter.drinker_keywords", &cfg.filter.drinker_keywords),
	] {
		if keywords.is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
		if keywords.iter().any(|keyword| keyword.trim().is_empty()) {
			return Err(Error::Validation {
				message: format!("{label} must not contain blank keywords."),
			});
		}
	}

	if !cfg.filter.unknown_age.is_finite() {
		return Err(Error::Validation {
			message: "filter.unknown_age must be a finite number.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let bootstrap = &mut cfg.storage.bootstrap;

	if bootstrap
		.collection_path
		.as_deref()
		.map(|path| path.as_os_str().to_string_lossy().trim().is_empty())
		.unwrap_or(false)
	{
		bootstrap.collection_path = None;
	}
	if bootstrap
		.topics_path
		.as_deref()
		.map(|path| path.as_os_str().to_string_lossy().trim().is_empty())
		.unwrap_or(false)
	{
		bootstrap.topics_path = None;
	}

	for keywords in [&mut cfg.filter.smoker_keywords, &mut cfg.filter.drinker_keywords] {
		for keyword in keywords.iter_mut() {
			*keyword = keyword.trim().to_lowercase();
		}
	}
}
