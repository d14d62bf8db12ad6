pub mod fixtures;

mod error;

pub use error::{Error, Result};

use std::{
	env,
	sync::{Mutex, MutexGuard},
};

use redis::Client;

const REDIS_URL_ENV: &str = "CDS_REDIS_URL";

// Tests share one logical database, so they take turns.
static REDIS_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive use of the scratch Redis database named by `CDS_REDIS_URL`. The database is flushed
/// when acquired and again on cleanup or drop.
pub struct TestRedis {
	url: String,
	client: Client,
	cleaned: bool,
	_guard: MutexGuard<'static, ()>,
}
impl TestRedis {
	pub fn new(url: &str) -> Result<Self> {
		let guard = REDIS_LOCK.lock().unwrap_or_else(|err| err.into_inner());
		let client = Client::open(url)
			.map_err(|err| Error::Message(format!("Failed to parse {REDIS_URL_ENV}: {err}.")))?;
		let mut test_redis =
			Self { url: url.to_string(), client, cleaned: false, _guard: guard };

		test_redis.flush()?;

		Ok(test_redis)
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Number of keys currently in the scratch database.
	pub fn key_count(&self) -> Result<usize> {
		let mut conn = self.client.get_connection()?;
		let count: usize = redis::cmd("DBSIZE").query(&mut conn)?;

		Ok(count)
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		self.flush()?;

		self.cleaned = true;

		Ok(())
	}

	fn flush(&mut self) -> Result<()> {
		let mut conn = self.client.get_connection().map_err(|err| {
			Error::Message(format!("Failed to connect to test Redis at {}: {err}.", self.url))
		})?;

		redis::cmd("FLUSHDB").query::<()>(&mut conn)?;

		Ok(())
	}
}
impl Drop for TestRedis {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test Redis cleanup failed: {err}.");
		}
	}
}

pub fn env_redis_url() -> Option<String> {
	env::var(REDIS_URL_ENV).ok()
}

pub fn with_test_redis<F, T>(url: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestRedis) -> Result<T>,
{
	let test_redis = TestRedis::new(url)?;
	let result = f(&test_redis);

	if let Err(err) = test_redis.cleanup() {
		eprintln!("Test Redis cleanup warning: {err}.");

		if result.is_ok() {
			return Err(err);
		}
	}

	result
}
