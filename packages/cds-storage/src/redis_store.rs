use std::sync::{Mutex, MutexGuard};

use redis::{Client, Connection};

use crate::{Result, kv::KeyValueStore};

/// Store backed by one Redis connection. The connection is released when the store is dropped.
pub struct RedisStore {
	connection: Mutex<Connection>,
}
impl RedisStore {
	pub fn connect(cfg: &cds_config::Redis) -> Result<Self> {
		let client = Client::open(cfg.url.as_str())?;
		let connection = client.get_connection()?;

		Ok(Self { connection: Mutex::new(connection) })
	}

	fn connection(&self) -> MutexGuard<'_, Connection> {
		self.connection.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl KeyValueStore for RedisStore {
	fn batch_put(&self, entries: &[(String, String)]) -> Result<()> {
		if entries.is_empty() {
			return Ok(());
		}

		let mut command = redis::cmd("MSET");

		for (key, value) in entries {
			command.arg(key).arg(value);
		}

		command.query::<()>(&mut *self.connection())?;

		Ok(())
	}

	fn batch_get(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
		if keys.is_empty() {
			return Ok(Vec::new());
		}

		let values: Vec<Option<String>> =
			redis::cmd("MGET").arg(keys).query(&mut *self.connection())?;

		Ok(values)
	}

	// FLUSHDB rather than FLUSHALL: only the logical database selected by the URL is cleared.
	fn flush(&self) -> Result<()> {
		redis::cmd("FLUSHDB").query::<()>(&mut *self.connection())?;

		Ok(())
	}
}
