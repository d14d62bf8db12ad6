use std::{
	collections::HashMap,
	sync::{Mutex, MutexGuard},
};

use crate::{Result, kv::KeyValueStore};

/// Process-local store used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<HashMap<String, String>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries().is_empty()
	}

	pub fn get(&self, key: &str) -> Option<String> {
		self.entries().get(key).cloned()
	}

	fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl KeyValueStore for MemoryStore {
	fn batch_put(&self, entries: &[(String, String)]) -> Result<()> {
		let mut stored = self.entries();

		for (key, value) in entries {
			stored.insert(key.clone(), value.clone());
		}

		Ok(())
	}

	fn batch_get(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
		let stored = self.entries();

		Ok(keys.iter().map(|key| stored.get(key).cloned()).collect())
	}

	fn flush(&self) -> Result<()> {
		self.entries().clear();

		Ok(())
	}
}
