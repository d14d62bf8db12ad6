use crate::Result;

/// The flat key-value operations records are stored through.
///
/// `batch_get` returns one slot per requested key, in request order, with `None` for keys that
/// hold nothing.
pub trait KeyValueStore {
	fn batch_put(&self, entries: &[(String, String)]) -> Result<()>;

	fn batch_get(&self, keys: &[String]) -> Result<Vec<Option<String>>>;

	/// Removes every key.
	fn flush(&self) -> Result<()>;
}
impl<T> KeyValueStore for &T
where
	T: KeyValueStore + ?Sized,
{
	fn batch_put(&self, entries: &[(String, String)]) -> Result<()> {
		(**self).batch_put(entries)
	}

	fn batch_get(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
		(**self).batch_get(keys)
	}

	fn flush(&self) -> Result<()> {
		(**self).flush()
	}
}
impl<T> KeyValueStore for Box<T>
where
	T: KeyValueStore + ?Sized,
{
	fn batch_put(&self, entries: &[(String, String)]) -> Result<()> {
		(**self).batch_put(entries)
	}

	fn batch_get(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
		(**self).batch_get(keys)
	}

	fn flush(&self) -> Result<()> {
		(**self).flush()
	}
}
