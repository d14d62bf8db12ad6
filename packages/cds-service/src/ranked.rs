use std::{
	collections::HashMap,
	fmt::{self, Formatter},
	marker::PhantomData,
	ops::Index,
};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{MapAccess, Visitor},
	ser::SerializeMap,
};

/// Identifier-keyed entries kept in the order they were read, such as a retrieval run ranked by
/// score. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<V> {
	entries: Vec<(String, V)>,
	positions: HashMap<String, usize>,
}
impl<V> Ranked<V> {
	pub fn new() -> Self {
		Self { entries: Vec::new(), positions: HashMap::new() }
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self { entries: Vec::with_capacity(capacity), positions: HashMap::with_capacity(capacity) }
	}

	pub fn insert(&mut self, key: String, value: V) -> Option<V> {
		if let Some(&position) = self.positions.get(&key) {
			return Some(std::mem::replace(&mut self.entries[position].1, value));
		}

		self.positions.insert(key.clone(), self.entries.len());
		self.entries.push((key, value));

		None
	}

	pub fn get(&self, key: &str) -> Option<&V> {
		self.positions.get(key).map(|&position| &self.entries[position].1)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(key, _)| key.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}
}
impl<V> Default for Ranked<V> {
	fn default() -> Self {
		Self::new()
	}
}
impl<V> Index<&str> for Ranked<V> {
	type Output = V;

	fn index(&self, key: &str) -> &V {
		match self.get(key) {
			Some(value) => value,
			None => panic!("no entry for {key:?}"),
		}
	}
}
impl<V> FromIterator<(String, V)> for Ranked<V> {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, V)>,
	{
		let mut ranked = Self::new();

		for (key, value) in iter {
			ranked.insert(key, value);
		}

		ranked
	}
}
impl<V, const N: usize> From<[(String, V); N]> for Ranked<V> {
	fn from(entries: [(String, V); N]) -> Self {
		entries.into_iter().collect()
	}
}
impl<V> Serialize for Ranked<V>
where
	V: Serialize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;

		for (key, value) in &self.entries {
			map.serialize_entry(key, value)?;
		}

		map.end()
	}
}
impl<'de, V> Deserialize<'de> for Ranked<V>
where
	V: Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(RankedVisitor(PhantomData))
	}
}

struct RankedVisitor<V>(PhantomData<V>);
impl<'de, V> Visitor<'de> for RankedVisitor<V>
where
	V: Deserialize<'de>,
{
	type Value = Ranked<V>;

	fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("a map keyed by identifier")
	}

	fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut ranked = Ranked::with_capacity(access.size_hint().unwrap_or(0));

		while let Some((key, value)) = access.next_entry::<String, V>()? {
			ranked.insert(key, value);
		}

		Ok(ranked)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn json_key_order_survives_a_round_trip() {
		let raw = r#"{"2":{"NCT3":9.5,"NCT1":7.0},"10":{},"1":{"NCT2":1.0}}"#;
		let ranked: Ranked<Ranked<f64>> = serde_json::from_str(raw).expect("deserialize");

		assert_eq!(ranked.keys().collect::<Vec<_>>(), vec!["2", "10", "1"]);
		assert_eq!(ranked["2"].keys().collect::<Vec<_>>(), vec!["NCT3", "NCT1"]);
		assert_eq!(serde_json::to_string(&ranked).expect("serialize"), raw);
	}

	#[test]
	fn duplicate_key_keeps_first_position_and_last_value() {
		let ranked: Ranked<f64> =
			serde_json::from_str(r#"{"a":1.0,"b":2.0,"a":3.0}"#).expect("deserialize");

		assert_eq!(ranked.iter().collect::<Vec<_>>(), vec![("a", &3.0), ("b", &2.0)]);
	}
}
