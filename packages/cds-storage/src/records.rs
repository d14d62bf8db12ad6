use std::{
	collections::HashMap,
	fs::File,
	io::{BufRead, BufReader, Read},
	path::Path,
};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use cds_config::Bootstrap;
use cds_domain::schema::{DEFAULT_DOCUMENT_FIELDS, Schema, TOPIC_ID_FIELD};

use crate::{Error, Result, keys::RecordKind, kv::KeyValueStore};

/// One record read back from the store, with every requested field decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	pub id: String,
	pub fields: Map<String, Value>,
}
impl Record {
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.fields.get(field).filter(|value| !value.is_null())
	}

	pub fn str_field(&self, field: &str) -> Option<&str> {
		self.get(field).and_then(Value::as_str)
	}

	pub fn f64_field(&self, field: &str) -> Option<f64> {
		self.get(field).and_then(Value::as_f64)
	}

	pub fn bool_field(&self, field: &str) -> Option<bool> {
		self.get(field).and_then(Value::as_bool)
	}

	pub fn list_field(&self, field: &str) -> &[Value] {
		self.get(field).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Deserializes the decoded fields into a model such as `TrialDocument`.
	pub fn into_model<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		serde_json::from_value(Value::Object(self.fields))
			.map_err(|err| Error::Domain(cds_domain::Error::Serialize(err)))
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
	pub records: usize,
	pub keys: usize,
}

/// What `RecordStore::bootstrap` loaded. `None` means that kind was already present or no path
/// was configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
	pub documents: Option<LoadReport>,
	pub topics: Option<LoadReport>,
}

/// Trial documents and patient topics stored as flat `kind:id:field` keys.
pub struct RecordStore<S> {
	store: S,
	documents: Schema,
	topics: Schema,
}
impl<S> RecordStore<S>
where
	S: KeyValueStore,
{
	pub fn new(store: S) -> Self {
		Self { store, documents: Schema::documents(), topics: Schema::topics() }
	}

	/// Wraps `store` and loads whichever record kind is missing from the configured files.
	pub fn open(store: S, bootstrap: &Bootstrap) -> Result<Self> {
		let records = Self::new(store);

		records.bootstrap(bootstrap)?;

		Ok(records)
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn bootstrap(&self, cfg: &Bootstrap) -> Result<BootstrapReport> {
		let mut report = BootstrapReport::default();

		if !self.contains_document(&cfg.probe_document_id)? {
			match cfg.collection_path.as_deref() {
				Some(path) => report.documents = Some(self.load_documents_path(path)?),
				None => tracing::warn!(
					probe = %cfg.probe_document_id,
					"Collection path is not configured; the store starts with an empty collection."
				),
			}
		}
		if !self.contains_topic(cfg.probe_topic_id)? {
			match cfg.topics_path.as_deref() {
				Some(path) => report.topics = Some(self.load_topics_path(path)?),
				None => tracing::warn!(
					probe = cfg.probe_topic_id,
					"Topics path is not configured; the store starts with no topics."
				),
			}
		}

		Ok(report)
	}

	pub fn load_documents_path(&self, path: &Path) -> Result<LoadReport> {
		let file = File::open(path)
			.map_err(|err| Error::ReadInput { path: path.to_path_buf(), source: err })?;

		self.load_documents(BufReader::new(file), &path.display().to_string())
	}

	/// Loads line-delimited JSON trial documents.
	///
	/// The field set is taken from the first record. Fields missing from a later record, or
	/// holding an absent value, are not written. Each record is written with one batched call.
	pub fn load_documents<R>(&self, reader: R, source_name: &str) -> Result<LoadReport>
	where
		R: BufRead,
	{
		let kind = RecordKind::Document;
		let mut fields: Option<Vec<String>> = None;
		let mut report = LoadReport::default();

		for (index, line) in reader.lines().enumerate() {
			let line_no = index + 1;
			let line = line?;

			if line.trim().is_empty() {
				continue;
			}

			let malformed = |message: String| Error::Malformed {
				source_name: source_name.to_string(),
				line: line_no,
				message,
			};
			let record: Map<String, Value> =
				serde_json::from_str(&line).map_err(|err| malformed(err.to_string()))?;
			let id = record_id(&record, kind.id_field())
				.ok_or_else(|| malformed(format!("missing {}.", kind.id_field())))?;

			let field_set = fields.get_or_insert_with(|| {
				record.keys().filter(|field| *field != kind.id_field()).cloned().collect()
			});
			let mut entries = Vec::with_capacity(field_set.len());

			for field in field_set.iter() {
				let Some(value) = record.get(field) else {
					continue;
				};
				let encoded = self
					.documents
					.encode(field, value)
					.map_err(|err| malformed(err.to_string()))?;

				if let Some(encoded) = encoded {
					entries.push((kind.key(&id, field), encoded));
				}
			}

			self.store.batch_put(&entries)?;

			report.records += 1;
			report.keys += entries.len();
		}

		tracing::info!(
			source = source_name,
			records = report.records,
			keys = report.keys,
			"Loaded trial documents."
		);

		Ok(report)
	}

	pub fn load_topics_path(&self, path: &Path) -> Result<LoadReport> {
		let file = File::open(path)
			.map_err(|err| Error::ReadInput { path: path.to_path_buf(), source: err })?;

		self.load_topics(file, &path.display().to_string())
	}

	/// Loads patient topics from CSV with a header row. Every column, `qid` included, is stored
	/// verbatim as text.
	pub fn load_topics<R>(&self, reader: R, source_name: &str) -> Result<LoadReport>
	where
		R: Read,
	{
		let kind = RecordKind::Topic;
		let malformed = |line: usize, message: String| Error::Malformed {
			source_name: source_name.to_string(),
			line,
			message,
		};
		let mut csv_reader = csv::Reader::from_reader(reader);
		let headers = csv_reader.headers().map_err(|err| malformed(1, err.to_string()))?.clone();
		let id_column = headers
			.iter()
			.position(|header| header == TOPIC_ID_FIELD)
			.ok_or_else(|| malformed(1, format!("missing {TOPIC_ID_FIELD} column.")))?;
		let mut report = LoadReport::default();

		for (index, row) in csv_reader.records().enumerate() {
			let row = row.map_err(|err| {
				let line =
					err.position().map(|position| position.line() as usize).unwrap_or(index + 2);

				malformed(line, err.to_string())
			})?;
			let line = row.position().map(|position| position.line() as usize).unwrap_or(index + 2);
			let raw_id = row.get(id_column).unwrap_or_default().trim();
			let id = raw_id.parse::<i64>().map_err(|_| {
				malformed(line, format!("{TOPIC_ID_FIELD} {raw_id:?} is not an integer."))
			})?;
			let id = id.to_string();
			let entries: Vec<(String, String)> = headers
				.iter()
				.zip(row.iter())
				.map(|(field, value)| (kind.key(&id, field), value.to_string()))
				.collect();

			self.store.batch_put(&entries)?;

			report.records += 1;
			report.keys += entries.len();
		}

		tracing::info!(
			source = source_name,
			records = report.records,
			keys = report.keys,
			"Loaded patient topics."
		);

		Ok(report)
	}

	/// Reads trial documents with one batched lookup.
	///
	/// Fails with `NotFound` when any identifier has nothing stored under the requested fields.
	/// A field that was never written for an existing document decodes to null or `[]`.
	pub fn get_documents<I>(&self, ids: &[I], fields: &[&str]) -> Result<Vec<Record>>
	where
		I: AsRef<str>,
	{
		let ids: Vec<String> = ids.iter().map(|id| id.as_ref().to_string()).collect();

		self.get_records(RecordKind::Document, &self.documents, &ids, fields)
	}

	pub fn get_topics(&self, ids: &[i64], fields: &[&str]) -> Result<Vec<Record>> {
		let ids: Vec<String> = ids.iter().map(i64::to_string).collect();

		self.get_records(RecordKind::Topic, &self.topics, &ids, fields)
	}

	pub fn contains_document(&self, id: &str) -> Result<bool> {
		found(self.get_documents(&[id], &DEFAULT_DOCUMENT_FIELDS))
	}

	pub fn contains_topic(&self, id: i64) -> Result<bool> {
		found(self.get_topics(&[id], &[TOPIC_ID_FIELD]))
	}

	/// Removes every stored record of every kind.
	pub fn flush(&self) -> Result<()> {
		self.store.flush()?;

		tracing::info!("Flushed record store.");

		Ok(())
	}

	fn get_records(
		&self,
		kind: RecordKind,
		schema: &Schema,
		ids: &[String],
		fields: &[&str],
	) -> Result<Vec<Record>> {
		let id_field = kind.id_field();
		let stored: Vec<&str> = fields
			.iter()
			.copied()
			.filter(|field| kind.stores_id_field() || *field != id_field)
			.collect();

		if stored.is_empty() {
			return Err(Error::InvalidArgument(format!(
				"at least one stored {} field must be requested.",
				kind.label()
			)));
		}
		if ids.is_empty() {
			return Ok(Vec::new());
		}

		let keys: Vec<String> = ids
			.iter()
			.flat_map(|id| stored.iter().map(move |field| kind.key(id, field)))
			.collect();
		let values = self.store.batch_get(&keys)?;

		if values.len() != keys.len() {
			return Err(Error::UnexpectedReply(format!(
				"requested {} keys, received {} values.",
				keys.len(),
				values.len()
			)));
		}

		let slots: Vec<&[Option<String>]> = values.chunks(stored.len()).collect();
		let missing: Vec<&str> = ids
			.iter()
			.zip(&slots)
			.filter(|(_, slots)| slots.iter().all(Option::is_none))
			.map(|(id, _)| id.as_str())
			.collect();

		if !missing.is_empty() {
			return Err(Error::NotFound(format!(
				"{} ids do not exist in the store: {}.",
				kind.label(),
				missing.join(", ")
			)));
		}

		let mut records = Vec::with_capacity(ids.len());

		for (id, slots) in ids.iter().zip(slots) {
			let by_field: HashMap<&str, Option<&str>> =
				stored.iter().copied().zip(slots.iter().map(Option::as_deref)).collect();
			let mut decoded = Map::new();

			for field in fields {
				let value = match by_field.get(field) {
					Some(raw) => schema.decode(field, *raw)?,
					None => Value::String(id.clone()),
				};

				decoded.insert((*field).to_string(), value);
			}

			records.push(Record { id: id.clone(), fields: decoded });
		}

		Ok(records)
	}
}

fn record_id(record: &Map<String, Value>, id_field: &str) -> Option<String> {
	match record.get(id_field)? {
		Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
		Value::Number(id) => Some(id.to_string()),
		_ => None,
	}
}

fn found(result: Result<Vec<Record>>) -> Result<bool> {
	match result {
		Ok(_) => Ok(true),
		Err(Error::NotFound(_)) => Ok(false),
		Err(err) => Err(err),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::MemoryStore;

	#[test]
	fn document_id_is_answered_without_a_stored_slot() {
		let records = RecordStore::new(MemoryStore::new());

		records
			.load_documents(r#"{"nct_id": "NCT1", "gender": "M"}"#.as_bytes(), "inline")
			.expect("load");

		assert!(records.store().get("doc:NCT1:nct_id").is_none());

		let record = records.get_documents(&["NCT1"], &["nct_id", "gender"]).expect("get").remove(0);

		assert_eq!(record.str_field("nct_id"), Some("NCT1"));
		assert_eq!(record.str_field("gender"), Some("M"));
	}

	#[test]
	fn identifier_only_request_is_rejected() {
		let records = RecordStore::new(MemoryStore::new());
		let err = records.get_documents(&["NCT1"], &["nct_id"]).expect_err("expected error");

		assert!(matches!(err, Error::InvalidArgument(_)), "Unexpected error: {err:?}");
	}

	#[test]
	fn empty_id_list_reads_nothing() {
		let records = RecordStore::new(MemoryStore::new());
		let empty: [&str; 0] = [];

		assert!(records.get_documents(&empty, &["gender"]).expect("get").is_empty());
	}
}
