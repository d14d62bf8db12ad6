//! Field disciplines for flat key-value storage of structured records.
//!
//! Every attribute of a record is written as a single string. The discipline assigned to a field
//! name decides how a JSON value becomes that string and how the string is read back.
//!
//! String-list elements must not contain [`LIST_DELIMITER`]; encoding such an element fails with
//! [`Error::DelimiterInValue`] rather than producing a value that would split differently on read.
//! Structured-list elements are compact JSON with the delimiter written as a `\u007c` escape, so
//! they never collide with it.

use std::collections::HashMap;

use serde_json::{Number, Value};

use crate::{Error, Result};

pub const LIST_DELIMITER: char = '|';

const LIST_SEPARATOR: &str = "|";
const ESCAPED_DELIMITER: &str = "\\u007c";
const TRUE_TEXT: &str = "True";
const FALSE_TEXT: &str = "False";

pub const DOCUMENT_ID_FIELD: &str = "nct_id";
pub const TOPIC_ID_FIELD: &str = "qid";

pub const DOCUMENT_FIELDS: [(FieldDiscipline, &[&str]); 5] = [
	(
		FieldDiscipline::Scalar,
		&[
			"org_study_id",
			"brief_title",
			"official_title",
			"brief_summary",
			"detailed_description",
			"study_type",
			"criteria",
			"gender",
		],
	),
	(
		FieldDiscipline::StringList,
		&["inclusion", "exclusion", "primary_outcomes", "secondary_outcomes", "conditions"],
	),
	(FieldDiscipline::StructuredList, &["interventions"]),
	(FieldDiscipline::Boolean, &["accepts_healthy_volunteers"]),
	(FieldDiscipline::Numeric, &["minimum_age", "maximum_age"]),
];

pub const TOPIC_FIELDS: [(FieldDiscipline, &[&str]); 3] = [
	(FieldDiscipline::Scalar, &["qid", "query", "keywords", "gender"]),
	(FieldDiscipline::Boolean, &["is_smoker", "is_drinker"]),
	(FieldDiscipline::Numeric, &["age"]),
];

/// Default field list read for a trial document.
pub const DEFAULT_DOCUMENT_FIELDS: [&str; 15] = [
	"nct_id",
	"brief_title",
	"official_title",
	"brief_summary",
	"detailed_description",
	"study_type",
	"criteria",
	"gender",
	"inclusion",
	"exclusion",
	"conditions",
	"interventions",
	"accepts_healthy_volunteers",
	"minimum_age",
	"maximum_age",
];

/// Default field list read for a patient topic.
pub const DEFAULT_TOPIC_FIELDS: [&str; 5] = ["qid", "query", "keywords", "gender", "age"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldDiscipline {
	Scalar,
	StringList,
	StructuredList,
	Boolean,
	Numeric,
}
impl FieldDiscipline {
	/// Value decoded for a field slot that holds nothing.
	pub fn absent_value(self) -> Value {
		match self {
			Self::StringList | Self::StructuredList => Value::Array(Vec::new()),
			Self::Scalar | Self::Boolean | Self::Numeric => Value::Null,
		}
	}
}

#[derive(Debug, Clone)]
pub struct Schema {
	disciplines: HashMap<String, FieldDiscipline>,
}
impl Schema {
	/// Builds a schema from per-discipline field tables. A field may appear in one table only.
	pub fn new(tables: &[(FieldDiscipline, &[&str])]) -> Result<Self> {
		let (schema, duplicates) = Self::collect(tables);

		if let Some(field) = duplicates.into_iter().next() {
			return Err(Error::DuplicateField { field });
		}

		Ok(schema)
	}

	pub fn documents() -> Self {
		let (schema, duplicates) = Self::collect(&DOCUMENT_FIELDS);

		debug_assert!(duplicates.is_empty(), "document fields overlap: {duplicates:?}");

		schema
	}

	pub fn topics() -> Self {
		let (schema, duplicates) = Self::collect(&TOPIC_FIELDS);

		debug_assert!(duplicates.is_empty(), "topic fields overlap: {duplicates:?}");

		schema
	}

	/// Unclassified fields are scalars.
	pub fn discipline(&self, field: &str) -> FieldDiscipline {
		self.disciplines.get(field).copied().unwrap_or(FieldDiscipline::Scalar)
	}

	/// Encodes one field value. `None` means the value is absent and must not be written.
	pub fn encode(&self, field: &str, value: &Value) -> Result<Option<String>> {
		if is_absent(value) {
			return Ok(None);
		}

		match self.discipline(field) {
			FieldDiscipline::Scalar => Ok(Some(encode_scalar(value))),
			FieldDiscipline::StringList => encode_string_list(field, value).map(Some),
			FieldDiscipline::StructuredList => encode_structured_list(field, value).map(Some),
			FieldDiscipline::Boolean => encode_boolean(field, value).map(Some),
			FieldDiscipline::Numeric => encode_numeric(field, value),
		}
	}

	/// Decodes one stored slot. Absent lists decode to `[]`, every other absent field to null.
	pub fn decode(&self, field: &str, raw: Option<&str>) -> Result<Value> {
		let discipline = self.discipline(field);
		let Some(raw) = raw else {
			return Ok(discipline.absent_value());
		};

		match discipline {
			FieldDiscipline::Scalar => Ok(Value::String(raw.to_string())),
			FieldDiscipline::StringList => Ok(Value::Array(
				raw.split(LIST_DELIMITER).map(|item| Value::String(item.to_string())).collect(),
			)),
			FieldDiscipline::StructuredList => raw
				.split(LIST_DELIMITER)
				.map(|item| {
					serde_json::from_str(item).map_err(|_| Error::Decode {
						field: field.to_string(),
						value: item.to_string(),
						expected: "a JSON element",
					})
				})
				.collect::<Result<Vec<_>>>()
				.map(Value::Array),
			FieldDiscipline::Boolean => decode_boolean(field, raw),
			FieldDiscipline::Numeric => decode_numeric(field, raw),
		}
	}

	fn collect(tables: &[(FieldDiscipline, &[&str])]) -> (Self, Vec<String>) {
		let mut disciplines = HashMap::new();
		let mut duplicates = Vec::new();

		for (discipline, fields) in tables {
			for field in fields.iter() {
				if disciplines.insert((*field).to_string(), *discipline).is_some() {
					duplicates.push((*field).to_string());
				}
			}
		}

		(Self { disciplines }, duplicates)
	}
}

/// Formats a float the way it is stored: shortest round-trip text, integral values keep `.0`.
pub fn format_number(value: f64) -> String {
	format!("{value:?}")
}

fn is_absent(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(text) => text.is_empty() || is_nan_text(text),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Number(number) => number.as_f64().map(f64::is_nan).unwrap_or(false),
		Value::Bool(_) => false,
	}
}

fn is_nan_text(text: &str) -> bool {
	text.trim().eq_ignore_ascii_case("nan")
}

fn encode_scalar(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Bool(flag) => bool_text(*flag).to_string(),
		other => other.to_string(),
	}
}

fn encode_string_list(field: &str, value: &Value) -> Result<String> {
	let items = value.as_array().ok_or_else(|| Error::InvalidValue {
		field: field.to_string(),
		message: "expected a list of strings.".to_string(),
	})?;
	let mut parts = Vec::with_capacity(items.len());

	for item in items {
		let text = item.as_str().ok_or_else(|| Error::InvalidValue {
			field: field.to_string(),
			message: format!("expected a string element, got {item}."),
		})?;

		if text.contains(LIST_DELIMITER) {
			return Err(Error::DelimiterInValue { field: field.to_string() });
		}

		parts.push(text);
	}

	Ok(parts.join(LIST_SEPARATOR))
}

fn encode_structured_list(field: &str, value: &Value) -> Result<String> {
	let items = value.as_array().ok_or_else(|| Error::InvalidValue {
		field: field.to_string(),
		message: "expected a list of records.".to_string(),
	})?;
	let mut parts = Vec::with_capacity(items.len());

	for item in items {
		let encoded = serde_json::to_string(item)?;

		parts.push(encoded.replace(LIST_DELIMITER, ESCAPED_DELIMITER));
	}

	Ok(parts.join(LIST_SEPARATOR))
}

fn encode_boolean(field: &str, value: &Value) -> Result<String> {
	let flag = match value {
		Value::Bool(flag) => Some(*flag),
		Value::String(text) => parse_bool(text),
		_ => None,
	};

	flag.map(|flag| bool_text(flag).to_string()).ok_or_else(|| Error::InvalidValue {
		field: field.to_string(),
		message: format!("expected a boolean, got {value}."),
	})
}

fn encode_numeric(field: &str, value: &Value) -> Result<Option<String>> {
	let number = match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok(),
		_ => None,
	};
	let number = number.ok_or_else(|| Error::InvalidValue {
		field: field.to_string(),
		message: format!("expected a number, got {value}."),
	})?;

	if number.is_nan() {
		return Ok(None);
	}

	Ok(Some(format_number(number)))
}

// Exact comparison only: any other non-empty text is an error, never `true`.
fn decode_boolean(field: &str, raw: &str) -> Result<Value> {
	if raw.trim().is_empty() || is_nan_text(raw) {
		return Ok(Value::Null);
	}

	parse_bool(raw).map(Value::Bool).ok_or_else(|| Error::Decode {
		field: field.to_string(),
		value: raw.to_string(),
		expected: "True or False",
	})
}

fn decode_numeric(field: &str, raw: &str) -> Result<Value> {
	if raw.trim().is_empty() || is_nan_text(raw) {
		return Ok(Value::Null);
	}

	let number = raw.trim().parse::<f64>().map_err(|_| Error::Decode {
		field: field.to_string(),
		value: raw.to_string(),
		expected: "a number",
	})?;

	Ok(Number::from_f64(number).map(Value::Number).unwrap_or(Value::Null))
}

fn parse_bool(text: &str) -> Option<bool> {
	match text.trim() {
		"True" | "true" => Some(true),
		"False" | "false" => Some(false),
		_ => None,
	}
}

fn bool_text(flag: bool) -> &'static str {
	if flag { TRUE_TEXT } else { FALSE_TEXT }
}
