use cds_domain::schema::{DOCUMENT_ID_FIELD, TOPIC_ID_FIELD};

/// The two kinds of record kept in the store. Every field lives under
/// `<prefix>:<identifier>:<field>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
	Document,
	Topic,
}
impl RecordKind {
	pub fn prefix(self) -> &'static str {
		match self {
			Self::Document => "doc",
			Self::Topic => "topic",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Document => "document",
			Self::Topic => "topic",
		}
	}

	pub fn id_field(self) -> &'static str {
		match self {
			Self::Document => DOCUMENT_ID_FIELD,
			Self::Topic => TOPIC_ID_FIELD,
		}
	}

	/// Topics keep their identifier column as a stored field; documents do not.
	pub fn stores_id_field(self) -> bool {
		matches!(self, Self::Topic)
	}

	pub fn key(self, id: &str, field: &str) -> String {
		format!("{}:{id}:{field}", self.prefix())
	}
}
