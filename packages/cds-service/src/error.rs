use std::{fmt::Display, path::Path};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Malformed input: {message}")]
	Malformed { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("I/O error: {message}")]
	Io { message: String },
	#[error("Topic {topic} has no patient record.")]
	UnknownTopic { topic: String },
}
impl Error {
	pub(crate) fn read(path: &Path, err: impl Display) -> Self {
		Self::Io { message: format!("failed to read {}: {err}", path.display()) }
	}

	pub(crate) fn write(path: &Path, err: impl Display) -> Self {
		Self::Io { message: format!("failed to write {}: {err}", path.display()) }
	}
}

impl From<cds_storage::Error> for Error {
	fn from(err: cds_storage::Error) -> Self {
		match err {
			cds_storage::Error::Redis(inner) => Self::Storage { message: inner.to_string() },
			cds_storage::Error::UnexpectedReply(message) => Self::Storage { message },
			cds_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			cds_storage::Error::NotFound(message) => Self::NotFound { message },
			err @ cds_storage::Error::Malformed { .. } => Self::Malformed { message: err.to_string() },
			cds_storage::Error::ReadInput { path, source } => Self::read(&path, source),
			cds_storage::Error::Io(inner) => Self::Io { message: inner.to_string() },
			cds_storage::Error::Domain(inner) => Self::Malformed { message: inner.to_string() },
		}
	}
}

impl From<cds_domain::Error> for Error {
	fn from(err: cds_domain::Error) -> Self {
		Self::Malformed { message: err.to_string() }
	}
}
