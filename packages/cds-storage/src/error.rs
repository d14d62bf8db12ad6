use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Redis(#[from] redis::RedisError),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Malformed input in {source_name} at line {line}: {message}")]
	Malformed { source_name: String, line: usize, message: String },
	#[error("Failed to read input file at {path:?}.")]
	ReadInput { path: PathBuf, source: std::io::Error },
	#[error("Unexpected store reply: {0}")]
	UnexpectedReply(String),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	Domain(#[from] cds_domain::Error),
}
