pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Field {field} has an element containing the list delimiter '|'.")]
	DelimiterInValue { field: String },
	#[error("Field {field} has an invalid value: {message}")]
	InvalidValue { field: String, message: String },
	#[error("Field {field} cannot decode {value:?} as {expected}.")]
	Decode { field: String, value: String, expected: &'static str },
	#[error("Field {field} is classified under more than one discipline.")]
	DuplicateField { field: String },
	#[error(transparent)]
	Serialize(#[from] serde_json::Error),
}
