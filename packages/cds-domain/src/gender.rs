use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gender of a patient, or the gender restriction of a trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
	Male,
	Female,
	All,
	#[default]
	Unknown,
}
impl Gender {
	pub fn as_code(self) -> &'static str {
		match self {
			Self::Male => "M",
			Self::Female => "F",
			Self::All => "A",
			Self::Unknown => "U",
		}
	}

	/// Parses a gender code or word. Anything unrecognised is `Unknown`.
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"m" | "male" => Self::Male,
			"f" | "female" => Self::Female,
			"a" | "all" => Self::All,
			_ => Self::Unknown,
		}
	}

	/// True for a trial restriction that admits a single gender only.
	pub fn is_restrictive(self) -> bool {
		matches!(self, Self::Male | Self::Female)
	}
}
impl Display for Gender {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_code())
	}
}
impl Serialize for Gender {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_code())
	}
}
impl<'de> Deserialize<'de> for Gender {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = Option::<String>::deserialize(deserializer)?;

		Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
	}
}
