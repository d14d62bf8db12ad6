//! Behavioural acceptance flags inferred from entity-tagged eligibility criteria.

use serde::{Deserialize, Serialize};

/// Whether a trial admits patients with a behaviour such as smoking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
	Accepts,
	Rejects,
	#[default]
	NoInfo,
}
impl Acceptance {
	pub fn from_score(score: i32) -> Self {
		match score {
			score if score > 0 => Self::Accepts,
			score if score < 0 => Self::Rejects,
			_ => Self::NoInfo,
		}
	}

	/// Only an explicit rejection excludes a patient; missing information keeps the trial.
	pub fn excludes(self) -> bool {
		self == Self::Rejects
	}
}

/// Entities tagged in one criteria section, split by negation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaEntities {
	#[serde(default)]
	pub positive_entities: Vec<String>,
	#[serde(default)]
	pub negated_entities: Vec<String>,
}
impl CriteriaEntities {
	fn count_matches(entities: &[String], keywords: &[String]) -> i32 {
		keywords
			.iter()
			.filter(|keyword| {
				entities.iter().any(|entity| entity.trim().eq_ignore_ascii_case(keyword.trim()))
			})
			.count() as i32
	}
}

/// Entity recognition over free-text criteria, supplied by an external model.
pub trait EntityTagger {
	fn tag(&self, criteria: &str) -> CriteriaEntities;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialEntities {
	#[serde(default)]
	pub inclusion_criteria: CriteriaEntities,
	#[serde(default)]
	pub exclusion_criteria: CriteriaEntities,
}
impl TrialEntities {
	pub fn from_tagger<T>(tagger: &T, inclusion: &str, exclusion: &str) -> Self
	where
		T: EntityTagger + ?Sized,
	{
		Self { inclusion_criteria: tagger.tag(inclusion), exclusion_criteria: tagger.tag(exclusion) }
	}

	/// Signed evidence that the trial admits the behaviour named by `keywords`.
	///
	/// Each keyword counts at most once per entity set: +1 when required by inclusion, -1 when
	/// negated in inclusion, -1 when listed in exclusion, +1 when negated in exclusion.
	pub fn keyword_score(&self, keywords: &[String]) -> i32 {
		let inclusion = &self.inclusion_criteria;
		let exclusion = &self.exclusion_criteria;

		CriteriaEntities::count_matches(&inclusion.positive_entities, keywords)
			- CriteriaEntities::count_matches(&inclusion.negated_entities, keywords)
			- CriteriaEntities::count_matches(&exclusion.positive_entities, keywords)
			+ CriteriaEntities::count_matches(&exclusion.negated_entities, keywords)
	}

	pub fn acceptance(&self, keywords: &[String]) -> Acceptance {
		Acceptance::from_score(self.keyword_score(keywords))
	}
}
