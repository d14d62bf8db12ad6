use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gender::Gender;

/// A clinical trial as read back from the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialDocument {
	#[serde(default)]
	pub nct_id: String,
	pub org_study_id: Option<String>,
	pub brief_title: Option<String>,
	pub official_title: Option<String>,
	pub brief_summary: Option<String>,
	pub detailed_description: Option<String>,
	pub study_type: Option<String>,
	pub criteria: Option<String>,
	pub gender: Option<Gender>,
	#[serde(default)]
	pub inclusion: Vec<String>,
	#[serde(default)]
	pub exclusion: Vec<String>,
	#[serde(default)]
	pub primary_outcomes: Vec<String>,
	#[serde(default)]
	pub secondary_outcomes: Vec<String>,
	#[serde(default)]
	pub conditions: Vec<String>,
	/// Each intervention is a small free-form record, e.g. `intervention_type` and
	/// `intervention_name`.
	#[serde(default)]
	pub interventions: Vec<Map<String, Value>>,
	pub accepts_healthy_volunteers: Option<bool>,
	pub minimum_age: Option<f64>,
	pub maximum_age: Option<f64>,
}

/// A patient description used as a retrieval query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientTopic {
	pub qid: Option<String>,
	pub query: Option<String>,
	pub keywords: Option<String>,
	pub gender: Option<Gender>,
	pub age: Option<f64>,
	pub is_smoker: Option<bool>,
	pub is_drinker: Option<bool>,
}
