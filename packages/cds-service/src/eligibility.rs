use cds_domain::{
	eligibility::{self, PatientProfile, TrialRestrictions},
	models::{PatientTopic, TrialDocument},
};
use cds_storage::{kv::KeyValueStore, records::RecordStore};

use crate::{Error, Result};

/// Topic fields read for a single-pair check.
pub const PATIENT_FIELDS: [&str; 2] = ["gender", "age"];
/// Document fields read for a single-pair check.
pub const TRIAL_FIELDS: [&str; 3] = ["gender", "minimum_age", "maximum_age"];

/// Gender and age check of one patient topic against stored trials.
pub struct EligibilityFilter<'a, S> {
	records: &'a RecordStore<S>,
}
impl<'a, S> EligibilityFilter<'a, S>
where
	S: KeyValueStore,
{
	pub fn new(records: &'a RecordStore<S>) -> Self {
		Self { records }
	}

	pub fn check(&self, topic_id: i64, trial_id: &str) -> Result<bool> {
		let patient = self.patient(topic_id)?;
		let trial: TrialDocument = self
			.records
			.get_documents(&[trial_id], &TRIAL_FIELDS)?
			.into_iter()
			.next()
			.ok_or_else(|| Error::NotFound { message: format!("trial {trial_id}.") })?
			.into_model()?;

		Ok(eligibility::is_eligible(&patient, &TrialRestrictions::from(&trial)))
	}

	/// Keeps the trials the patient is eligible for, in input order. Trials are read with one
	/// batched lookup; an unknown trial fails the whole call.
	pub fn retain_eligible<I>(&self, topic_id: i64, trial_ids: &[I]) -> Result<Vec<String>>
	where
		I: AsRef<str>,
	{
		let patient = self.patient(topic_id)?;
		let mut eligible = Vec::with_capacity(trial_ids.len());

		for record in self.records.get_documents(trial_ids, &TRIAL_FIELDS)? {
			let id = record.id.clone();
			let trial: TrialDocument = record.into_model()?;

			if eligibility::is_eligible(&patient, &TrialRestrictions::from(&trial)) {
				eligible.push(id);
			} else {
				tracing::debug!(topic = topic_id, trial = %id, "Trial is not eligible.");
			}
		}

		Ok(eligible)
	}

	fn patient(&self, topic_id: i64) -> Result<PatientProfile> {
		let topic: PatientTopic = self
			.records
			.get_topics(&[topic_id], &PATIENT_FIELDS)?
			.into_iter()
			.next()
			.ok_or_else(|| Error::NotFound { message: format!("topic {topic_id}.") })?
			.into_model()?;

		Ok(PatientProfile::from(&topic))
	}
}
