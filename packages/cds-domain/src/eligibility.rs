use crate::{
	gender::Gender,
	models::{PatientTopic, TrialDocument},
};

/// Patient attributes consulted by the single-pair eligibility check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientProfile {
	pub gender: Gender,
	pub age: Option<f64>,
}
impl From<&PatientTopic> for PatientProfile {
	fn from(topic: &PatientTopic) -> Self {
		Self { gender: topic.gender.unwrap_or_default(), age: topic.age }
	}
}

/// Trial restrictions consulted by the single-pair eligibility check. Absent values do not
/// restrict.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrialRestrictions {
	pub gender: Option<Gender>,
	pub minimum_age: Option<f64>,
	pub maximum_age: Option<f64>,
}
impl From<&TrialDocument> for TrialRestrictions {
	fn from(trial: &TrialDocument) -> Self {
		Self { gender: trial.gender, minimum_age: trial.minimum_age, maximum_age: trial.maximum_age }
	}
}

/// True when the trial admits the patient's gender and the patient's age lies within the trial's
/// inclusive age bounds.
///
/// A trial without a gender admits everyone; missing bounds are open. A patient whose age is not
/// known is never excluded on age.
pub fn is_eligible(patient: &PatientProfile, trial: &TrialRestrictions) -> bool {
	let trial_gender = trial.gender.unwrap_or(Gender::All);
	let minimum_age = trial.minimum_age.unwrap_or(f64::NEG_INFINITY);
	let maximum_age = trial.maximum_age.unwrap_or(f64::INFINITY);
	let gender_ok = !trial_gender.is_restrictive() || trial_gender == patient.gender;
	let age_ok = patient.age.map(|age| (minimum_age..=maximum_age).contains(&age)).unwrap_or(true);

	gender_ok && age_ok
}
