use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{acceptance::Acceptance, gender::Gender};

/// Why a trial was dropped for a patient. Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
	GenderMismatch,
	BelowMinimumAge,
	AboveMaximumAge,
	SmokerNotAccepted,
	DrinkerNotAccepted,
}
impl ExclusionReason {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::GenderMismatch => "gender_mismatch",
			Self::BelowMinimumAge => "below_minimum_age",
			Self::AboveMaximumAge => "above_maximum_age",
			Self::SmokerNotAccepted => "smoker_not_accepted",
			Self::DrinkerNotAccepted => "drinker_not_accepted",
		}
	}
}
impl Display for ExclusionReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Patient side of the batch filter, usually loaded from processed topic files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientAttributes {
	#[serde(default)]
	pub gender: Gender,
	/// May hold the configured unknown-age sentinel.
	pub age: Option<f64>,
	pub is_smoker: Option<bool>,
	pub is_drinker: Option<bool>,
}

/// Trial side of the batch filter, including the derived behavioural flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialAttributes {
	pub gender: Option<Gender>,
	pub minimum_age: Option<f64>,
	pub maximum_age: Option<f64>,
	#[serde(default)]
	pub accepts_smokers: Acceptance,
	#[serde(default)]
	pub accepts_drinkers: Acceptance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionRules {
	unknown_age: f64,
}
impl ExclusionRules {
	pub fn new(unknown_age: f64) -> Self {
		Self { unknown_age }
	}

	pub fn from_config(cfg: &cds_config::Filter) -> Self {
		Self::new(cfg.unknown_age)
	}

	/// Returns the first rule that excludes the trial for this patient, or `None` to keep it.
	pub fn evaluate(
		&self,
		patient: &PatientAttributes,
		trial: &TrialAttributes,
	) -> Option<ExclusionReason> {
		if let Some(trial_gender) = trial.gender
			&& trial_gender.is_restrictive()
			&& trial_gender != patient.gender
		{
			return Some(ExclusionReason::GenderMismatch);
		}

		if let Some(age) = self.known_age(patient) {
			if let Some(minimum_age) = trial.minimum_age
				&& age < minimum_age
			{
				return Some(ExclusionReason::BelowMinimumAge);
			}
			if let Some(maximum_age) = trial.maximum_age
				&& age > maximum_age
			{
				return Some(ExclusionReason::AboveMaximumAge);
			}
		}

		if patient.is_smoker.unwrap_or(false) && trial.accepts_smokers.excludes() {
			return Some(ExclusionReason::SmokerNotAccepted);
		}
		if patient.is_drinker.unwrap_or(false) && trial.accepts_drinkers.excludes() {
			return Some(ExclusionReason::DrinkerNotAccepted);
		}

		None
	}

	fn known_age(&self, patient: &PatientAttributes) -> Option<f64> {
		patient.age.filter(|age| age.is_finite() && *age != self.unknown_age)
	}
}
impl Default for ExclusionRules {
	fn default() -> Self {
		Self::new(-1.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn patient(gender: Gender, age: f64) -> PatientAttributes {
		PatientAttributes { gender, age: Some(age), is_smoker: Some(false), is_drinker: Some(false) }
	}

	fn trial(gender: Gender, minimum_age: Option<f64>, maximum_age: Option<f64>) -> TrialAttributes {
		TrialAttributes { gender: Some(gender), minimum_age, maximum_age, ..Default::default() }
	}

	#[test]
	fn gender_rule_wins_over_age_rule() {
		let rules = ExclusionRules::default();
		let male_adults = trial(Gender::Male, Some(18.0), Some(65.0));

		assert_eq!(
			rules.evaluate(&patient(Gender::Female, 80.0), &male_adults),
			Some(ExclusionReason::GenderMismatch)
		);
	}

	#[test]
	fn age_bounds_apply_when_age_is_known() {
		let rules = ExclusionRules::default();
		let restricted = trial(Gender::All, Some(18.0), Some(65.0));

		assert_eq!(
			rules.evaluate(&patient(Gender::Male, 12.0), &restricted),
			Some(ExclusionReason::BelowMinimumAge)
		);
		assert_eq!(
			rules.evaluate(&patient(Gender::Male, 70.0), &restricted),
			Some(ExclusionReason::AboveMaximumAge)
		);
		assert_eq!(rules.evaluate(&patient(Gender::Male, 65.0), &restricted), None);
	}

	#[test]
	fn unknown_age_sentinel_skips_age_rules() {
		let rules = ExclusionRules::default();

		assert_eq!(
			rules.evaluate(&patient(Gender::Male, -1.0), &trial(Gender::All, Some(18.0), None)),
			None
		);
	}

	#[test]
	fn unspecified_or_unknown_trial_gender_keeps_everyone() {
		let rules = ExclusionRules::default();
		let no_gender = TrialAttributes::default();

		assert_eq!(rules.evaluate(&patient(Gender::Female, 40.0), &no_gender), None);
		assert_eq!(
			rules.evaluate(&patient(Gender::Female, 40.0), &trial(Gender::Unknown, None, None)),
			None
		);
	}

	#[test]
	fn behaviour_rules_only_fire_on_explicit_rejection() {
		let rules = ExclusionRules::default();
		let smoker = PatientAttributes { is_smoker: Some(true), ..patient(Gender::Male, 50.0) };
		let drinker = PatientAttributes { is_drinker: Some(true), ..patient(Gender::Male, 50.0) };
		let rejecting = TrialAttributes {
			accepts_smokers: Acceptance::Rejects,
			accepts_drinkers: Acceptance::Rejects,
			..Default::default()
		};
		let silent = TrialAttributes::default();

		assert_eq!(rules.evaluate(&smoker, &rejecting), Some(ExclusionReason::SmokerNotAccepted));
		assert_eq!(rules.evaluate(&drinker, &rejecting), Some(ExclusionReason::DrinkerNotAccepted));
		assert_eq!(rules.evaluate(&smoker, &silent), None);
		assert_eq!(rules.evaluate(&patient(Gender::Male, 50.0), &rejecting), None);
	}

	#[test]
	fn custom_unknown_age_sentinel() {
		let rules = ExclusionRules::new(0.0);

		assert_eq!(
			rules.evaluate(&patient(Gender::Male, 0.0), &trial(Gender::All, Some(18.0), None)),
			None
		);
	}
}
