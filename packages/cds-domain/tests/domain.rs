use serde_json::{Map, Value, json};

use cds_domain::{
	acceptance::{Acceptance, CriteriaEntities, TrialEntities},
	eligibility::{self, PatientProfile, TrialRestrictions},
	exclusion::{ExclusionReason, ExclusionRules, PatientAttributes, TrialAttributes},
	gender::Gender,
	models::{PatientTopic, TrialDocument},
	schema::{DOCUMENT_ID_FIELD, Schema},
};

fn sample_trial() -> Map<String, Value> {
	let value = json!({
		"nct_id": "NCT00000107",
		"brief_title": "Smoking cessation in asthma",
		"official_title": "A randomised trial of cessation support",
		"brief_summary": "",
		"study_type": "Interventional",
		"gender": "F",
		"inclusion": ["asthma", "adult"],
		"exclusion": ["pregnancy"],
		"conditions": ["Asthma"],
		"interventions": [
			{ "intervention_type": "Drug", "intervention_name": "Varenicline" },
			{ "intervention_type": "Behavioral", "intervention_name": "Counselling" }
		],
		"accepts_healthy_volunteers": false,
		"minimum_age": 18,
		"maximum_age": "nan"
	});

	match value {
		Value::Object(map) => map,
		_ => unreachable!("sample trial is an object"),
	}
}

#[test]
fn document_fields_round_trip_through_schema() {
	let schema = Schema::documents();
	let trial = sample_trial();
	let mut decoded = Map::new();

	for (field, value) in &trial {
		if field == DOCUMENT_ID_FIELD {
			continue;
		}

		let stored = schema.encode(field, value).expect("Failed to encode field.");

		decoded.insert(
			field.clone(),
			schema.decode(field, stored.as_deref()).expect("Failed to decode field."),
		);
	}

	assert_eq!(decoded["brief_title"], trial["brief_title"]);
	assert_eq!(decoded["brief_summary"], Value::Null);
	assert_eq!(decoded["inclusion"], trial["inclusion"]);
	assert_eq!(decoded["interventions"], trial["interventions"]);
	assert_eq!(decoded["accepts_healthy_volunteers"], json!(false));
	assert_eq!(decoded["minimum_age"], json!(18.0));
	assert_eq!(decoded["maximum_age"], Value::Null);

	decoded.insert(DOCUMENT_ID_FIELD.to_string(), trial[DOCUMENT_ID_FIELD].clone());

	let document: TrialDocument =
		serde_json::from_value(Value::Object(decoded)).expect("Failed to build trial model.");

	assert_eq!(document.nct_id, "NCT00000107");
	assert_eq!(document.gender, Some(Gender::Female));
	assert_eq!(document.conditions, vec!["Asthma".to_string()]);
	assert_eq!(document.interventions.len(), 2);
	assert_eq!(document.accepts_healthy_volunteers, Some(false));
	assert_eq!(document.minimum_age, Some(18.0));
	assert_eq!(document.maximum_age, None);
	assert!(document.secondary_outcomes.is_empty());
}

#[test]
fn topic_models_feed_the_eligibility_predicate() {
	let topic: PatientTopic = serde_json::from_value(json!({
		"qid": "3",
		"query": "45-year-old woman with persistent asthma",
		"gender": "F",
		"age": 45.0,
	}))
	.expect("Failed to build topic model.");
	let trial = TrialDocument {
		gender: Some(Gender::Female),
		minimum_age: Some(18.0),
		maximum_age: Some(65.0),
		..Default::default()
	};
	let male_only = TrialDocument { gender: Some(Gender::Male), ..trial.clone() };

	let patient = PatientProfile::from(&topic);

	assert!(eligibility::is_eligible(&patient, &TrialRestrictions::from(&trial)));
	assert!(!eligibility::is_eligible(&patient, &TrialRestrictions::from(&male_only)));
}

#[test]
fn derived_flags_drive_behaviour_exclusion() {
	let entities = TrialEntities {
		inclusion_criteria: CriteriaEntities::default(),
		exclusion_criteria: CriteriaEntities {
			positive_entities: vec!["alcohol".to_string()],
			negated_entities: Vec::new(),
		},
	};
	let trial = TrialAttributes {
		accepts_smokers: entities.acceptance(&["smoking".to_string(), "smoke".to_string()]),
		accepts_drinkers: entities.acceptance(&["alcohol".to_string()]),
		..Default::default()
	};
	let patient: PatientAttributes = serde_json::from_value(json!({
		"gender": "M",
		"age": 52,
		"is_smoker": true,
		"is_drinker": true,
	}))
	.expect("Failed to build patient attributes.");

	assert_eq!(trial.accepts_smokers, Acceptance::NoInfo);
	assert_eq!(trial.accepts_drinkers, Acceptance::Rejects);
	assert_eq!(
		ExclusionRules::default().evaluate(&patient, &trial),
		Some(ExclusionReason::DrinkerNotAccepted)
	);
}
