//! Small datasets shared by the store and postprocessing tests.

/// Three trial documents. The first carries every field, so it fixes the field set of a load.
pub const DOCUMENTS_JSONL: &str = r#"{"nct_id": "NCT00000107", "org_study_id": "ASTHMA-01", "brief_title": "Cessation support in asthma", "official_title": "A randomised trial of cessation support for adults with asthma", "brief_summary": "Tests counselling with and without varenicline.", "detailed_description": "Participants are followed for one year.", "study_type": "Interventional", "criteria": "Inclusion: asthma. Exclusion: pregnancy.", "gender": "A", "inclusion": ["asthma", "adult"], "exclusion": ["pregnancy"], "primary_outcomes": ["FEV1 at 12 months"], "secondary_outcomes": ["Quit rate", "Exacerbations"], "conditions": ["Asthma", "Tobacco Use Disorder"], "interventions": [{"intervention_type": "Drug", "intervention_name": "Varenicline"}, {"intervention_type": "Behavioral", "intervention_name": "Counselling | group"}], "accepts_healthy_volunteers": false, "minimum_age": 18, "maximum_age": 65}
{"nct_id": "NCT00000108", "brief_title": "Screening in older men", "brief_summary": "", "study_type": "Observational", "gender": "M", "inclusion": ["prostate cancer"], "exclusion": [], "conditions": ["Prostate Cancer"], "interventions": [], "accepts_healthy_volunteers": true, "minimum_age": 40.0, "maximum_age": null}

{"nct_id": "NCT00000109", "brief_title": "Pregnancy outcomes registry", "gender": "F", "maximum_age": "nan"}
"#;

/// Patient topics as produced by the topic preprocessing step.
pub const TOPICS_CSV: &str = "\
qid,query,keywords,gender,age,is_smoker,is_drinker
1,58-year-old woman with hypertension,\"hypertension, smoker\",F,58.0,True,False
2,8-year-old boy with asthma,asthma,M,8.0,False,False
3,Adult presenting with fatigue,fatigue,U,nan,False,True
";

/// Patients for postprocessing, one line per topic in topic order.
pub const PATIENTS_JSONL: &str = r#"{"patient_id": 1, "gender": "F", "age": 58, "is_smoker": true, "is_drinker": false}
{"patient_id": 2, "gender": "M", "age": 8, "is_smoker": false, "is_drinker": false}
{"patient_id": 3, "gender": "U", "age": -1, "is_smoker": false, "is_drinker": true}
"#;

/// Trials for postprocessing with entity-tagged criteria sections.
pub const TRIALS_JSONL: &str = r#"{"nct_id": "NCT10000001", "gender": "A", "minimum_age": 18, "maximum_age": 75, "inclusion_criteria": {"positive_entities": ["hypertension"], "negated_entities": ["smoking"]}, "exclusion_criteria": {"positive_entities": [], "negated_entities": []}}
{"nct_id": "NCT10000002", "gender": "M", "minimum_age": null, "maximum_age": null, "inclusion_criteria": {"positive_entities": ["asthma"], "negated_entities": []}, "exclusion_criteria": {"positive_entities": ["alcohol"], "negated_entities": []}}
{"nct_id": "NCT10000003", "gender": "F", "minimum_age": 18, "maximum_age": null, "inclusion_criteria": {"positive_entities": ["smoke"], "negated_entities": []}, "exclusion_criteria": {"positive_entities": [], "negated_entities": []}}
{"nct_id": "NCT10000004", "gender": "A", "minimum_age": 12, "maximum_age": 17}
"#;

/// First-stage retrieval scores keyed by topic number, then by trial.
pub const RESULTS_JSON: &str = r#"{
	"1": {"NCT10000001": 12.5, "NCT10000002": 11.0, "NCT10000003": 10.25, "NCT99999999": 9.0},
	"2": {"NCT10000002": 8.5, "NCT10000004": 7.0, "NCT10000001": 6.5},
	"3": {"NCT10000002": 5.0, "NCT10000003": 4.5}
}"#;
