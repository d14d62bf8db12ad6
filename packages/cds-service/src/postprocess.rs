//! Batch filtering of first-stage retrieval results against patient and trial attributes.
//!
//! Attributes come from side-loaded files rather than the record store. Trials missing from the
//! attribute table are kept and not counted as checked.

use std::{
	collections::{BTreeMap, HashMap},
	fs::File,
	io::{BufRead, BufReader, BufWriter, Write},
	path::Path,
};

use serde::{Deserialize, de::DeserializeOwned};

use cds_config::Filter;
use cds_domain::{
	acceptance::TrialEntities,
	exclusion::{ExclusionReason, ExclusionRules, PatientAttributes, TrialAttributes},
	gender::Gender,
};

use crate::{Error, Result, ranked::Ranked};

/// Relevance scores keyed by topic number, then by trial identifier, in file order.
pub type ResultSet = Ranked<Ranked<f64>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTally {
	pub checked: usize,
	pub excluded: usize,
	pub reasons: BTreeMap<ExclusionReason, usize>,
}
impl TopicTally {
	fn record(&mut self, reason: ExclusionReason) {
		self.excluded += 1;

		*self.reasons.entry(reason).or_default() += 1;
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostprocessReport {
	pub retained: ResultSet,
	pub topics: Ranked<TopicTally>,
	pub total_checked: usize,
	pub total_excluded: usize,
}
impl PostprocessReport {
	/// Share of checked trials that were excluded, or `None` when nothing was checked.
	pub fn exclusion_rate(&self) -> Option<f64> {
		if self.total_checked == 0 {
			return None;
		}

		Some(self.total_excluded as f64 / self.total_checked as f64)
	}

	pub fn reason_totals(&self) -> BTreeMap<ExclusionReason, usize> {
		let mut totals = BTreeMap::new();

		for (_, tally) in self.topics.iter() {
			for (reason, count) in &tally.reasons {
				*totals.entry(*reason).or_default() += count;
			}
		}

		totals
	}
}

/// One line of a trials file: restrictions plus entity-tagged criteria sections.
#[derive(Debug, Clone, Deserialize)]
struct TrialLine {
	nct_id: String,
	gender: Option<Gender>,
	minimum_age: Option<f64>,
	maximum_age: Option<f64>,
	#[serde(flatten)]
	entities: TrialEntities,
}

/// Filters `results` topic by topic. Topic `n` uses `patients[n - 1]`.
pub fn postprocess(
	results: &ResultSet,
	patients: &[PatientAttributes],
	trials: &HashMap<String, TrialAttributes>,
	rules: &ExclusionRules,
) -> Result<PostprocessReport> {
	let mut report = PostprocessReport::default();

	for (topic, scores) in results.iter() {
		let patient = patient_for_topic(topic, patients)?;
		let mut tally = TopicTally::default();
		let mut included = Ranked::with_capacity(scores.len());

		for (trial_id, score) in scores.iter() {
			if let Some(trial) = trials.get(trial_id) {
				tally.checked += 1;

				if let Some(reason) = rules.evaluate(patient, trial) {
					tracing::debug!(topic, trial = trial_id, reason = %reason, "Excluded trial.");

					tally.record(reason);

					continue;
				}
			}

			included.insert(trial_id.to_string(), *score);
		}

		tracing::info!(
			topic,
			retained = included.len(),
			checked = tally.checked,
			excluded = tally.excluded,
			"Postprocessed topic."
		);

		report.total_checked += tally.checked;
		report.total_excluded += tally.excluded;

		report.retained.insert(topic.to_string(), included);
		report.topics.insert(topic.to_string(), tally);
	}

	let rate = report
		.exclusion_rate()
		.map(|rate| format!("{:.2}%", rate * 100.0))
		.unwrap_or_else(|| "n/a".to_string());

	tracing::info!(
		total_checked = report.total_checked,
		total_excluded = report.total_excluded,
		exclusion_rate = %rate,
		"Postprocessing finished."
	);

	Ok(report)
}

pub fn load_results(path: &Path) -> Result<ResultSet> {
	let file = File::open(path).map_err(|err| Error::read(path, err))?;

	serde_json::from_reader(BufReader::new(file)).map_err(|err| Error::Malformed {
		message: format!("{}: {err}", path.display()),
	})
}

pub fn load_patients(path: &Path) -> Result<Vec<PatientAttributes>> {
	read_json_lines(path)
}

/// Reads trial attributes, deriving smoker and drinker acceptance from the configured keywords.
pub fn load_trials(path: &Path, cfg: &Filter) -> Result<HashMap<String, TrialAttributes>> {
	let lines: Vec<TrialLine> = read_json_lines(path)?;

	Ok(lines.into_iter().map(|line| trial_attributes(line, cfg)).collect())
}

pub fn write_results(path: &Path, results: &ResultSet) -> Result<()> {
	let file = File::create(path).map_err(|err| Error::write(path, err))?;
	let mut writer = BufWriter::new(file);

	serde_json::to_writer(&mut writer, results).map_err(|err| Error::write(path, err))?;
	writer.flush().map_err(|err| Error::write(path, err))?;

	Ok(())
}

fn trial_attributes(line: TrialLine, cfg: &Filter) -> (String, TrialAttributes) {
	let attributes = TrialAttributes {
		gender: line.gender,
		minimum_age: line.minimum_age,
		maximum_age: line.maximum_age,
		accepts_smokers: line.entities.acceptance(&cfg.smoker_keywords),
		accepts_drinkers: line.entities.acceptance(&cfg.drinker_keywords),
	};

	(line.nct_id, attributes)
}

fn patient_for_topic<'a>(
	topic: &str,
	patients: &'a [PatientAttributes],
) -> Result<&'a PatientAttributes> {
	let number = topic.trim().parse::<usize>().map_err(|_| Error::InvalidRequest {
		message: format!("topic {topic:?} is not a topic number."),
	})?;

	number
		.checked_sub(1)
		.and_then(|index| patients.get(index))
		.ok_or_else(|| Error::UnknownTopic { topic: topic.to_string() })
}

fn read_json_lines<T>(path: &Path) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	let file = File::open(path).map_err(|err| Error::read(path, err))?;
	let mut items = Vec::new();

	for (index, line) in BufReader::new(file).lines().enumerate() {
		let line = line.map_err(|err| Error::read(path, err))?;

		if line.trim().is_empty() {
			continue;
		}

		let item = serde_json::from_str(&line).map_err(|err| Error::Malformed {
			message: format!("{} at line {}: {err}", path.display(), index + 1),
		})?;

		items.push(item);
	}

	Ok(items)
}
