//! Curated dataset builder
//!
//! One offline pass over the raw corpus: quality filter, dedup, then
//! classify and tag each survivor. The dataset is written wholesale to a
//! temporary sibling and renamed into place, so a failed run never leaves
//! a partial file behind.

use super::arc::{classify, ArcStage};
use super::dedup::dedup;
use super::occasion::{derive_occasions, Occasion};
use super::quality::QualityFilter;
use super::types::{ProcessedQuestion, RawQuestion};
use crate::config::QualityConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Corpus source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Corpus parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error writing dataset: {0}")]
    Io(#[from] std::io::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Counts collected during a build, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub read: usize,
    pub after_quality: usize,
    pub after_dedup: usize,
    pub arc_counts: BTreeMap<ArcStage, usize>,
    pub occasion_counts: BTreeMap<Occasion, usize>,
}

impl BuildReport {
    pub fn total(&self) -> usize {
        self.arc_counts.values().sum()
    }

    pub fn arc_count(&self, stage: ArcStage) -> usize {
        self.arc_counts.get(&stage).copied().unwrap_or(0)
    }

    pub fn occasion_count(&self, occasion: Occasion) -> usize {
        self.occasion_counts.get(&occasion).copied().unwrap_or(0)
    }

    fn log(&self) {
        info!(
            read = self.read,
            after_quality = self.after_quality,
            after_dedup = self.after_dedup,
            "corpus filtered"
        );
        for stage in ArcStage::ALL {
            info!(
                arc = stage.position(),
                label = stage.label(),
                count = self.arc_count(stage),
                "arc distribution"
            );
        }
        for (occasion, count) in &self.occasion_counts {
            info!(occasion = %occasion, count, "occasion coverage");
        }
    }
}

/// Output of a build: the ordered dataset and its report
#[derive(Debug, Clone)]
pub struct CuratedDataset {
    pub questions: Vec<ProcessedQuestion>,
    pub report: BuildReport,
}

#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    quality: QualityFilter,
}

impl DatasetBuilder {
    pub fn new(config: QualityConfig) -> Self {
        Self {
            quality: QualityFilter::new(config),
        }
    }

    /// Run the full classification pass over an in-memory corpus
    pub fn build(&self, raw: Vec<RawQuestion>) -> CuratedDataset {
        let mut report = BuildReport {
            read: raw.len(),
            ..Default::default()
        };

        let passed: Vec<RawQuestion> = raw
            .into_iter()
            .filter(|q| match self.quality.check(q) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(id = %q.id, ?reason, "rejected by quality filter");
                    false
                }
            })
            .collect();
        report.after_quality = passed.len();

        let unique = dedup(passed);
        report.after_dedup = unique.len();

        let questions: Vec<ProcessedQuestion> = unique
            .into_iter()
            .map(|q| {
                let processed = process(q);
                *report.arc_counts.entry(processed.arc_position).or_default() += 1;
                for occasion in &processed.occasions {
                    *report.occasion_counts.entry(*occasion).or_default() += 1;
                }
                processed
            })
            .collect();

        report.log();
        CuratedDataset { questions, report }
    }

    /// Read the corpus, build, and write the dataset. Nothing is written
    /// unless the corpus was read and parsed in full.
    pub fn run(&self, input: &Path, output: &Path) -> PipelineResult<BuildReport> {
        let raw = load_corpus(input)?;
        let dataset = self.build(raw);
        write_dataset(output, &dataset.questions)?;
        info!(count = dataset.questions.len(), path = %output.display(), "wrote curated dataset");
        Ok(dataset.report)
    }
}

fn process(q: RawQuestion) -> ProcessedQuestion {
    let arc = classify(&q);
    let occasions = derive_occasions(&q);
    ProcessedQuestion {
        id: q.id,
        text: q.text,
        slug: q.slug,
        option_a: q.option_a,
        option_b: q.option_b,
        format: q.format,
        arc_position: arc,
        arc_label: arc.label().to_string(),
        tones: q.tones,
        audiences: q.audiences,
        category: q.category,
        occasions,
    }
}

/// Load the raw corpus as a JSON array of records
pub fn load_corpus(path: &Path) -> PipelineResult<Vec<RawQuestion>> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let raw: Vec<RawQuestion> = serde_json::from_str(&content)?;
    info!(count = raw.len(), path = %path.display(), "read corpus");
    Ok(raw)
}

/// Write the dataset wholesale, replacing any previous file atomically
pub fn write_dataset(path: &Path, questions: &[ProcessedQuestion]) -> PipelineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(questions)?;
    let tmp = tmp_path(path);
    let written = write_file(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        fs::remove_file(&tmp).ok();
        return Err(e.into());
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "dataset".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::types::FORMAT_BINARY;

    fn corpus() -> Vec<RawQuestion> {
        vec![
            RawQuestion::new("1", "What is the capital of France?").with_format("trivia"),
            RawQuestion::new("2", "Why?"),
            RawQuestion::new("3", "What's your weirdest habit?").with_tones(&["funny"]),
            RawQuestion::new("4", "what's your WEIRDEST habit??").with_tones(&["deep"]),
            RawQuestion::new("5", "Would you rather be early or late?")
                .with_format(FORMAT_BINARY)
                .with_options("Early", "Late")
                .with_audiences(&["couples"]),
            RawQuestion::new("6", "What do you hope to be doing in ten years?")
                .with_audiences(&["family"]),
        ]
    }

    #[test]
    fn build_filters_dedups_and_classifies() {
        let dataset = DatasetBuilder::default().build(corpus());
        let ids: Vec<_> = dataset.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "5", "6"]);

        let report = &dataset.report;
        assert_eq!(report.read, 6);
        assert_eq!(report.after_quality, 4);
        assert_eq!(report.after_dedup, 3);
        assert_eq!(report.total(), 3);
        assert_eq!(report.arc_count(ArcStage::BreakTheIce), 1);
        assert_eq!(report.arc_count(ArcStage::PlayARound), 1);
        assert_eq!(report.arc_count(ArcStage::EndOnAHigh), 1);
        assert_eq!(report.occasion_count(Occasion::Party), 1);
        assert_eq!(report.occasion_count(Occasion::DateNight), 1);
        assert_eq!(report.occasion_count(Occasion::Family), 1);
    }

    #[test]
    fn processed_record_carries_label_and_fields() {
        let dataset = DatasetBuilder::default().build(corpus());
        let binary = &dataset.questions[1];
        assert_eq!(binary.arc_position, ArcStage::PlayARound);
        assert_eq!(binary.arc_label, "Play a Round");
        assert_eq!(binary.option_b.as_deref(), Some("Late"));
        assert_eq!(binary.occasions, vec![Occasion::DateNight]);
    }

    #[test]
    fn tmp_path_is_a_sibling() {
        let tmp = tmp_path(Path::new("data/questions.json"));
        assert_eq!(tmp, PathBuf::from("data/questions.json.tmp"));
    }

    #[test]
    fn failed_write_removes_the_temporary_file() {
        let dir = tempfile::TempDir::new().unwrap();
        // A directory squatting on the output path makes the rename fail
        let output = dir.path().join("questions.json");
        fs::create_dir(&output).unwrap();
        fs::create_dir(output.join("keep")).unwrap();

        assert!(write_dataset(&output, &[]).is_err());
        assert!(!tmp_path(&output).exists());

        // A directory at the temporary path makes the create fail
        let other = dir.path().join("other.json");
        fs::create_dir(tmp_path(&other)).unwrap();
        assert!(write_dataset(&other, &[]).is_err());
        assert!(!other.exists());
    }
}
