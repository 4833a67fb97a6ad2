use rayon::prelude::*;

use crate::foundation::error::{StickerResult, StickerWarning};
use crate::pipeline::runner::{Stage, StageError, StickerJob, StickerOutput, StickerPipeline};
use crate::text::font::FontBackend;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Success,
    Error,
}

/// Per-image outcome, serialized into batch result files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageReport {
    pub name: String,
    pub status: ImageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// Error kind name, e.g. `InvalidMaskDimensions`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<StickerWarning>,
}

#[derive(Debug)]
pub struct BatchEntry {
    pub report: ImageReport,
    pub output: Option<StickerOutput>,
}

/// Results of [`StickerPipeline::process_batch`], in job order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn reports(&self) -> impl Iterator<Item = &ImageReport> {
        self.entries.iter().map(|e| &e.report)
    }

    pub fn succeeded(&self) -> usize {
        self.reports()
            .filter(|r| r.status == ImageStatus::Success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Reports as a JSON array.
    pub fn to_json(&self) -> StickerResult<String> {
        let reports: Vec<&ImageReport> = self.reports().collect();
        Ok(serde_json::to_string_pretty(&reports)?)
    }
}

impl StickerPipeline {
    /// Process `jobs` in parallel. A failing image is reported and never stops the others.
    ///
    /// `font_factory` is called once per job so no font state is shared between threads.
    /// When it fails, that image is built without a caption.
    pub fn process_batch<F>(&self, jobs: &[StickerJob], font_factory: F) -> BatchReport
    where
        F: Fn() -> StickerResult<Box<dyn FontBackend>> + Sync,
    {
        let entries: Vec<BatchEntry> = jobs
            .par_iter()
            .map(|job| {
                let mut font = match font_factory() {
                    Ok(font) => Some(font),
                    Err(err) => {
                        tracing::warn!(job = %job.name, error = %err, "font unavailable");
                        None
                    }
                };
                let font = font.as_deref_mut().map(|f| f as &mut dyn FontBackend);
                let result = self.process(job, font, None);
                entry_for(job, result)
            })
            .collect();

        let report = BatchReport { entries };
        tracing::info!(
            total = report.entries.len(),
            failed = report.failed(),
            "batch finished"
        );
        report
    }
}

fn entry_for(
    job: &StickerJob,
    result: Result<StickerOutput, StageError>,
) -> BatchEntry {
    match result {
        Ok(output) => BatchEntry {
            report: ImageReport {
                name: job.name.clone(),
                status: ImageStatus::Success,
                stage: None,
                kind: None,
                message: None,
                warnings: output.warnings.clone(),
            },
            output: Some(output),
        },
        Err(err) => {
            tracing::warn!(job = %job.name, stage = %err.stage, error = %err.source, "image failed");
            BatchEntry {
                report: ImageReport {
                    name: job.name.clone(),
                    status: ImageStatus::Error,
                    stage: Some(err.stage),
                    kind: Some(err.source.kind().to_string()),
                    message: Some(err.source.to_string()),
                    warnings: Vec::new(),
                },
                output: None,
            }
        }
    }
}
