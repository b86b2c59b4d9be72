//! Batch Driver - CSV in, one card per row
//!
//! CRITICAL: a row-level skip or write failure never stops the batch.
//! Only an unreadable table or an unusable output directory does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::error::{Result, SignatureError};
use crate::fonts::FontKind;
use crate::hashing::config_fingerprint;
use crate::record::{InputRecord, REQUIRED_COLUMNS};
use crate::renderer::SignatureRenderer;
use crate::ENGINE_VERSION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Rendered {
        file: PathBuf,
        sha256: String,
        logo_size: [u32; 2],
        lines_drawn: usize,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowReport {
    /// 1-based data row, header excluded.
    pub row: usize,
    pub name: String,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub engine_version: String,
    pub generated_at: DateTime<Utc>,
    pub config_fingerprint: String,
    pub font: FontKind,
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
    pub rows: Vec<RowReport>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

pub struct BatchRunner {
    renderer: SignatureRenderer,
}

impl BatchRunner {
    pub fn new(renderer: SignatureRenderer) -> Self {
        Self { renderer }
    }

    /// Open the CSV at `input` and render every row.
    pub fn run_file(&self, input: &Path) -> Result<BatchReport> {
        let file = File::open(input).map_err(|e| SignatureError::UnreadableInput {
            path: input.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        self.run_reader(file, input)
    }

    /// Render every row read from `reader`. `source` only names the input in errors.
    pub fn run_reader<R: Read>(&self, reader: R, source: &Path) -> Result<BatchReport> {
        let config = self.renderer.config();
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| SignatureError::UnreadableInput {
                path: source.to_path_buf(),
                source: e,
            })?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(SignatureError::MissingColumn(column.to_string()));
            }
        }

        fs::create_dir_all(&config.output_dir).map_err(|e| SignatureError::OutputDir {
            path: config.output_dir.clone(),
            source: e,
        })?;

        let mut report = BatchReport {
            engine_version: ENGINE_VERSION.to_string(),
            generated_at: Utc::now(),
            config_fingerprint: config_fingerprint(config)?,
            font: self.renderer.font_kind(),
            rendered: 0,
            skipped: 0,
            failed: 0,
            rows: vec![],
        };

        for (index, result) in reader.deserialize::<InputRecord>().enumerate() {
            let row = index + 1;
            let record = result.map_err(|e| SignatureError::InvalidRecord { row, source: e })?;
            let outcome = self.render_row(&record)?;

            match outcome {
                RowOutcome::Rendered { .. } => report.rendered += 1,
                RowOutcome::Skipped { .. } => report.skipped += 1,
                RowOutcome::Failed { .. } => report.failed += 1,
            }
            report.rows.push(RowReport {
                row,
                name: record.name,
                outcome,
            });
        }

        info!(
            rendered = report.rendered,
            skipped = report.skipped,
            failed = report.failed,
            "batch complete"
        );
        Ok(report)
    }

    fn render_row(&self, record: &InputRecord) -> Result<RowOutcome> {
        match self.renderer.render_signature(record) {
            Ok(written) => {
                info!(file = %written.path.display(), "signature generated");
                Ok(RowOutcome::Rendered {
                    file: written.path,
                    sha256: written.sha256,
                    logo_size: [written.logo_size.width, written.logo_size.height],
                    lines_drawn: written.lines_drawn,
                })
            }
            Err(e) if e.is_skippable() => {
                warn!(name = %record.name, "{}; skipping", e);
                Ok(RowOutcome::Skipped {
                    reason: e.to_string(),
                })
            }
            Err(e) if e.is_row_failure() => {
                error!(name = %record.name, "{}", e);
                Ok(RowOutcome::Failed {
                    error: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}
