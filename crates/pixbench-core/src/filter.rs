// Dweve PixBench - Benchmark Result Aggregation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Record filtering and normalization.
//!
//! This is the only place where defaults are applied and field domains are
//! checked. Everything downstream works on [`MeasurementRecord`]s whose
//! dimension values are fully resolved.

use crate::error::RecordIssue;
use crate::record::{MeasurementRecord, Mode, RawRecord, RecordCollection};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Experiment tag used when a record carries none.
pub const UNKNOWN_EXPERIMENT: &str = "unknown";

/// Dithering value the producer writes when it could not read the control.
const UNKNOWN_DITHERING: &str = "unknown";

/// A successful record that was excluded from every analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedRecord {
    /// Position in the document's `outputs` array.
    pub index: usize,
    /// Experiment tag, if it could be read.
    pub experiment: Option<String>,
    /// Why the record was rejected.
    pub issue: RecordIssue,
}

/// Counts describing how much of the input was usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataQualityReport {
    /// Records in the document.
    pub total: usize,
    /// Records that passed the filter.
    pub successful: usize,
    /// Records marked `success: false`.
    pub failed: usize,
    /// Failure count per experiment tag.
    pub failures_by_experiment: BTreeMap<String, usize>,
    /// Distinct `error` messages of failed runs, per experiment tag.
    pub failure_messages: BTreeMap<String, Vec<String>>,
    /// Successful records that could not be used.
    pub malformed: Vec<MalformedRecord>,
}

impl DataQualityReport {
    /// Returns whether any record was rejected as malformed.
    pub fn has_warnings(&self) -> bool {
        !self.malformed.is_empty()
    }
}

/// Output of the record filter: usable records plus data-quality counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilteredRecords {
    /// Normalized successful records in document order.
    pub records: Vec<MeasurementRecord>,
    /// What was dropped and why.
    pub quality: DataQualityReport,
}

impl FilteredRecords {
    /// Wraps records that are already normalized (e.g. synthetic data).
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        let quality = DataQualityReport {
            total: records.len(),
            successful: records.len(),
            ..DataQualityReport::default()
        };
        Self { records, quality }
    }

    /// Number of usable records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no record is usable.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Selects the successful records of a collection and normalizes them.
///
/// Failed records are counted per experiment. Successful records that are
/// missing `algorithmTime_ms` or carry out-of-domain values are logged,
/// counted as malformed, and excluded.
pub fn filter_successful(collection: &RecordCollection) -> FilteredRecords {
    let mut records = Vec::with_capacity(collection.len());
    let mut quality = DataQualityReport {
        total: collection.len(),
        ..DataQualityReport::default()
    };

    for (index, decoded) in collection.iter().enumerate() {
        let raw = match decoded {
            Ok(raw) => raw,
            Err(issue) => {
                warn!(index, %issue, "Skipping malformed benchmark record");
                quality.malformed.push(MalformedRecord {
                    index,
                    experiment: None,
                    issue: issue.clone(),
                });
                continue;
            }
        };

        if !raw.is_success() {
            let experiment = raw
                .experiment
                .clone()
                .unwrap_or_else(|| UNKNOWN_EXPERIMENT.to_string());
            debug!(index, experiment = %experiment, error = ?raw.error, "Ignoring failed run");
            if let Some(message) = raw.error.as_deref().filter(|m| !m.is_empty()) {
                let messages = quality
                    .failure_messages
                    .entry(experiment.clone())
                    .or_default();
                if !messages.iter().any(|m| m == message) {
                    messages.push(message.to_string());
                }
            }
            *quality.failures_by_experiment.entry(experiment).or_default() += 1;
            quality.failed += 1;
            continue;
        }

        match normalize(raw) {
            Ok(record) => records.push(record),
            Err(issue) => {
                warn!(index, %issue, "Skipping malformed benchmark record");
                quality.malformed.push(MalformedRecord {
                    index,
                    experiment: raw.experiment.clone(),
                    issue,
                });
            }
        }
    }

    quality.successful = records.len();
    debug!(
        total = quality.total,
        successful = quality.successful,
        failed = quality.failed,
        malformed = quality.malformed.len(),
        "Filtered benchmark records"
    );

    FilteredRecords { records, quality }
}

/// Resolves defaults and checks domains for one successful record.
///
/// # Errors
///
/// Returns the first [`RecordIssue`] found.
pub fn normalize(raw: &RawRecord) -> Result<MeasurementRecord, RecordIssue> {
    let algorithm_time_ms = match raw.algorithm_time_ms {
        None => return Err(RecordIssue::MissingTime),
        Some(t) if !t.is_finite() || t < 0.0 => return Err(RecordIssue::InvalidTime { value: t }),
        Some(t) => t,
    };

    let mode = match raw.mode.as_deref() {
        None => Mode::Normal,
        Some(s) => s.parse()?,
    };

    let resolution = raw
        .resolution
        .map(|r| positive_u32("resolution", r))
        .transpose()?;
    let colors = raw.colors.map(|c| positive_u32("colors", c)).transpose()?;
    let pixel_size = raw
        .pixel_size
        .map(|p| positive_u32("pixelSize", p))
        .transpose()?
        .unwrap_or(1);

    let output_scale = match raw.output_scale {
        Some(s) if !(s > 0.0 && s <= 1.0) => {
            return Err(RecordIssue::InvalidField {
                field: "outputScale",
                reason: format!("must be in (0, 1], found {}", s),
            })
        }
        other => other,
    };

    let dithering = raw
        .dithering
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty() && *d != UNKNOWN_DITHERING)
        .map(str::to_string);

    Ok(MeasurementRecord {
        experiment: raw
            .experiment
            .clone()
            .unwrap_or_else(|| UNKNOWN_EXPERIMENT.to_string()),
        mode,
        algorithm_time_ms,
        resolution,
        colors,
        pixel_size,
        output_scale,
        dithering,
        image_name: raw.image_name.clone(),
        output_image: raw.output_image.clone().filter(|name| !name.is_empty()),
        total_processing_time_ms: raw.total_processing_time_ms,
    })
}

fn positive_u32(field: &'static str, value: u64) -> Result<u32, RecordIssue> {
    if value == 0 {
        return Err(RecordIssue::InvalidField {
            field,
            reason: "must be positive".to_string(),
        });
    }
    u32::try_from(value).map_err(|_| RecordIssue::InvalidField {
        field,
        reason: format!("{} is out of range", value),
    })
}
