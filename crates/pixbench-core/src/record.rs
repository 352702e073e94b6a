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

//! Benchmark record model and input-contract validation.
//!
//! A benchmark document is a JSON object with an `outputs` array holding one
//! object per benchmark run and an optional `metadata` object:
//!
//! ```json
//! {
//!   "metadata": { "startedAt": "2025-01-01T00:00:00Z" },
//!   "outputs": [
//!     { "experiment": "resolution_scaling", "mode": "normal",
//!       "resolution": 1024, "colors": 16, "algorithmTime_ms": 42.5,
//!       "success": true }
//!   ]
//! }
//! ```
//!
//! [`RecordCollection`] checks the document shape once. Records are kept in
//! their raw form ([`RawRecord`]) until the record filter normalizes them into
//! [`MeasurementRecord`]s.

use crate::error::{json_type_name, AnalysisError, RecordIssue, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Processing mode of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Standard processing.
    Normal,
    /// Enhanced quantization and dithering.
    Heavy,
}

impl Mode {
    /// All modes in presentation order.
    pub const ALL: [Mode; 2] = [Mode::Normal, Mode::Heavy];

    /// Returns the mode as it appears in benchmark documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = RecordIssue;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "heavy" => Ok(Mode::Heavy),
            _ => Err(RecordIssue::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// A benchmark record exactly as the producer wrote it.
///
/// Every field is optional here; defaults and domain checks are applied by
/// [`filter_successful`](crate::filter::filter_successful).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Experimental scenario tag.
    #[serde(default)]
    pub experiment: Option<String>,
    /// Processing mode string.
    #[serde(default)]
    pub mode: Option<String>,
    /// Whether the run completed. Absent means `true`.
    #[serde(default)]
    pub success: Option<bool>,
    /// Time spent in the algorithm itself.
    #[serde(default, rename = "algorithmTime_ms")]
    pub algorithm_time_ms: Option<f64>,
    /// Square image side length in pixels.
    #[serde(default)]
    pub resolution: Option<u64>,
    /// Palette size.
    #[serde(default)]
    pub colors: Option<u64>,
    /// Pixelation multiplier.
    #[serde(default)]
    pub pixel_size: Option<u64>,
    /// Output downscale factor in (0, 1].
    #[serde(default)]
    pub output_scale: Option<f64>,
    /// Dithering algorithm name.
    #[serde(default)]
    pub dithering: Option<String>,
    /// Source image identifier.
    #[serde(default)]
    pub image_name: Option<String>,
    /// File name of the saved output image, if any.
    #[serde(default)]
    pub output_image: Option<String>,
    /// Wall-clock time including page interaction.
    #[serde(default, rename = "totalProcessingTime_ms")]
    pub total_processing_time_ms: Option<f64>,
    /// Failure message for unsuccessful runs.
    #[serde(default)]
    pub error: Option<String>,
}

impl RawRecord {
    /// Returns whether the run succeeded (absent counts as success).
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

/// A successful, validated record with every default resolved.
///
/// Produced only by the record filter. Dimension fields that the producing
/// experiment did not vary stay `None`, except `pixel_size`, which is always
/// resolved (1 means no pixelation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// Experimental scenario tag (`"unknown"` when absent).
    pub experiment: String,
    /// Processing mode (`normal` when absent).
    pub mode: Mode,
    /// Algorithm time in milliseconds, finite and non-negative.
    pub algorithm_time_ms: f64,
    /// Square image side length in pixels.
    pub resolution: Option<u32>,
    /// Palette size.
    pub colors: Option<u32>,
    /// Pixelation multiplier.
    pub pixel_size: u32,
    /// Output downscale factor in (0, 1].
    pub output_scale: Option<f64>,
    /// Dithering algorithm name.
    pub dithering: Option<String>,
    /// Source image identifier.
    pub image_name: Option<String>,
    /// File name of the saved output image.
    pub output_image: Option<String>,
    /// Wall-clock time including page interaction.
    pub total_processing_time_ms: Option<f64>,
}

impl MeasurementRecord {
    /// Creates a record with only the required fields set.
    ///
    /// Mostly useful for tests and synthetic data.
    pub fn new(experiment: impl Into<String>, mode: Mode, algorithm_time_ms: f64) -> Self {
        Self {
            experiment: experiment.into(),
            mode,
            algorithm_time_ms,
            resolution: None,
            colors: None,
            pixel_size: 1,
            output_scale: None,
            dithering: None,
            image_name: None,
            output_image: None,
            total_processing_time_ms: None,
        }
    }

    /// Sets the resolution.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Sets the palette size.
    pub fn with_colors(mut self, colors: u32) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Sets the pixelation multiplier.
    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    /// Sets the output scale.
    pub fn with_output_scale(mut self, scale: f64) -> Self {
        self.output_scale = Some(scale);
        self
    }

    /// Sets the dithering algorithm.
    pub fn with_dithering(mut self, dithering: impl Into<String>) -> Self {
        self.dithering = Some(dithering.into());
        self
    }

    /// Sets the source image.
    pub fn with_image(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = Some(image_name.into());
        self
    }
}

/// A parsed benchmark document.
///
/// Holds one decode result per element of `outputs`. An element that is an
/// object but has badly typed fields does not fail the whole document; it is
/// kept as a [`RecordIssue::Undecodable`] and surfaces as a data-quality
/// warning.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<std::result::Result<RawRecord, RecordIssue>>,
    metadata: Option<Value>,
}

impl RecordCollection {
    /// Builds a collection from already-typed records.
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: records.into_iter().map(Ok).collect(),
            metadata: None,
        }
    }

    /// Parses and validates a benchmark document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidJson`] for unparseable text and the
    /// shape errors of [`RecordCollection::from_value`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| AnalysisError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validates a benchmark document that is already parsed.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NotAnObject`] if the root is not an object
    /// - [`AnalysisError::MissingOutputs`] if `outputs` is absent
    /// - [`AnalysisError::OutputsNotArray`] if `outputs` is not an array
    /// - [`AnalysisError::RecordNotObject`] if any element is not an object
    pub fn from_value(value: Value) -> Result<Self> {
        let mut root = match value {
            Value::Object(map) => map,
            other => {
                return Err(AnalysisError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };

        let metadata = root.remove("metadata").filter(|m| !m.is_null());
        let outputs = match root.remove("outputs") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(AnalysisError::OutputsNotArray {
                    found: json_type_name(&other),
                })
            }
            None => return Err(AnalysisError::MissingOutputs),
        };

        let mut records = Vec::with_capacity(outputs.len());
        for (index, item) in outputs.into_iter().enumerate() {
            if !item.is_object() {
                return Err(AnalysisError::RecordNotObject {
                    index,
                    found: json_type_name(&item),
                });
            }
            records.push(decode_record(item));
        }

        Ok(Self { records, metadata })
    }

    /// Number of records in the document, including failed and malformed ones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the document holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Document-level metadata, preserved verbatim.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Iterates over decode results in document order.
    pub fn iter(&self) -> impl Iterator<Item = &std::result::Result<RawRecord, RecordIssue>> {
        self.records.iter()
    }
}

/// Decodes one `outputs` element.
///
/// An undecodable element that is explicitly marked `success: false` is kept
/// as a failed record so it is counted as a failure rather than as malformed.
fn decode_record(item: Value) -> std::result::Result<RawRecord, RecordIssue> {
    let explicit_failure = item.get("success").and_then(Value::as_bool) == Some(false);
    let field = |name: &str| item.get(name).and_then(Value::as_str).map(str::to_string);
    let experiment = field("experiment");
    let error = field("error");

    match serde_json::from_value::<RawRecord>(item) {
        Ok(record) => Ok(record),
        Err(_) if explicit_failure => Ok(RawRecord {
            experiment,
            error,
            success: Some(false),
            ..RawRecord::default()
        }),
        Err(e) => Err(RecordIssue::Undecodable {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("normal".parse::<Mode>().unwrap(), Mode::Normal);
        assert_eq!("Heavy".parse::<Mode>().unwrap(), Mode::Heavy);
        assert!(matches!(
            "turbo".parse::<Mode>(),
            Err(RecordIssue::UnknownMode { .. })
        ));
        assert_eq!(Mode::Heavy.to_string(), "heavy");
    }

    #[test]
    fn test_raw_record_field_names() {
        let record: RawRecord = serde_json::from_value(json!({
            "experiment": "pixel_size_effect",
            "mode": "heavy",
            "algorithmTime_ms": 12.5,
            "pixelSize": 4,
            "outputScale": 0.5,
            "imageName": "lena",
            "totalProcessingTime_ms": 40.0,
            "colorMax": 64
        }))
        .unwrap();

        assert_eq!(record.algorithm_time_ms, Some(12.5));
        assert_eq!(record.pixel_size, Some(4));
        assert_eq!(record.output_scale, Some(0.5));
        assert_eq!(record.image_name.as_deref(), Some("lena"));
        assert_eq!(record.total_processing_time_ms, Some(40.0));
        assert!(record.is_success());
    }

    #[test]
    fn test_collection_from_document() {
        let doc = json!({
            "metadata": {"host": "ci"},
            "outputs": [
                {"mode": "normal", "algorithmTime_ms": 1.0},
                {"mode": "heavy", "success": false, "error": "timeout"}
            ]
        });

        let collection = RecordCollection::from_value(doc).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.metadata(), Some(&json!({"host": "ci"})));
    }

    #[test]
    fn test_collection_shape_errors() {
        assert_eq!(
            RecordCollection::from_value(json!([1, 2])).unwrap_err(),
            AnalysisError::NotAnObject { found: "array" }
        );
        assert_eq!(
            RecordCollection::from_value(json!({"metadata": {}})).unwrap_err(),
            AnalysisError::MissingOutputs
        );
        assert_eq!(
            RecordCollection::from_value(json!({"outputs": "nope"})).unwrap_err(),
            AnalysisError::OutputsNotArray { found: "string" }
        );
        assert_eq!(
            RecordCollection::from_value(json!({"outputs": [{}, 3]})).unwrap_err(),
            AnalysisError::RecordNotObject {
                index: 1,
                found: "number"
            }
        );
    }

    #[test]
    fn test_invalid_json_text() {
        let err = RecordCollection::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidJson(_)));
    }

    #[test]
    fn test_badly_typed_record_is_kept_as_issue() {
        let collection = RecordCollection::from_value(json!({
            "outputs": [
                {"mode": "normal", "resolution": "big", "algorithmTime_ms": 3.0},
                {"success": false, "resolution": "big", "experiment": "x"}
            ]
        }))
        .unwrap();

        let decoded: Vec<_> = collection.iter().collect();
        assert!(matches!(decoded[0], Err(RecordIssue::Undecodable { .. })));
        let failed = decoded[1].as_ref().unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.experiment.as_deref(), Some("x"));
    }
}
