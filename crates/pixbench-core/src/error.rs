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

//! Error types for benchmark aggregation.
//!
//! Only structural violations of the input contract are errors. Individual
//! records that cannot be used are reported as [`RecordIssue`] warnings by the
//! record filter, and insufficient data degrades to well-defined sentinel
//! values instead of failing.

use thiserror::Error;

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Fatal errors that stop an analysis before it starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input text is not valid JSON.
    #[error("Invalid benchmark JSON: {0}")]
    InvalidJson(String),

    /// The document root is not a JSON object.
    #[error("Benchmark document must be an object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead
        found: &'static str,
    },

    /// The document has no `outputs` field.
    #[error("Benchmark document has no 'outputs' field")]
    MissingOutputs,

    /// The `outputs` field is not an array.
    #[error("'outputs' must be an array of records, found {found}")]
    OutputsNotArray {
        /// JSON type that was found instead
        found: &'static str,
    },

    /// An element of `outputs` is not an object.
    #[error("Record {index} must be an object, found {found}")]
    RecordNotObject {
        /// Position of the offending element
        index: usize,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// An analysis configuration parameter is invalid.
    #[error("Invalid analysis configuration '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },
}

impl AnalysisError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Why a successful record was excluded from every analysis.
///
/// These are data-quality warnings, collected into
/// [`DataQualityReport`](crate::filter::DataQualityReport).
#[derive(Error, Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordIssue {
    /// Marked successful but carries no `algorithmTime_ms`.
    #[error("successful record has no algorithmTime_ms")]
    MissingTime,

    /// `algorithmTime_ms` is negative or not finite.
    #[error("algorithmTime_ms must be a non-negative number, found {value}")]
    InvalidTime {
        /// Offending value
        value: f64,
    },

    /// A dimension field is outside its domain.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Field name as it appears in the document
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// `mode` is neither `normal` nor `heavy`.
    #[error("unknown mode '{mode}'")]
    UnknownMode {
        /// Mode string found in the record
        mode: String,
    },

    /// The record object could not be decoded (wrong field types).
    #[error("record could not be decoded: {message}")]
    Undecodable {
        /// Decoder message
        message: String,
    },
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
