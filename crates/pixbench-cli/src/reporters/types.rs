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

//! Report document handed to the renderers.

use pixbench_core::AnalysisReport;
use serde::Serialize;
use serde_json::Value;

/// An analysis report with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDocument {
    /// Report title.
    pub title: String,
    /// Input file the records came from.
    pub source: String,
    /// Generation time (RFC 3339).
    pub timestamp: String,
    /// Metadata object from the benchmark document, if any.
    pub metadata: Option<Value>,
    /// Additional notes.
    pub notes: Vec<String>,
    /// The analyses.
    pub report: AnalysisReport,
}

impl AnalysisDocument {
    /// Creates a document stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        metadata: Option<Value>,
        report: AnalysisReport,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            metadata,
            notes: Vec::new(),
            report,
        }
    }

    /// Adds a note.
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Benchmark start time recorded by the producer, if present.
    pub fn benchmark_timestamp(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("timestamp"))
            .and_then(Value::as_str)
    }
}
