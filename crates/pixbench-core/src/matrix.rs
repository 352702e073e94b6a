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

//! Two-factor interaction matrices.

use crate::dimension::{Dimension, DimensionValue, ExperimentFilter};
use crate::error::{AnalysisError, Result};
use crate::record::{MeasurementRecord, Mode};
use crate::stats::AggregateStat;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Which records and axes feed one interaction matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSpec {
    /// Name used in reports.
    pub name: String,
    /// Row dimension.
    pub rows: Dimension,
    /// Column dimension.
    pub columns: Dimension,
    /// Mode the records must have.
    pub mode: Mode,
    /// Experiment predicate.
    #[serde(default)]
    pub experiments: ExperimentFilter,
}

impl MatrixSpec {
    /// Creates a spec over all experiments.
    pub fn new(name: impl Into<String>, rows: Dimension, columns: Dimension, mode: Mode) -> Self {
        Self {
            name: name.into(),
            rows,
            columns,
            mode,
            experiments: ExperimentFilter::Any,
        }
    }

    /// Restricts to matching experiments.
    pub fn with_experiments(mut self, experiments: ExperimentFilter) -> Self {
        self.experiments = experiments;
        self
    }

    /// Heavy-mode colors by resolution over the resolution and color experiments.
    pub fn colors_by_resolution() -> Self {
        Self::new("colors_by_resolution", Dimension::Colors, Dimension::Resolution, Mode::Heavy)
            .with_experiments(ExperimentFilter::one_of([
                "resolution_scaling",
                "color_depth_analysis",
            ]))
    }

    /// Checks that the axes differ.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] when both axes use the same
    /// dimension.
    pub fn validate(&self) -> Result<()> {
        if self.rows == self.columns {
            return Err(AnalysisError::invalid_config(
                format!("matrices.{}", self.name),
                format!("rows and columns both use '{}'", self.rows),
            ));
        }
        Ok(())
    }
}

/// Dense grid of mean times over two dimensions.
///
/// Cells without samples hold `NaN`, which serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionMatrix {
    /// Name from the originating spec.
    pub name: String,
    /// Row dimension.
    pub row_dimension: Dimension,
    /// Column dimension.
    pub column_dimension: Dimension,
    /// Sorted distinct row values.
    pub row_values: Vec<DimensionValue>,
    /// Sorted distinct column values.
    pub column_values: Vec<DimensionValue>,
    /// Display labels aligned with `row_values`.
    pub row_labels: Vec<String>,
    /// Display labels aligned with `column_values`.
    pub column_labels: Vec<String>,
    /// Mean time per cell, `NaN` for no data.
    pub cells: Vec<Vec<f64>>,
    /// Sample count per cell.
    pub counts: Vec<Vec<usize>>,
}

impl InteractionMatrix {
    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_values.len(), self.column_values.len())
    }

    /// Mean of one cell, or `None` when the cell has no data or is out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .filter(|v| !v.is_nan())
    }

    /// Sample count of one cell (0 when out of range).
    pub fn count(&self, row: usize, column: usize) -> usize {
        self.counts
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Number of cells holding data.
    pub fn filled_cells(&self) -> usize {
        self.counts.iter().flatten().filter(|&&c| c > 0).count()
    }

    /// Mean of the cell at the given axis values.
    pub fn lookup(&self, row: &DimensionValue, column: &DimensionValue) -> Option<f64> {
        let r = self.row_values.binary_search(row).ok()?;
        let c = self.column_values.binary_search(column).ok()?;
        self.cell(r, c)
    }
}

/// Builds the matrix described by `spec`.
///
/// Returns `None` when either axis has fewer than two distinct values among
/// records carrying both dimensions.
pub fn build_matrix(records: &[MeasurementRecord], spec: &MatrixSpec) -> Option<InteractionMatrix> {
    let mut buckets: BTreeMap<(DimensionValue, DimensionValue), Vec<f64>> = BTreeMap::new();
    let mut row_set = BTreeSet::new();
    let mut column_set = BTreeSet::new();

    for record in records
        .iter()
        .filter(|r| r.mode == spec.mode && spec.experiments.matches(&r.experiment))
    {
        let (Some(row), Some(column)) = (spec.rows.extract(record), spec.columns.extract(record))
        else {
            continue;
        };
        row_set.insert(row.clone());
        column_set.insert(column.clone());
        buckets.entry((row, column)).or_default().push(record.algorithm_time_ms);
    }

    if row_set.len() < 2 || column_set.len() < 2 {
        debug!(
            matrix = %spec.name,
            rows = row_set.len(),
            columns = column_set.len(),
            "Skipping matrix with a single-valued axis"
        );
        return None;
    }

    let row_values: Vec<DimensionValue> = row_set.into_iter().collect();
    let column_values: Vec<DimensionValue> = column_set.into_iter().collect();

    let mut cells = Vec::with_capacity(row_values.len());
    let mut counts = Vec::with_capacity(row_values.len());
    for row in &row_values {
        let mut cell_row = Vec::with_capacity(column_values.len());
        let mut count_row = Vec::with_capacity(column_values.len());
        for column in &column_values {
            match buckets.get(&(row.clone(), column.clone())) {
                Some(samples) => {
                    let stat = AggregateStat::from_samples(samples);
                    cell_row.push(stat.mean);
                    count_row.push(stat.count);
                }
                None => {
                    cell_row.push(f64::NAN);
                    count_row.push(0);
                }
            }
        }
        cells.push(cell_row);
        counts.push(count_row);
    }

    Some(InteractionMatrix {
        name: spec.name.clone(),
        row_dimension: spec.rows,
        column_dimension: spec.columns,
        row_labels: row_values.iter().map(|v| spec.rows.format_value(v)).collect(),
        column_labels: column_values.iter().map(|v| spec.columns.format_value(v)).collect(),
        row_values,
        column_values,
        cells,
        counts,
    })
}
