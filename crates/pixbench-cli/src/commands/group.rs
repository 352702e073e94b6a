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

//! Group command - ad-hoc grouping along any dimensions.

use super::{experiment_filter, load_collection, write_output};
use crate::error::CliError;
use crate::reporters::csv::grouped_to_csv;
use crate::reporters::{render_grouped, to_json, TableFormat};
use pixbench_core::{filter_successful, group_records, Dimension, GroupSpec, Mode};
use tracing::debug;

/// Groups successful records and prints per-group statistics.
///
/// # Arguments
///
/// * `file` - Benchmark results JSON
/// * `by` - Key dimensions, in order
/// * `mode` - Optional mode restriction
/// * `experiments` - Exact experiment tags
/// * `contains` - Experiment substring, used when no tags are given
/// * `format` - Output format
///
/// # Errors
///
/// Returns `Err` if no dimension is given or the file cannot be loaded.
pub fn group(
    file: &str,
    by: &[Dimension],
    mode: Option<Mode>,
    experiments: &[String],
    contains: Option<&str>,
    format: TableFormat,
) -> Result<(), CliError> {
    if by.is_empty() {
        return Err(CliError::invalid_input("at least one --by dimension is required"));
    }

    let filtered = filter_successful(&load_collection(file)?);

    let mut spec = GroupSpec::by(by).with_experiments(experiment_filter(experiments, contains));
    if let Some(mode) = mode {
        spec = spec.in_mode(mode);
    }

    let grouping = group_records(&filtered.records, &spec);
    debug!(
        groups = grouping.len(),
        excluded = grouping.excluded(),
        "Grouped records"
    );
    let stats = grouping.stats();

    let rendered = match format {
        TableFormat::Console => {
            let mut text = render_grouped(&stats);
            if grouping.excluded() > 0 {
                text.push_str(&format!(
                    "{} record(s) lacked a grouping dimension\n",
                    grouping.excluded()
                ));
            }
            text
        }
        TableFormat::Json => to_json(&stats)?,
        TableFormat::Csv => grouped_to_csv(&stats)?,
    };
    write_output(&rendered, None)
}
