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

//! Complexity command - empirical complexity exponent per mode.

use super::{experiment_filter, load_collection, write_output};
use crate::error::CliError;
use pixbench_core::{estimate_complexity_for_mode, filter_successful, Mode};

/// Prints the fitted exponent for one mode, or both when `mode` is `None`.
///
/// # Errors
///
/// Returns `Err` if the file cannot be loaded.
pub fn complexity(file: &str, mode: Option<Mode>, experiments: &[String]) -> Result<(), CliError> {
    let filtered = filter_successful(&load_collection(file)?);
    let filter = experiment_filter(experiments, None);
    let modes: Vec<Mode> = match mode {
        Some(mode) => vec![mode],
        None => Mode::ALL.to_vec(),
    };

    let mut out = String::new();
    for mode in modes {
        let estimate = estimate_complexity_for_mode(&filtered.records, mode, &filter);
        if estimate.is_defined() {
            out.push_str(&format!(
                "{}: exponent {:.3} (R² {:.3}, {} resolutions)\n",
                mode, estimate.exponent, estimate.r_squared, estimate.points
            ));
        } else {
            out.push_str(&format!(
                "{}: exponent {:.3} (undefined, {} resolution(s))\n",
                mode, estimate.exponent, estimate.points
            ));
        }
    }
    write_output(&out, None)
}
