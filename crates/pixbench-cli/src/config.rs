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

//! Loading analysis configuration files.

use crate::error::CliError;
use pixbench_core::AnalysisConfig;
use std::path::Path;

/// Loads an [`AnalysisConfig`] from YAML (`.yaml`/`.yml`) or JSON and
/// validates it.
///
/// Fields missing from the file keep their defaults. YAML is read into a
/// JSON value first so experiment filters use the same `one_of: [...]`
/// map form in both formats.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, does not parse, or fails
/// validation.
pub fn load_config(path: &str) -> Result<AnalysisConfig, CliError> {
    let content = crate::commands::read_file(path)?;

    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| CliError::config(path, e.to_string()))?
    } else {
        serde_json::from_str(&content).map_err(|e| CliError::config(path, e.to_string()))?
    };
    let config: AnalysisConfig =
        serde_json::from_value(value).map_err(|e| CliError::config(path, e.to_string()))?;

    config.validate()?;
    Ok(config)
}
