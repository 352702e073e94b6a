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

//! CLI command implementations

mod analyze;
mod complexity;
mod group;
mod matrix;
mod summary;

pub use analyze::analyze;
pub use complexity::complexity;
pub use group::group;
pub use matrix::matrix;
pub use summary::summary;

use crate::error::CliError;
use pixbench_core::{ExperimentFilter, RecordCollection};
use std::fs;
use std::io::{self, Write};
use tracing::debug;

/// Default maximum input size (256 MB).
/// Can be overridden via the PIXBENCH_MAX_FILE_SIZE environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`], in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "PIXBENCH_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// # Arguments
///
/// * `path` - Path to the file to read
///
/// # Errors
///
/// Returns `Err` if:
/// - The file metadata cannot be accessed
/// - The file is larger than the limit (configurable via `PIXBENCH_MAX_FILE_SIZE`)
/// - The file cannot be read or is not valid UTF-8
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
///
/// # Errors
///
/// Returns `Err` if the file or stdout cannot be written.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Reads and validates a benchmark results document.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or its shape is invalid.
pub fn load_collection(path: &str) -> Result<RecordCollection, CliError> {
    let content = read_file(path)?;
    let collection = RecordCollection::from_json_str(&content)?;
    debug!(path, records = collection.len(), "Loaded benchmark results");
    Ok(collection)
}

/// Builds an experiment predicate from `--experiment` tags or `--contains`.
///
/// Tags win when both are given; the CLI rejects that combination earlier.
pub fn experiment_filter(tags: &[String], contains: Option<&str>) -> ExperimentFilter {
    if !tags.is_empty() {
        ExperimentFilter::one_of(tags.iter().cloned())
    } else if let Some(needle) = contains {
        ExperimentFilter::contains(needle)
    } else {
        ExperimentFilter::Any
    }
}
