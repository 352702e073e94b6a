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

//! Summary command - overview and data-quality counts only.

use super::analyze::build_document;
use super::write_output;
use crate::error::CliError;
use crate::reporters::render_summary;

/// Prints the overview and data-quality sections for a results file.
///
/// # Errors
///
/// Returns `Err` if the file cannot be loaded.
pub fn summary(file: &str) -> Result<(), CliError> {
    let doc = build_document(file, None, false)?;
    write_output(&render_summary(&doc), None)
}
