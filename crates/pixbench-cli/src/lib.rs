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

//! PixBench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **analyze**: run every standard analysis and render a console,
//!   Markdown, or JSON report
//! - **summary**: record counts and data-quality warnings
//! - **group**: ad-hoc grouping along any dimensions
//! - **complexity**: empirical complexity exponent per mode
//! - **matrix**: one two-factor interaction matrix
//!
//! # Examples
//!
//! ```no_run
//! use pixbench_cli::commands::analyze;
//! use pixbench_cli::reporters::ReportFormat;
//!
//! # fn main() -> Result<(), pixbench_cli::error::CliError> {
//! analyze("benchmark_results.json", ReportFormat::Markdown, Some("report.md"), None, false)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod reporters;
