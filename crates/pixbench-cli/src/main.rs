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

//! PixBench Command Line Interface

use clap::Parser;
use pixbench_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// PixBench - benchmark result analysis for pixel-art image processing
///
/// # Examples
///
/// ```bash
/// # Full report on the console
/// pixbench analyze benchmark_results.json
///
/// # Markdown report to a file
/// pixbench analyze benchmark_results.json --format markdown --output report.md
///
/// # Mean time per resolution and mode as CSV
/// pixbench group benchmark_results.json --by resolution,mode --format csv
///
/// # Debug logging
/// RUST_LOG=pixbench_core=debug pixbench summary benchmark_results.json
/// ```
#[derive(Parser)]
#[command(name = "pixbench")]
#[command(author, version, about = "PixBench - benchmark result analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("pixbench=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
