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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use crate::reporters::{ReportFormat, TableFormat};
use clap::Subcommand;
use pixbench_core::{Dimension, Mode};

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use pixbench_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Run every standard analysis and render the report
    ///
    /// Covers resolution scaling, color depth, pixel size, output scale,
    /// dithering, image complexity, complexity exponents, interaction
    /// matrices, and experiment coverage.
    Analyze {
        /// Benchmark results JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "console")]
        format: ReportFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Analysis configuration (YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Run analyses one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Print record counts and data-quality warnings
    Summary {
        /// Benchmark results JSON file
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Group records along one or more dimensions
    ///
    /// Dimensions: mode, resolution, colors, pixel_size, output_scale,
    /// dithering, image_name, experiment.
    Group {
        /// Benchmark results JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Key dimensions, comma-separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        by: Vec<Dimension>,

        /// Restrict to one mode
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Restrict to these experiment tags (repeatable)
        #[arg(short, long = "experiment", value_name = "TAG")]
        experiments: Vec<String>,

        /// Restrict to experiments containing this substring
        #[arg(long, value_name = "SUBSTR", conflicts_with = "experiments")]
        contains: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "console")]
        format: TableFormat,
    },

    /// Estimate the complexity exponent from per-resolution means
    Complexity {
        /// Benchmark results JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Mode to fit (both when omitted)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Restrict to these experiment tags (repeatable)
        #[arg(short, long = "experiment", value_name = "TAG")]
        experiments: Vec<String>,
    },

    /// Build an interaction matrix over two dimensions
    Matrix {
        /// Benchmark results JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Row dimension
        #[arg(long)]
        rows: Dimension,

        /// Column dimension
        #[arg(long)]
        columns: Dimension,

        /// Mode the records must have
        #[arg(short, long, default_value = "heavy")]
        mode: Mode,

        /// Restrict to these experiment tags (repeatable)
        #[arg(short, long = "experiment", value_name = "TAG")]
        experiments: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "console")]
        format: TableFormat,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if reading input, analysis setup, or writing output fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Analyze {
                file,
                format,
                output,
                config,
                sequential,
            } => commands::analyze(&file, format, output.as_deref(), config.as_deref(), sequential),
            Commands::Summary { file } => commands::summary(&file),
            Commands::Group {
                file,
                by,
                mode,
                experiments,
                contains,
                format,
            } => commands::group(&file, &by, mode, &experiments, contains.as_deref(), format),
            Commands::Complexity {
                file,
                mode,
                experiments,
            } => commands::complexity(&file, mode, &experiments),
            Commands::Matrix {
                file,
                rows,
                columns,
                mode,
                experiments,
                format,
            } => commands::matrix(&file, rows, columns, mode, &experiments, format),
        }
    }
}
