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

//! Analysis configuration.
//!
//! Selects which experiments feed each standard analysis and which
//! interaction matrices are built. Every field has a default, so partial
//! YAML or JSON documents deserialize cleanly. Omitted fields of a nested
//! comparison block keep that comparison's own defaults.

use crate::dimension::{Dimension, ExperimentFilter};
use crate::error::{AnalysisError, Result};
use crate::matrix::MatrixSpec;
use serde::{Deserialize, Serialize};

/// Default minimum number of keys both modes must share for a comparison
/// to be worth rendering.
pub const DEFAULT_MIN_SHARED_KEYS: usize = 2;

/// Minimum shared keys for categorical comparisons (dithering, images).
pub const CATEGORICAL_MIN_SHARED_KEYS: usize = 1;

fn default_min_shared_keys() -> usize {
    DEFAULT_MIN_SHARED_KEYS
}

/// Settings for one normal-vs-heavy comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Experiments feeding the comparison.
    #[serde(default)]
    pub experiments: ExperimentFilter,
    /// Keys both modes must share before renderers show the comparison.
    #[serde(default = "default_min_shared_keys")]
    pub min_shared_keys: usize,
}

impl ComparisonConfig {
    /// Creates a comparison over the given experiments.
    pub fn new(experiments: ExperimentFilter) -> Self {
        Self {
            experiments,
            min_shared_keys: DEFAULT_MIN_SHARED_KEYS,
        }
    }

    /// Sets the shared-key threshold.
    pub fn with_min_shared_keys(mut self, min_shared_keys: usize) -> Self {
        self.min_shared_keys = min_shared_keys;
        self
    }
}

/// Configuration for [`AnalysisSuite`](crate::AnalysisSuite).
///
/// # Example
///
/// ```
/// use pixbench_core::{AnalysisConfig, ExperimentFilter};
///
/// let config = AnalysisConfig::default()
///     .with_colors(ExperimentFilter::one_of(["color_depth_analysis"]))
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigDocument")]
pub struct AnalysisConfig {
    /// Resolution scaling comparison.
    pub resolution: ComparisonConfig,
    /// Color depth comparison.
    pub colors: ComparisonConfig,
    /// Pixel size comparison.
    pub pixel_size: ComparisonConfig,
    /// Output scale comparison.
    pub output_scale: ComparisonConfig,
    /// Dithering comparison.
    pub dithering: ComparisonConfig,
    /// Per-image comparison.
    pub images: ComparisonConfig,
    /// Experiments feeding the complexity fit.
    pub complexity: ExperimentFilter,
    /// Interaction matrices to build.
    pub matrices: Vec<MatrixSpec>,
    /// Run independent analyses on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            resolution: ComparisonConfig::new(ExperimentFilter::one_of([
                "resolution_scaling",
                "high_resolution_stress",
            ])),
            colors: ComparisonConfig::new(ExperimentFilter::contains("color")),
            pixel_size: ComparisonConfig::new(ExperimentFilter::contains("pixel_size")),
            output_scale: ComparisonConfig::new(ExperimentFilter::contains("scale")),
            dithering: ComparisonConfig::new(ExperimentFilter::contains("dithering"))
                .with_min_shared_keys(CATEGORICAL_MIN_SHARED_KEYS),
            images: ComparisonConfig::new(ExperimentFilter::contains("complexity"))
                .with_min_shared_keys(CATEGORICAL_MIN_SHARED_KEYS),
            complexity: ExperimentFilter::Any,
            matrices: vec![MatrixSpec::colors_by_resolution()],
            parallel: true,
        }
    }
}

/// Comparison block as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComparisonOverrides {
    experiments: Option<ExperimentFilter>,
    min_shared_keys: Option<usize>,
}

impl ComparisonOverrides {
    fn apply(self, base: &mut ComparisonConfig) {
        if let Some(experiments) = self.experiments {
            base.experiments = experiments;
        }
        if let Some(min_shared_keys) = self.min_shared_keys {
            base.min_shared_keys = min_shared_keys;
        }
    }
}

/// Config file layout; every field is optional and merged over
/// [`AnalysisConfig::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigDocument {
    resolution: ComparisonOverrides,
    colors: ComparisonOverrides,
    pixel_size: ComparisonOverrides,
    output_scale: ComparisonOverrides,
    dithering: ComparisonOverrides,
    images: ComparisonOverrides,
    complexity: Option<ExperimentFilter>,
    matrices: Option<Vec<MatrixSpec>>,
    parallel: Option<bool>,
}

impl From<ConfigDocument> for AnalysisConfig {
    fn from(doc: ConfigDocument) -> Self {
        let mut config = AnalysisConfig::default();
        doc.resolution.apply(&mut config.resolution);
        doc.colors.apply(&mut config.colors);
        doc.pixel_size.apply(&mut config.pixel_size);
        doc.output_scale.apply(&mut config.output_scale);
        doc.dithering.apply(&mut config.dithering);
        doc.images.apply(&mut config.images);
        if let Some(complexity) = doc.complexity {
            config.complexity = complexity;
        }
        if let Some(matrices) = doc.matrices {
            config.matrices = matrices;
        }
        if let Some(parallel) = doc.parallel {
            config.parallel = parallel;
        }
        config
    }
}

impl AnalysisConfig {
    /// Sets the resolution experiments.
    pub fn with_resolution(mut self, experiments: ExperimentFilter) -> Self {
        self.resolution.experiments = experiments;
        self
    }

    /// Sets the color depth experiments.
    pub fn with_colors(mut self, experiments: ExperimentFilter) -> Self {
        self.colors.experiments = experiments;
        self
    }

    /// Sets the pixel size experiments.
    pub fn with_pixel_size(mut self, experiments: ExperimentFilter) -> Self {
        self.pixel_size.experiments = experiments;
        self
    }

    /// Sets the output scale experiments.
    pub fn with_output_scale(mut self, experiments: ExperimentFilter) -> Self {
        self.output_scale.experiments = experiments;
        self
    }

    /// Sets the dithering experiments.
    pub fn with_dithering(mut self, experiments: ExperimentFilter) -> Self {
        self.dithering.experiments = experiments;
        self
    }

    /// Sets the per-image experiments.
    pub fn with_images(mut self, experiments: ExperimentFilter) -> Self {
        self.images.experiments = experiments;
        self
    }

    /// Sets the complexity fit experiments.
    pub fn with_complexity(mut self, experiments: ExperimentFilter) -> Self {
        self.complexity = experiments;
        self
    }

    /// Adds a matrix.
    pub fn with_matrix(mut self, spec: MatrixSpec) -> Self {
        self.matrices.push(spec);
        self
    }

    /// Replaces all matrices.
    pub fn with_matrices(mut self, specs: Vec<MatrixSpec>) -> Self {
        self.matrices = specs;
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Comparison settings paired with the dimension they group by.
    pub fn comparisons(&self) -> [(Dimension, &ComparisonConfig); 6] {
        [
            (Dimension::Resolution, &self.resolution),
            (Dimension::Colors, &self.colors),
            (Dimension::PixelSize, &self.pixel_size),
            (Dimension::OutputScale, &self.output_scale),
            (Dimension::Dithering, &self.dithering),
            (Dimension::ImageName, &self.images),
        ]
    }

    /// Checks the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] if a matrix uses the same
    /// dimension on both axes or a comparison requires zero shared keys.
    pub fn validate(&self) -> Result<()> {
        for (dimension, comparison) in self.comparisons() {
            if comparison.min_shared_keys == 0 {
                return Err(AnalysisError::invalid_config(
                    format!("{}.min_shared_keys", dimension),
                    "must be at least 1",
                ));
            }
        }
        for spec in &self.matrices {
            spec.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Mode;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert!(config.parallel);
        assert_eq!(config.resolution.min_shared_keys, 2);
        assert_eq!(config.dithering.min_shared_keys, 1);
        assert_eq!(config.images.min_shared_keys, 1);
        assert_eq!(config.matrices.len(), 1);
        assert!(config.resolution.experiments.matches("high_resolution_stress"));
        assert!(!config.resolution.experiments.matches("resolution_scaling_extra"));
        assert!(config.output_scale.experiments.matches("output_scale_test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::default()
            .with_colors(ExperimentFilter::Any)
            .with_matrices(Vec::new())
            .with_parallel(false);
        assert_eq!(config.colors.experiments, ExperimentFilter::Any);
        assert!(config.matrices.is_empty());
        assert!(!config.parallel);
    }

    #[test]
    fn test_validate_zero_shared_keys() {
        let mut config = AnalysisConfig::default();
        config.pixel_size.min_shared_keys = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pixel_size.min_shared_keys"));
    }

    #[test]
    fn test_validate_matrix_axes() {
        let config = AnalysisConfig::default().with_matrix(MatrixSpec::new(
            "same",
            Dimension::Resolution,
            Dimension::Resolution,
            Mode::Heavy,
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{"parallel": false, "colors": {"experiments": {"one_of": ["color_depth_analysis"]}}}"#,
        )
        .unwrap();
        assert!(!config.parallel);
        assert_eq!(config.colors.min_shared_keys, 2);
        assert!(config.colors.experiments.matches("color_depth_analysis"));
        assert!(!config.colors.experiments.matches("color_quantization"));
        assert_eq!(config.dithering.min_shared_keys, 1);
        assert_eq!(config.matrices.len(), 1);
    }

    #[test]
    fn test_partial_comparison_block_keeps_its_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"dithering": {"min_shared_keys": 3}}"#).unwrap();
        assert_eq!(config.dithering.min_shared_keys, 3);
        assert_eq!(config.dithering.experiments, ExperimentFilter::contains("dithering"));
        assert!(!config.dithering.experiments.matches("resolution_scaling"));

        let config: AnalysisConfig =
            serde_json::from_str(r#"{"images": {"experiments": {"contains": "image"}}}"#).unwrap();
        assert_eq!(config.images.experiments, ExperimentFilter::contains("image"));
        assert_eq!(config.images.min_shared_keys, CATEGORICAL_MIN_SHARED_KEYS);
    }

    #[test]
    fn test_serialized_config_reloads_unchanged() {
        let config = AnalysisConfig::default().with_parallel(false);
        let json = serde_json::to_string(&config).unwrap();
        let reloaded: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_yaml_matrix_spec() {
        let yaml = "matrices:\n  - name: pixel_by_colors\n    rows: pixel_size\n    columns: colors\n    mode: normal\n    experiments:\n      contains: color\n";
        let value: serde_json::Value = serde_yaml::from_str(yaml).unwrap();
        let config: AnalysisConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.matrices.len(), 1);
        assert_eq!(config.matrices[0].rows, Dimension::PixelSize);
        assert_eq!(config.matrices[0].mode, Mode::Normal);
        assert!(config.validate().is_ok());
    }
}
