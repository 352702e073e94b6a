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

//! Empirical complexity estimation.
//!
//! Fits `time ≈ C · pixels^k` by ordinary least squares on log-log axes. The
//! slope `k` is the complexity exponent: about 1.0 for linear-time
//! processing, about 2.0 for quadratic.

use crate::dimension::{
    group_stats, Dimension, DimensionValue, ExperimentFilter, GroupSpec, GroupedStats,
};
use crate::record::{MeasurementRecord, Mode};
use serde::Serialize;
use tracing::debug;

/// Result of a power-law fit between pixel count and mean time.
///
/// Every field except `points` is 0 when fewer than two qualifying points
/// exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComplexityEstimate {
    /// Fitted exponent `k`.
    pub exponent: f64,
    /// Natural log of the constant `C`.
    pub intercept: f64,
    /// Coefficient of determination in log space.
    pub r_squared: f64,
    /// Number of `(pixelCount, meanTime)` pairs used.
    pub points: usize,
}

impl ComplexityEstimate {
    /// Returns whether the fit had enough points to be meaningful.
    pub fn is_defined(&self) -> bool {
        self.points >= 2
    }
}

/// Straight-line least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Slope.
    pub slope: f64,
    /// Intercept.
    pub intercept: f64,
    /// Coefficient of determination (0 when y has no variance).
    pub r_squared: f64,
}

/// Fits `y = slope · x + intercept` by ordinary least squares.
///
/// Returns `None` for fewer than two points or when every x is equal.
pub fn fit_line(points: &[(f64, f64)]) -> Option<LineFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= f64::EPSILON * n {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy > 0.0 {
        (sxy * sxy / (sxx * syy)).min(1.0)
    } else {
        0.0
    };

    Some(LineFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Estimates the complexity exponent from statistics grouped by resolution.
///
/// Buckets with no samples or a non-positive mean are skipped, since their
/// logarithm is undefined. Keys that are not single integer values are
/// ignored.
pub fn estimate_complexity(by_resolution: &GroupedStats) -> ComplexityEstimate {
    let mut points = Vec::with_capacity(by_resolution.len());

    for row in &by_resolution.rows {
        let resolution = match row.key.values() {
            [DimensionValue::Integer(r)] => *r as f64,
            _ => continue,
        };
        if row.stat.is_empty() {
            continue;
        }
        if row.stat.mean <= 0.0 {
            debug!(
                resolution,
                mean = row.stat.mean,
                "Skipping non-positive mean in complexity fit"
            );
            continue;
        }
        let pixels = resolution * resolution;
        points.push((pixels.ln(), row.stat.mean.ln()));
    }

    match fit_line(&points) {
        Some(fit) => ComplexityEstimate {
            exponent: fit.slope,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
            points: points.len(),
        },
        None => {
            debug!(points = points.len(), "Not enough points for complexity fit");
            ComplexityEstimate {
                points: points.len(),
                ..ComplexityEstimate::default()
            }
        }
    }
}

/// Groups `records` by resolution for one mode and estimates the exponent.
pub fn estimate_complexity_for_mode(
    records: &[MeasurementRecord],
    mode: Mode,
    experiments: &ExperimentFilter,
) -> ComplexityEstimate {
    let spec = GroupSpec::by(&[Dimension::Resolution])
        .in_mode(mode)
        .with_experiments(experiments.clone());
    estimate_complexity(&group_stats(records, &spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_with_exponent(k: f64, c: f64, mode: Mode) -> Vec<MeasurementRecord> {
        [256u32, 512, 1024, 2048, 4096]
            .iter()
            .map(|&r| {
                let pixels = f64::from(r) * f64::from(r);
                MeasurementRecord::new("resolution_scaling", mode, c * pixels.powf(k))
                    .with_resolution(r)
            })
            .collect()
    }

    #[test]
    fn test_fit_line_exact() {
        let fit = fit_line(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_line_degenerate() {
        assert!(fit_line(&[]).is_none());
        assert!(fit_line(&[(1.0, 1.0)]).is_none());
        assert!(fit_line(&[(2.0, 1.0), (2.0, 5.0)]).is_none());
    }

    #[test]
    fn test_recovers_linear_exponent() {
        let records = records_with_exponent(1.0, 0.002, Mode::Normal);
        let estimate = estimate_complexity_for_mode(&records, Mode::Normal, &ExperimentFilter::Any);
        assert!((estimate.exponent - 1.0).abs() < 1e-9);
        assert_eq!(estimate.points, 5);
        assert!(estimate.is_defined());
    }

    #[test]
    fn test_recovers_superlinear_exponent() {
        let records = records_with_exponent(1.3, 5.0, Mode::Heavy);
        let estimate = estimate_complexity_for_mode(&records, Mode::Heavy, &ExperimentFilter::Any);
        assert!((estimate.exponent - 1.3).abs() < 1e-9);
        assert!((estimate.intercept - 5.0f64.ln()).abs() < 1e-6);
    }

    #[test]
    fn test_single_resolution_is_degenerate() {
        let records = vec![
            MeasurementRecord::new("e", Mode::Normal, 10.0).with_resolution(1024),
            MeasurementRecord::new("e", Mode::Normal, 12.0).with_resolution(1024),
        ];
        let estimate = estimate_complexity_for_mode(&records, Mode::Normal, &ExperimentFilter::Any);
        assert_eq!(estimate.exponent, 0.0);
        assert_eq!(estimate.points, 1);
        assert!(!estimate.is_defined());
    }

    #[test]
    fn test_other_mode_is_ignored() {
        let records = records_with_exponent(1.0, 1.0, Mode::Heavy);
        let estimate = estimate_complexity_for_mode(&records, Mode::Normal, &ExperimentFilter::Any);
        assert_eq!(estimate, ComplexityEstimate::default());
    }

    #[test]
    fn test_zero_mean_is_skipped() {
        let records = vec![
            MeasurementRecord::new("e", Mode::Normal, 0.0).with_resolution(256),
            MeasurementRecord::new("e", Mode::Normal, 10.0).with_resolution(512),
            MeasurementRecord::new("e", Mode::Normal, 40.0).with_resolution(1024),
        ];
        let estimate = estimate_complexity_for_mode(&records, Mode::Normal, &ExperimentFilter::Any);
        assert_eq!(estimate.points, 2);
        assert!((estimate.exponent - 1.0).abs() < 1e-9);
    }
}
