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

//! Summary statistics over bags of timing samples.

use serde::Serialize;

/// Statistical summary of one group's `algorithmTime_ms` samples.
///
/// An empty bag produces an all-zero summary with `count == 0`; use
/// [`AggregateStat::is_empty`] to tell "no data" apart from "all zeros".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStat {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (mean of the two middle values for even counts).
    pub median: f64,
    /// Sample standard deviation (Bessel-corrected, 0 for n <= 1).
    pub std: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

impl AggregateStat {
    /// Computes the summary of a sample bag.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        let std = if n > 1 {
            let sum_sq: f64 = sorted.iter().map(|x| (x - mean) * (x - mean)).sum();
            (sum_sq / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            count: n,
            // Floating-point summation can land a hair outside the sample range.
            mean: mean.clamp(sorted[0], sorted[n - 1]),
            median,
            std,
            min: sorted[0],
            max: sorted[n - 1],
        }
    }

    /// Returns whether the summary was computed from no samples.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean, or `None` when there were no samples.
    pub fn mean_if_present(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.mean)
    }

    /// Coefficient of variation (std / mean), 0 when the mean is 0.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std / self.mean
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_samples() {
        let stat = AggregateStat::from_samples(&[]);
        assert_eq!(stat, AggregateStat::default());
        assert!(stat.is_empty());
        assert_eq!(stat.mean_if_present(), None);
    }

    #[test]
    fn test_single_sample() {
        let stat = AggregateStat::from_samples(&[42.0]);
        assert_eq!(stat.count, 1);
        assert_eq!(stat.mean, 42.0);
        assert_eq!(stat.median, 42.0);
        assert_eq!(stat.std, 0.0);
        assert_eq!(stat.min, 42.0);
        assert_eq!(stat.max, 42.0);
    }

    #[test]
    fn test_odd_sample_count() {
        let stat = AggregateStat::from_samples(&[300.0, 100.0, 200.0]);
        assert_eq!(stat.count, 3);
        assert_eq!(stat.mean, 200.0);
        assert_eq!(stat.median, 200.0);
        assert_eq!(stat.min, 100.0);
        assert_eq!(stat.max, 300.0);
        // Bessel-corrected: sqrt((100^2 + 0 + 100^2) / 2) = 100
        assert!((stat.std - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_sample_count_median() {
        let stat = AggregateStat::from_samples(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stat.median, 2.5);
        assert_eq!(stat.mean, 2.5);
    }

    #[test]
    fn test_all_zero_samples_are_not_empty() {
        let stat = AggregateStat::from_samples(&[0.0, 0.0]);
        assert!(!stat.is_empty());
        assert_eq!(stat.mean_if_present(), Some(0.0));
        assert_eq!(stat.coefficient_of_variation(), 0.0);
    }
}
