// Copyright 2025 Tablesplit Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parallel Slice Reduction
//!
//! Reducing one column of a slice only reads the shared source table and
//! yields an independent scalar, so the per-slice step of an aggregation can
//! run on Rayon's work-stealing pool.
//!
//! # Ordering
//!
//! Results are collected with an indexed parallel iterator, so the output
//! follows slice order exactly as the sequential path does.
//!
//! # Thresholds
//!
//! Parallelization has overhead, so it is only used for groupings with
//! [`DEFAULT_PARALLEL_SLICE_THRESHOLD`] or more slices.

use rayon::prelude::*;

use crate::core::Result;

/// Default minimum slice count for parallel reduction
pub const DEFAULT_PARALLEL_SLICE_THRESHOLD: usize = 1024;

/// Configuration for parallel execution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Whether parallel execution is enabled
    pub enabled: bool,
    /// Minimum slices to trigger parallel reduction
    pub min_slices_for_parallel: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_slices_for_parallel: DEFAULT_PARALLEL_SLICE_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with custom settings
    pub fn new(enabled: bool, min_slices_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_slices_for_parallel,
        }
    }

    /// Create a config with parallel execution disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check if parallel reduction should be used for the given slice count
    #[inline]
    pub fn should_parallelize(&self, slice_count: usize) -> bool {
        self.enabled && slice_count >= self.min_slices_for_parallel
    }
}

/// Map `f` over `items`, in parallel when `config` allows, keeping input order.
///
/// The first error in input order is returned; no partial output escapes.
pub fn ordered_map<T, R, F>(items: &[T], config: &ParallelConfig, f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    if !config.should_parallelize(items.len()) {
        return items.iter().map(f).collect();
    }
    items.par_iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert!(config.enabled);
        assert_eq!(config.min_slices_for_parallel, DEFAULT_PARALLEL_SLICE_THRESHOLD);
    }

    #[test]
    fn test_parallel_config_disabled() {
        let config = ParallelConfig::disabled();
        assert!(!config.enabled);
        assert!(!config.should_parallelize(1_000_000));
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::new(true, 10);
        assert!(!config.should_parallelize(9));
        assert!(config.should_parallelize(10));
    }

    #[test]
    fn test_ordered_map_keeps_order() {
        let items: Vec<usize> = (0..5000).collect();
        let config = ParallelConfig::new(true, 1);
        let out = ordered_map(&items, &config, |i| Ok(i * 2)).unwrap();
        assert_eq!(out.len(), 5000);
        assert!(out.iter().enumerate().all(|(i, v)| *v == i * 2));

        let sequential = ordered_map(&items, &ParallelConfig::disabled(), |i| Ok(i * 2)).unwrap();
        assert_eq!(out, sequential);
    }

    #[test]
    fn test_ordered_map_propagates_errors() {
        let items: Vec<usize> = (0..2000).collect();
        let config = ParallelConfig::new(true, 1);
        let result = ordered_map(&items, &config, |i| {
            if *i == 1500 {
                Err(Error::invalid_argument("boom"))
            } else {
                Ok(*i)
            }
        });
        assert!(result.is_err());
    }
}
