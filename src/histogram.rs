// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Histogram equalization.  Raw escape counts bunch up at the low
//! end, so instead of coloring by count we color by the fraction of
//! the image that escaped at or before that count.

use errors::RenderError;
use grid::EscapeBuffer;

/// How many pixels escaped at each iteration count.  Bucket `v`
/// holds the pixels whose escape count is `v + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Buckets every cell of the buffer.  Fails on a count outside
    /// `1..=max_iterations`.
    pub fn from_buffer(
        buffer: &EscapeBuffer,
        max_iterations: usize,
    ) -> Result<Histogram, RenderError> {
        let mut counts = vec![0u64; max_iterations];
        for &value in buffer.values() {
            if value == 0 || value > max_iterations {
                return Err(RenderError::EscapeOutOfRange {
                    value,
                    max_iterations,
                });
            }
            counts[value - 1] += 1;
        }
        Ok(Histogram {
            counts,
            total: buffer.len() as u64,
        })
    }

    /// The bucket counts.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// The number of pixels bucketed.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The cumulative distribution of the escape counts.  The last
    /// bucket is the pixels that never escaped; it is pinned to 1.0 so
    /// they always land at the top of the color range.
    pub fn cumulative(&self) -> Cdf {
        let mut bins = vec![0.0; self.counts.len()];
        if let Some((last, rest)) = bins.split_last_mut() {
            if self.total > 0 {
                let total = self.total as f64;
                let mut running_total = 0u64;
                for (bin, &count) in rest.iter_mut().zip(&self.counts) {
                    running_total += count;
                    *bin = running_total as f64 / total;
                }
            }
            *last = 1.0;
        }
        Cdf { bins }
    }
}

/// The normalized value for every escape count: the fraction of the
/// image that escaped at or before it.
#[derive(Clone, Debug, PartialEq)]
pub struct Cdf {
    bins: Vec<f64>,
}

impl Cdf {
    /// The bins, indexed by escape count minus one.
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// The normalized value of a 1-based escape count.
    pub fn lookup(&self, escape: usize) -> Result<f64, RenderError> {
        if escape == 0 || escape > self.bins.len() {
            return Err(RenderError::EscapeOutOfRange {
                value: escape,
                max_iterations: self.bins.len(),
            });
        }
        Ok(self.bins[escape - 1])
    }

    /// The fraction of the image that escaped before the iteration
    /// cap: the bin below the pinned one.
    pub fn escaped_fraction(&self) -> f64 {
        match self.bins.len() {
            0 | 1 => 0.0,
            n => self.bins[n - 2],
        }
    }
}
