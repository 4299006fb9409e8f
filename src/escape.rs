// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time calculation for a single point.

use num::Complex;

use params::{FractalParams, RenderingParams};

/// Runs the chaotic function on a point of the plane and returns how
/// many iterations it took to escape.
///
/// The count starts at 1 and grows by one for every application of
/// the function, so a point that is already outside the threshold
/// returns 1, a point that escapes after the first application
/// returns 2, and a point that never escapes returns exactly
/// `max_iterations`.  The result is a 1-based count: subtract one
/// before using it as an index.
///
/// A NaN magnitude compares false against the threshold, so an
/// iterate that lands on a singularity stops the loop early.
#[inline]
pub fn escape_iterations(
    point: Complex<f64>,
    fractal: &FractalParams,
    rendering: &RenderingParams,
) -> usize {
    let mut a = point;
    let mut iterations = 1;
    while a.norm() < rendering.escape_threshold && iterations < rendering.max_iterations {
        a = fractal.function.apply(a, fractal.start);
        iterations += 1;
    }
    iterations
}
