#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal generator
//!
//! An escape-time fractal takes every point of a window on the
//! complex plane, feeds it through a chaotic function over and over,
//! and counts how many steps it takes for the result to run off past
//! some threshold.  The count is the pixel's color.  The Mandelbrot
//! set is the famous one, `a² + b`, but any function from two complex
//! numbers to one will do, and several are provided.
//!
//! Raw counts make for muddy pictures, because almost everything
//! escapes in the first handful of steps.  So the counts are run
//! through a histogram first, and each pixel is colored by the
//! fraction of the image that escaped no later than it did.
//!
//! The pipeline is: parameters, then [`grid::escape_grid`], then
//! [`histogram::Histogram`], then [`writer::colorize`] with a
//! [`colors::ColorScheme`], then [`writer::write_png`].

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;
#[macro_use]
extern crate tracing;

#[cfg(test)]
extern crate tempfile;

pub mod colors;
pub mod errors;
pub mod escape;
pub mod functions;
pub mod grid;
pub mod histogram;
pub mod params;
pub mod planes;
pub mod writer;

pub use colors::ColorScheme;
pub use errors::RenderError;
pub use functions::ChaoticFunction;
pub use params::{FractalParams, RenderingParams};

use image::RgbaImage;
use std::path::Path;

use grid::escape_grid;
use histogram::Histogram;
use writer::{colorize, write_png};

/// The number of worker threads to use when the caller has no
/// opinion: one per logical CPU.
pub fn default_threads() -> usize {
    num_cpus::get()
}

/// Renders the fractal into an RGBA bitmap.
pub fn render(
    fractal: &FractalParams,
    rendering: &RenderingParams,
    threads: usize,
) -> Result<RgbaImage, RenderError> {
    info!(
        function = %fractal.function,
        width = rendering.display_quality.dx(),
        height = rendering.display_quality.dy(),
        max_iterations = rendering.max_iterations,
        estimated_seconds = rendering.estimated_seconds(),
        "rendering fractal"
    );
    let buffer = escape_grid(fractal, rendering, threads)?;
    let histogram = Histogram::from_buffer(&buffer, rendering.max_iterations)?;
    let cdf = histogram.cumulative();
    debug!(total = histogram.total(), "built escape histogram");
    info!(
        escaped = cdf.escaped_fraction(),
        "fraction of pixels that escaped before the cap"
    );
    colorize(&buffer, &cdf, rendering.color_scheme)
}

/// Creates a fractal image and writes it to a PNG file.
pub fn create_fractal_image<P: AsRef<Path>>(
    fractal: &FractalParams,
    rendering: &RenderingParams,
    threads: usize,
    path: P,
) -> Result<(), RenderError> {
    let image = render(fractal, rendering, threads)?;
    write_png(path.as_ref(), &image)?;
    info!(path = %path.as_ref().display(), "fractal written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid::escape_grid;
    use histogram::Histogram;
    use planes::{PixelRect, Point, Rectangle};
    use tempfile::tempdir;

    fn small() -> RenderingParams {
        let mut rendering = RenderingParams::sample();
        rendering.display_quality = PixelRect::new(54, 96);
        rendering
    }

    #[test]
    fn renders_are_deterministic() {
        let fractal = FractalParams::sample();
        let first = render(&fractal, &small(), 3).unwrap();
        let second = render(&fractal, &small(), 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mandelbrot_renders_black_at_the_origin() {
        let fractal = FractalParams {
            function: ChaoticFunction::Mandelbrot,
            start: num::Complex::new(0.0, 0.0),
        };
        let mut rendering = RenderingParams::sample();
        rendering.display_quality = PixelRect::new(4, 4);
        rendering.viewing_window = Rectangle::new(Point::new(0.0, 0.0), Point::new(0.1, 0.1));
        let image = render(&fractal, &rendering, 2).unwrap();
        // Pixel (0, 0) of the grid maps to the origin and is the
        // bottom-left corner of the image.
        assert_eq!(*image.get_pixel(0, 3), image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn a_window_inside_the_set_escapes_nowhere() {
        let fractal = FractalParams {
            function: ChaoticFunction::Mandelbrot,
            start: num::Complex::new(0.0, 0.0),
        };
        let mut rendering = RenderingParams::sample();
        rendering.display_quality = PixelRect::new(4, 4);
        rendering.viewing_window = Rectangle::new(Point::new(0.0, 0.0), Point::new(0.1, 0.1));
        let buffer = escape_grid(&fractal, &rendering, 2).unwrap();
        let cdf = Histogram::from_buffer(&buffer, rendering.max_iterations)
            .unwrap()
            .cumulative();
        assert_eq!(cdf.escaped_fraction(), 0.0);
    }

    #[test]
    fn writes_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fractal.png");
        create_fractal_image(&FractalParams::sample(), &small(), 2, &path).unwrap();
        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read.dimensions(), (54, 96));
    }

    #[test]
    fn write_failures_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("fractal.png");
        let result = create_fractal_image(&FractalParams::sample(), &small(), 2, &path);
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
