// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two halves of a render's configuration: what the fractal *is*
//! (its function and constant) and how it is drawn (iteration cap,
//! threshold, window, resolution, colors).

use num::Complex;

use colors::ColorScheme;
use errors::RenderError;
use functions::ChaoticFunction;
use planes::{PixelRect, PlaneMapper, Point, Rectangle};

/// The mathematical identity of a fractal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// The map iterated at every pixel.
    pub function: ChaoticFunction,
    /// The constant fed into the map on every step.
    pub start: Complex<f64>,
}

impl FractalParams {
    /// The "reverse overgrowth" fractal: test0 with 0.8+0.6i.
    pub fn sample() -> FractalParams {
        FractalParams {
            function: ChaoticFunction::Test0,
            start: Complex::new(0.8, 0.6),
        }
    }
}

/// Everything about the drawing that is independent of the math.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderingParams {
    /// Iteration cap; also the number of histogram buckets.
    pub max_iterations: usize,
    /// Magnitude at which an iterate counts as escaped.
    pub escape_threshold: f64,
    /// The part of the complex plane being drawn.
    pub viewing_window: Rectangle,
    /// The pixel grid it is drawn onto.
    pub display_quality: PixelRect,
    /// How normalized escape values become colors.
    pub color_scheme: ColorScheme,
}

/// Center of the sample window.
pub const SAMPLE_CENTER: (f64, f64) = (-0.8, 0.425);
/// Zoom of the sample window.
pub const SAMPLE_ZOOM: f64 = 7.25;
/// Width and height of the sample image.
pub const SAMPLE_SIZE: (usize, usize) = (1080, 1920);
/// Default iteration cap.
pub const SAMPLE_ITERATIONS: usize = 100;
/// Default escape threshold.
pub const SAMPLE_THRESHOLD: f64 = 2.0;

impl RenderingParams {
    /// A window of `width`×`height` pixels around `center`.  At zoom 1
    /// each pixel is 0.002 units wide, so the window keeps
    /// the grid's aspect ratio.
    pub fn zoomed(center: Point, zoom: f64, width: usize, height: usize) -> RenderingParams {
        RenderingParams {
            max_iterations: SAMPLE_ITERATIONS,
            escape_threshold: SAMPLE_THRESHOLD,
            viewing_window: Rectangle::centered(
                center,
                width as f64 / 1000.0,
                height as f64 / 1000.0,
                zoom,
            ),
            display_quality: PixelRect::new(width, height),
            color_scheme: ColorScheme::BlackAndGreen,
        }
    }

    /// The sample configuration: 1080×1920 around (-0.8, 0.425) at zoom
    /// 7.25, 100 iterations, threshold 2.0, black and green.
    pub fn sample() -> RenderingParams {
        RenderingParams::zoomed(
            Point::new(SAMPLE_CENTER.0, SAMPLE_CENTER.1),
            SAMPLE_ZOOM,
            SAMPLE_SIZE.0,
            SAMPLE_SIZE.1,
        )
    }

    /// Checks the parameters and builds the pixel-to-plane mapping.
    pub fn mapper(&self) -> Result<PlaneMapper, RenderError> {
        if self.max_iterations == 0 {
            return Err(RenderError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.escape_threshold.is_finite() && self.escape_threshold > 0.0) {
            return Err(RenderError::InvalidParameter(format!(
                "escape_threshold must be a positive number, not {}",
                self.escape_threshold
            )));
        }
        PlaneMapper::new(self.display_quality, self.viewing_window)
    }

    /// Rough wall-clock estimate for a render, in seconds: a 1080×1920
    /// grid at 40 iterations took about 28 seconds.
    pub fn estimated_seconds(&self) -> f64 {
        let work = self.max_iterations as f64
            * self.display_quality.dx() as f64
            * self.display_quality.dy() as f64;
        work * 28.0 / (10.0 * 1080.0 * 1920.0 * 4.0)
    }
}
