// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! (the pixel grid), and a rectangle on the real plane (the viewing
//! window) with an arbitrary pair of corners.
use num::Complex;
use std::mem;

use errors::RenderError;

/// An x, y coordinate on the real plane.  The real part of a complex
/// number is the x-component, the imaginary part is the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// Horizontal (real) component.
    pub x: f64,
    /// Vertical (imaginary) component.
    pub y: f64,
}

impl Point {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

/// An axis-aligned rectangle on the real plane, described by its
/// minimum and maximum corners.  Used for the viewing window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rectangle {
    /// Left-lower corner.
    pub min: Point,
    /// Right-upper corner.
    pub max: Point,
}

impl Rectangle {
    /// Constructor.
    pub fn new(min: Point, max: Point) -> Rectangle {
        Rectangle { min, max }
    }

    /// A window around `center`, reaching `half_width / zoom` to either
    /// side and `half_height / zoom` above and below.
    pub fn centered(center: Point, half_width: f64, half_height: f64, zoom: f64) -> Rectangle {
        Rectangle {
            min: Point::new(center.x - half_width / zoom, center.y - half_height / zoom),
            max: Point::new(center.x + half_width / zoom, center.y + half_height / zoom),
        }
    }

    /// Width of the rectangle.
    pub fn dx(&self) -> f64 {
        (self.min.x - self.max.x).abs()
    }

    /// Height of the rectangle.
    pub fn dy(&self) -> f64 {
        (self.min.y - self.max.y).abs()
    }
}

/// Describes the x, y of a pixel on the grid.  (x, y) with y counting
/// upward, the way the complex plane does; the writer flips it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.  All values are non-negative integers, so the
/// left-lower corner is not stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelRect {
    width: usize,
    height: usize,
}

impl PixelRect {
    /// A grid `width` pixels across and `height` pixels tall.
    pub fn new(width: usize, height: usize) -> PixelRect {
        PixelRect { width, height }
    }

    /// Width of the grid, in pixels.
    pub fn dx(&self) -> usize {
        self.width
    }

    /// Height of the grid, in pixels.
    pub fn dy(&self) -> usize {
        self.height
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.  Saturates at `usize::MAX`; a grid that
    /// large is refused by `PlaneMapper::new`.
    pub fn len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Bytes needed to hold one `usize` per pixel, if that fits in
    /// an allocation at all.
    fn buffer_bytes(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|cells| cells.checked_mul(mem::size_of::<usize>()))
            .filter(|&bytes| bytes <= isize::max_value() as usize)
    }

    /// Describes that the integral plane has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Maps pixels of the grid onto points of the viewing window.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The pixel grid.
    pub grid: PixelRect,
    /// The viewing window.
    pub window: Rectangle,
    // The size of one pixel on the real plane, horizontally and
    // vertically.
    steps: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the grid and the window it should cover;
    /// fails if either one has no area or the window is turned around.
    pub fn new(grid: PixelRect, window: Rectangle) -> Result<PlaneMapper, RenderError> {
        if grid.is_empty() {
            return Err(RenderError::EmptyGrid);
        }

        if grid.buffer_bytes().is_none() {
            return Err(RenderError::InvalidParameter(format!(
                "a {}x{} grid is too large to allocate",
                grid.dx(),
                grid.dy()
            )));
        }

        let corners = [window.min.x, window.min.y, window.max.x, window.max.y];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(RenderError::InvalidWindow(
                "the window corners must be finite".to_string(),
            ));
        }

        if window.max.x <= window.min.x {
            return Err(RenderError::InvalidWindow(
                "the left lower corner is not to the left of the right upper corner".to_string(),
            ));
        }

        if window.max.y <= window.min.y {
            return Err(RenderError::InvalidWindow(
                "the left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        let steps = (
            window.dx() / (grid.dx() as f64),
            window.dy() / (grid.dy() as f64),
        );

        Ok(PlaneMapper {
            grid,
            window,
            steps,
        })
    }

    /// Given a pixel on the integral plane, return the complex number
    /// at the equivalent location in the viewing window.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            (pixel.0 as f64) * self.steps.0 + self.window.min.x,
            (pixel.1 as f64) * self.steps.1 + self.window.min.y,
        )
    }
}
