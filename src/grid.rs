// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Evaluates every pixel of the grid.  The multi-threaded version
//! hands rows of pixels out of a shared queue to a fixed number of
//! workers; each row is a disjoint slice of the buffer, so the only
//! synchronization is the queue itself and the join at the end of
//! the scope.

use itertools::iproduct;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};

use errors::RenderError;
use escape::escape_iterations;
use params::{FractalParams, RenderingParams};
use planes::{Pixel, PlaneMapper};

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, usize>>>>;

/// The escape count of every pixel, stored row by row with row 0 at
/// the bottom of the viewing window.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeBuffer {
    width: usize,
    height: usize,
    cells: Vec<usize>,
}

impl EscapeBuffer {
    // Callers size it from a grid `PlaneMapper::new` accepted, so the
    // product cannot overflow.
    fn zeroed(width: usize, height: usize) -> EscapeBuffer {
        EscapeBuffer {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Width of the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The escape count at a pixel.  Panics if the pixel is off the grid.
    pub fn get(&self, pixel: &Pixel) -> usize {
        assert!(pixel.0 < self.width && pixel.1 < self.height);
        self.cells[pixel.1 * self.width + pixel.0]
    }

    /// Every escape count, row by row.
    pub fn values(&self) -> &[usize] {
        &self.cells
    }

    /// Iterates over the rows, bottom row first.
    pub fn rows(&self) -> ::std::slice::Chunks<usize> {
        self.cells.chunks(self.width.max(1))
    }
}

fn fill_row(
    row: &mut [usize],
    py: usize,
    mapper: &PlaneMapper,
    fractal: &FractalParams,
    rendering: &RenderingParams,
) {
    for (px, cell) in row.iter_mut().enumerate() {
        *cell = escape_iterations(mapper.pixel_to_point(&Pixel(px, py)), fractal, rendering);
    }
}

/// The single-threaded evaluator.
pub fn escape_grid_single(
    fractal: &FractalParams,
    rendering: &RenderingParams,
) -> Result<EscapeBuffer, RenderError> {
    let mapper = rendering.mapper()?;
    let (width, height) = (mapper.grid.dx(), mapper.grid.dy());
    let mut buffer = EscapeBuffer::zeroed(width, height);
    for (py, px) in iproduct!(0..height, 0..width) {
        let point = mapper.pixel_to_point(&Pixel(px, py));
        buffer.cells[py * width + px] = escape_iterations(point, fractal, rendering);
    }
    Ok(buffer)
}

/// A multi-threaded version of the evaluator that takes a thread
/// count.  Workers pull rows from the queue until it runs dry; the
/// crossbeam scope is the barrier that waits for all of them.
pub fn escape_grid(
    fractal: &FractalParams,
    rendering: &RenderingParams,
    threads: usize,
) -> Result<EscapeBuffer, RenderError> {
    if threads == 0 {
        return Err(RenderError::NoThreads);
    }
    let mapper = rendering.mapper()?;
    let (width, height) = (mapper.grid.dx(), mapper.grid.dy());
    debug!(width, height, threads, "evaluating escape grid");

    let mut buffer = EscapeBuffer::zeroed(width, height);
    {
        let rows: RowQueue = Arc::new(Mutex::new(buffer.cells.chunks_mut(width).enumerate()));
        let (fractal, rendering) = (*fractal, *rendering);
        crossbeam::scope(|spawner| {
            for _ in 0..threads {
                let rows = rows.clone();
                spawner.spawn(move |_| loop {
                    let next = { rows.lock().ok().and_then(|mut queue| queue.next()) };
                    match next {
                        Some((py, row)) => fill_row(row, py, &mapper, &fractal, &rendering),
                        None => {
                            break;
                        }
                    }
                });
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)?;
    }

    debug_assert!(buffer.cells.iter().all(|&count| count > 0));
    Ok(buffer)
}
