// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between reading the parameters and
//! closing the output file.

use image::ImageError;
use std::io;

/// The failures a render can report.  Numeric trouble inside the
/// chaotic functions is not in here: a NaN or an infinity simply
/// stops the iteration for that pixel.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The output file could not be created or written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Io {
        /// Where we tried to write.
        path: String,
        /// What the operating system said about it.
        #[cause]
        cause: io::Error,
    },

    /// The PNG encoder refused the image.
    #[fail(display = "could not encode {}: {}", path, cause)]
    Encode {
        /// Where the image was going.
        path: String,
        /// The encoder's complaint.
        #[cause]
        cause: ImageError,
    },

    /// The pixel grid has no pixels in it.
    #[fail(display = "the display grid is empty")]
    EmptyGrid,

    /// The viewing window cannot be mapped onto a grid.
    #[fail(display = "invalid viewing window: {}", _0)]
    InvalidWindow(String),

    /// A rendering or fractal parameter is out of range.
    #[fail(display = "invalid parameter: {}", _0)]
    InvalidParameter(String),

    /// An escape buffer held a value that cannot index the histogram.
    #[fail(
        display = "escape value {} is outside 1..={}",
        value, max_iterations
    )]
    EscapeOutOfRange {
        /// The offending escape count.
        value: usize,
        /// The iteration cap the histogram was built for.
        max_iterations: usize,
    },

    /// The worker pool was asked to run with no workers.
    #[fail(display = "at least one worker thread is required")]
    NoThreads,

    /// A worker thread died before the join.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

impl RenderError {
    pub(crate) fn io<P: AsRef<str>>(path: P, cause: io::Error) -> Self {
        RenderError::Io {
            path: path.as_ref().to_string(),
            cause,
        }
    }
}
