// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns normalized escape values into an RGBA bitmap and writes it
//! out as a PNG.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use itertools::iproduct;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use colors::ColorScheme;
use errors::RenderError;
use grid::EscapeBuffer;
use histogram::Cdf;
use planes::Pixel;

fn dimension(n: usize) -> Result<u32, RenderError> {
    u32::try_from(n).map_err(|_| {
        RenderError::InvalidParameter(format!("{} pixels is too large for an image", n))
    })
}

/// Colors every pixel of the buffer.  The buffer counts rows upward
/// from the bottom of the viewing window while images count them
/// downward from the top, so grid row `py` lands on image row
/// `height - py - 1`.
pub fn colorize(
    buffer: &EscapeBuffer,
    cdf: &Cdf,
    scheme: ColorScheme,
) -> Result<RgbaImage, RenderError> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut image = RgbaImage::new(dimension(width)?, dimension(height)?);
    for (py, px) in iproduct!(0..height, 0..width) {
        let val = cdf.lookup(buffer.get(&Pixel(px, py)))?;
        image.put_pixel(px as u32, (height - py - 1) as u32, scheme.apply(val));
    }
    Ok(image)
}

/// Writes the image to `path` as a PNG.  Failing to create the file
/// is an error, not a message.
pub fn write_png<P: AsRef<Path>>(path: P, image: &RgbaImage) -> Result<(), RenderError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let output = File::create(path).map_err(|e| RenderError::io(&name, e))?;
    let mut output = BufWriter::new(output);
    PngEncoder::new(&mut output)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(|cause| RenderError::Encode {
            path: name.clone(),
            cause,
        })?;
    output.flush().map_err(|e| RenderError::io(&name, e))?;
    debug!(path = %name, "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid::escape_grid;
    use histogram::Histogram;
    use image::Rgba;
    use params::{FractalParams, RenderingParams};
    use planes::PixelRect;
    use tempfile::tempdir;

    fn rendered(width: usize, height: usize) -> (EscapeBuffer, Cdf) {
        let mut rendering = RenderingParams::sample();
        rendering.display_quality = PixelRect::new(width, height);
        rendering.max_iterations = 30;
        let buffer = escape_grid(&FractalParams::sample(), &rendering, 2).unwrap();
        let cdf = Histogram::from_buffer(&buffer, 30).unwrap().cumulative();
        (buffer, cdf)
    }

    #[test]
    fn image_has_the_grid_size() {
        let (buffer, cdf) = rendered(12, 7);
        let image = colorize(&buffer, &cdf, ColorScheme::BlackAndGreen).unwrap();
        assert_eq!(image.dimensions(), (12, 7));
    }

    #[test]
    fn rows_are_flipped() {
        let (buffer, cdf) = rendered(9, 6);
        let scheme = ColorScheme::BlackAndGreen;
        let image = colorize(&buffer, &cdf, scheme).unwrap();
        for py in 0..6 {
            for px in 0..9 {
                let expected = scheme.apply(cdf.lookup(buffer.get(&Pixel(px, py))).unwrap());
                assert_eq!(*image.get_pixel(px as u32, (5 - py) as u32), expected);
            }
        }
    }

    #[test]
    fn every_pixel_is_opaque() {
        let (buffer, cdf) = rendered(16, 16);
        let image = colorize(&buffer, &cdf, ColorScheme::BlackAndGreen).unwrap();
        assert!(image.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn png_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let (buffer, cdf) = rendered(10, 4);
        let image = colorize(&buffer, &cdf, ColorScheme::Ember).unwrap();
        write_png(&path, &image).unwrap();
        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read, image);
    }

    #[test]
    fn unwritable_paths_are_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        match write_png(&path, &image) {
            Err(RenderError::Io { path: failed, .. }) => assert!(failed.ends_with("out.png")),
            other => panic!("expected an io error, got {:?}", other),
        }
    }
}
