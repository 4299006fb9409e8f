extern crate fractalgen;
extern crate num;

use fractalgen::escape::escape_iterations;
use fractalgen::grid::escape_grid;
use fractalgen::histogram::Histogram;
use fractalgen::planes::PixelRect;
use fractalgen::{render, ChaoticFunction, FractalParams, RenderingParams};
use num::Complex;

#[test]
fn mandelbrot_escape_counts() {
    let fractal = FractalParams {
        function: ChaoticFunction::Mandelbrot,
        start: Complex::new(0.0, 0.0),
    };
    let rendering = RenderingParams::sample();
    assert_eq!(
        escape_iterations(Complex::new(0.0, 0.0), &fractal, &rendering),
        rendering.max_iterations
    );
    assert_eq!(escape_iterations(Complex::new(2.0, 2.0), &fractal, &rendering), 1);
}

#[test]
fn sample_window_at_reduced_resolution() {
    let fractal = FractalParams::sample();
    let mut rendering = RenderingParams::sample();
    rendering.display_quality = PixelRect::new(108, 192);

    let buffer = escape_grid(&fractal, &rendering, 4).unwrap();
    let histogram = Histogram::from_buffer(&buffer, rendering.max_iterations).unwrap();
    assert_eq!(histogram.counts().iter().sum::<u64>(), 108 * 192);
    let cdf = histogram.cumulative();
    assert_eq!(cdf.bins()[rendering.max_iterations - 1], 1.0);

    let image = render(&fractal, &rendering, 4).unwrap();
    assert_eq!(image.dimensions(), (108, 192));
    assert!(image.pixels().all(|p| p[3] == 255));
}

#[test]
#[ignore]
fn sample_configuration_end_to_end() {
    let image = render(
        &FractalParams::sample(),
        &RenderingParams::sample(),
        fractalgen::default_threads(),
    )
    .unwrap();
    assert_eq!(image.dimensions(), (1080, 1920));
    assert!(image.pixels().all(|p| p[3] == 255));
}
