// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate fractalgen;
extern crate num;
extern crate num_cpus;
extern crate tracing_subscriber;

use clap::{App, Arg, ArgMatches};
use fractalgen::planes::Point;
use fractalgen::{ChaoticFunction, ColorScheme, FractalParams, RenderingParams};
use num::Complex;
use std::fmt::Debug;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

// "a<sep>b", both halves parsing as T.
fn split_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let mut halves = s.splitn(2, separator);
    let first = halves.next()?.trim().parse().ok()?;
    let second = halves.next()?.trim().parse().ok()?;
    Some((first, second))
}

fn parse_point(s: &str) -> Option<Point> {
    split_pair(s, ',').map(|(x, y)| Point::new(x, y))
}

// The writer hands dimensions to the PNG encoder as u32.
fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (width, height) = split_pair::<usize>(s, 'x')
        .ok_or_else(|| "Could not parse output image size".to_string())?;
    let limit = u32::max_value() as usize;
    if width == 0 || height == 0 {
        Err("Image dimensions must be positive".to_string())
    } else if width > limit || height > limit {
        Err(format!("Image dimensions must be at most {} on a side", limit))
    } else {
        Ok((width, height))
    }
}

fn point_validator(what: &'static str) -> impl Fn(String) -> Result<(), String> {
    move |s| match parse_point(&s) {
        Some(_) => Ok(()),
        None => Err(format!("Could not parse {} as x,y", what)),
    }
}

fn bounded<T>(s: &str, low: T, high: T, what: &str) -> Result<(), String>
where
    T: FromStr + PartialOrd + Debug,
{
    let v: T = s
        .parse()
        .map_err(|_| format!("{} must be a number", what))?;
    if low <= v && v <= high {
        Ok(())
    } else {
        Err(format!("{} must be between {:?} and {:?}", what, low, high))
    }
}

fn parses_as<T: FromStr<Err = String>>(s: &str) -> Result<(), String> {
    s.parse::<T>().map(|_| ())
}

// Clap reads the traditional single-dash `-outfile` as `-o utfile`.
fn respell_outfile<I: IntoIterator<Item = String>>(argv: I) -> Vec<String> {
    argv.into_iter()
        .map(|arg| {
            if arg == "-outfile" || arg.starts_with("-outfile=") {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

const OUTFILE: &str = "outfile";
const FUNCTION: &str = "function";
const START: &str = "start";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const THRESHOLD: &str = "threshold";
const SCHEME: &str = "scheme";
const THREADS: &str = "threads";

fn args<'a, I: IntoIterator<Item = String>>(argv: I) -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fgen")
        .version("0.1.0")
        .about("Escape-time fractal generator")
        .arg(
            Arg::with_name(OUTFILE)
                .long(OUTFILE)
                .short("o")
                .takes_value(true)
                .default_value("fractal.png")
                .help("The file to save the image to, this should be a .png"),
        )
        .arg(
            Arg::with_name(FUNCTION)
                .long(FUNCTION)
                .short("f")
                .takes_value(true)
                .default_value("test0")
                .validator(|s| parses_as::<ChaoticFunction>(&s))
                .help("Chaotic function: man, test0, test1, test2, test3 or test4"),
        )
        .arg(
            Arg::with_name(START)
                .long(START)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.8,0.6")
                .validator(point_validator("start constant"))
                .help("Complex constant fed to the function, as re,im"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.8,0.425")
                .validator(point_validator("window center"))
                .help("Center of the viewing window, as x,y"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("7.25")
                .validator(|s| bounded(&s, 1e-9, 1e12, "Zoom"))
                .help("Zoom factor"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1080x1920")
                .validator(|s| parse_size(&s).map(|_| ()))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| bounded(&s, 1usize, 1_000_000, "Iteration count"))
                .help("Maximum number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(THRESHOLD)
                .long(THRESHOLD)
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| bounded(&s, 1e-9, 1e300, "Escape threshold"))
                .help("Magnitude past which a point has escaped"),
        )
        .arg(
            Arg::with_name(SCHEME)
                .long(SCHEME)
                .takes_value(true)
                .default_value("black-and-green")
                .validator(|s| parses_as::<ColorScheme>(&s))
                .help("Color scheme: black-and-green, cubed-green or ember"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| bounded(&s, 1, max_threads, "Thread count"))
                .help("Number of threads to use in the renderer [default: all cpus]"),
        )
        .get_matches_from(respell_outfile(argv))
}

// The validators have already run, so parsing here cannot fail.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        _ => unreachable!("{} was validated", name),
    }
}

fn params(matches: &ArgMatches) -> (FractalParams, RenderingParams) {
    let start = matches
        .value_of(START)
        .and_then(parse_point)
        .unwrap_or_else(|| unreachable!("start was validated"));
    let center = matches
        .value_of(CENTER)
        .and_then(parse_point)
        .unwrap_or_else(|| unreachable!("center was validated"));
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_size(s).ok())
        .unwrap_or_else(|| unreachable!("size was validated"));
    let zoom: f64 = value(matches, ZOOM);

    let fractal = FractalParams {
        function: value(matches, FUNCTION),
        start: Complex::new(start.x, start.y),
    };
    let mut rendering = RenderingParams::zoomed(center, zoom, width, height);
    rendering.max_iterations = value(matches, ITERATIONS);
    rendering.escape_threshold = value(matches, THRESHOLD);
    rendering.color_scheme = value(matches, SCHEME);
    (fractal, rendering)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = args(std::env::args());
    let (fractal, rendering) = params(&matches);
    let threads = match matches.value_of(THREADS) {
        Some(_) => value(&matches, THREADS),
        None => fractalgen::default_threads(),
    };
    let outfile = matches.value_of(OUTFILE).unwrap_or("fractal.png");

    if let Err(e) = fractalgen::create_fractal_image(&fractal, &rendering, threads, outfile) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn single_dash_outfile_is_respelled() {
        assert_eq!(
            respell_outfile(argv(&["fgen", "-outfile", "x.png", "-s", "8x8"])),
            argv(&["fgen", "--outfile", "x.png", "-s", "8x8"])
        );
        assert_eq!(
            respell_outfile(argv(&["fgen", "-outfile=x.png"])),
            argv(&["fgen", "--outfile=x.png"])
        );
        assert_eq!(
            respell_outfile(argv(&["fgen", "-o", "x.png", "--outfile", "y.png"])),
            argv(&["fgen", "-o", "x.png", "--outfile", "y.png"])
        );
    }

    #[test]
    fn single_dash_outfile_reaches_the_outfile_argument() {
        let matches = args(argv(&["fgen", "-outfile", "x.png", "-s", "8x8"]));
        assert_eq!(matches.value_of(OUTFILE), Some("x.png"));
    }

    #[test]
    fn points_parse_from_pairs() {
        assert_eq!(parse_point("-0.8,0.425"), Some(Point::new(-0.8, 0.425)));
        assert_eq!(parse_point("1, 2"), Some(Point::new(1.0, 2.0)));
        assert_eq!(parse_point("1"), None);
        assert_eq!(parse_point("1,x"), None);
    }

    #[test]
    fn sizes_fit_the_encoder() {
        assert_eq!(parse_size("1080x1920"), Ok((1080, 1920)));
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("10").is_err());
        let too_wide = format!("{}x2", u32::max_value() as u64 + 1);
        assert!(parse_size(&too_wide).is_err());
    }
}
