// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaotic functions.  A chaotic function is any map from a pair
//! of complex numbers to a complex number; it is applied over and
//! over to the running value `a`, with the fractal's constant `b`
//! fed back in every time.  The Mandelbrot set is `a² + b`; the rest
//! are known to make good pictures.

use num::Complex;
use std::fmt;
use std::str::FromStr;

/// A chaotic function, chosen by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChaoticFunction {
    /// a² + b
    Mandelbrot,
    /// a · √cosh(a³) · b
    Test0,
    /// √sinh(a) + b
    Test1,
    /// a² · eᵃ + b
    Test2,
    /// a⁵ + b
    Test3,
    /// (a² + a) / ln(a) + b.  Undefined at a = 0 and a = 1.
    Test4,
}

const ALL: [ChaoticFunction; 6] = [
    ChaoticFunction::Mandelbrot,
    ChaoticFunction::Test0,
    ChaoticFunction::Test1,
    ChaoticFunction::Test2,
    ChaoticFunction::Test3,
    ChaoticFunction::Test4,
];

impl ChaoticFunction {
    /// Every implemented function, in declaration order.
    pub fn all() -> &'static [ChaoticFunction] {
        &ALL
    }

    /// The name the function goes by on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ChaoticFunction::Mandelbrot => "man",
            ChaoticFunction::Test0 => "test0",
            ChaoticFunction::Test1 => "test1",
            ChaoticFunction::Test2 => "test2",
            ChaoticFunction::Test3 => "test3",
            ChaoticFunction::Test4 => "test4",
        }
    }

    /// One step of the iteration.
    #[inline]
    pub fn apply(self, a: Complex<f64>, b: Complex<f64>) -> Complex<f64> {
        match self {
            ChaoticFunction::Mandelbrot => a * a + b,
            ChaoticFunction::Test0 => a * (a * a * a).cosh().sqrt() * b,
            ChaoticFunction::Test1 => a.sinh().sqrt() + b,
            ChaoticFunction::Test2 => a * a * a.exp() + b,
            ChaoticFunction::Test3 => a * a * a * a * a + b,
            ChaoticFunction::Test4 => (a * a + a) / a.ln() + b,
        }
    }
}

impl Default for ChaoticFunction {
    fn default() -> Self {
        ChaoticFunction::Mandelbrot
    }
}

impl fmt::Display for ChaoticFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChaoticFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .cloned()
            .find(|function| function.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ALL.iter().map(|function| function.name()).collect();
                format!(
                    "unknown function '{}', expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn mandelbrot_squares_and_adds() {
        let z = ChaoticFunction::Mandelbrot.apply(Complex::new(1.0, 1.0), Complex::new(0.5, 0.0));
        assert_eq!(z, Complex::new(0.5, 2.0));
    }

    #[test]
    fn quintic_matches_repeated_multiplication() {
        let a = Complex::new(0.3, -0.7);
        let b = Complex::new(0.1, 0.2);
        let expected = a.powf(5.0) + b;
        assert!(close(ChaoticFunction::Test3.apply(a, b), expected));
    }

    #[test]
    fn test0_vanishes_at_the_origin() {
        let z = ChaoticFunction::Test0.apply(Complex::new(0.0, 0.0), Complex::new(0.8, 0.6));
        assert!(close(z, Complex::new(0.0, 0.0)));
    }

    #[test]
    fn test1_at_the_origin_is_the_constant() {
        let b = Complex::new(0.25, -0.5);
        assert!(close(ChaoticFunction::Test1.apply(Complex::new(0.0, 0.0), b), b));
    }

    #[test]
    fn test2_on_the_real_line() {
        let z = ChaoticFunction::Test2.apply(Complex::new(1.0, 0.0), Complex::new(0.0, 0.0));
        assert!(close(z, Complex::new(std::f64::consts::E, 0.0)));
    }

    #[test]
    fn test4_is_not_finite_at_the_origin() {
        let z = ChaoticFunction::Test4.apply(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0));
        assert!(!z.re.is_finite() || !z.im.is_finite() || z.norm() == 0.0);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for function in ChaoticFunction::all() {
            let parsed: ChaoticFunction = function.to_string().parse().unwrap();
            assert_eq!(parsed, *function);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "julia".parse::<ChaoticFunction>().unwrap_err();
        assert!(err.contains("julia"));
        assert!(err.contains("test4"));
    }
}
