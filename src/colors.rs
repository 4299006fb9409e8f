// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color schemes turn a normalized escape value in [0, 1] into a
//! pixel.  1.0 means "never escaped" and is always opaque black.

use image::Rgba;
use std::fmt;
use std::str::FromStr;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// The available color schemes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Bright green fading to black as the value rises.
    BlackAndGreen,
    /// BlackAndGreen over the cube of the value, which keeps most of
    /// the image bright.
    CubedGreen,
    /// Dark red rising to orange.
    Ember,
}

const ALL: [ColorScheme; 3] = [
    ColorScheme::BlackAndGreen,
    ColorScheme::CubedGreen,
    ColorScheme::Ember,
];

// Truncates; anything out of range saturates.
fn byte(v: f64) -> u8 {
    v as u8
}

fn green(val: f64) -> Rgba<u8> {
    let shade = byte(val.sqrt() * 255.0);
    Rgba([0, 255 - shade, 255 / 2 - shade / 2, 255])
}

impl ColorScheme {
    /// Every scheme, in declaration order.
    pub fn all() -> &'static [ColorScheme] {
        &ALL
    }

    /// The name the scheme goes by on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::BlackAndGreen => "black-and-green",
            ColorScheme::CubedGreen => "cubed-green",
            ColorScheme::Ember => "ember",
        }
    }

    /// The color of a normalized escape value.
    pub fn apply(self, val: f64) -> Rgba<u8> {
        if val == 1.0 {
            return BLACK;
        }
        match self {
            ColorScheme::BlackAndGreen => green(val),
            ColorScheme::CubedGreen => green(val * val * val),
            ColorScheme::Ember => Rgba([
                byte(val.powf(1.5) * 255.0),
                byte(val.powi(3) * 200.0),
                0,
                255,
            ]),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::BlackAndGreen
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .cloned()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ALL.iter().map(|scheme| scheme.name()).collect();
                format!(
                    "unknown color scheme '{}', expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}
