//! Color ramp interpolation
//!
//! Piecewise-linear color ramps over `t ∈ [0, 1]` built from evenly spaced
//! hex RGB stops. Used for tile fills and for every stop of the corner
//! gradient overlays.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors associated with color parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// 8-bit RGB color, rendered as `#rrggbb`
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb` or the `#rgb` shorthand
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_owned());
        let digits = hex.trim().trim_start_matches('#');

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }

    #[inline]
    fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Sample a list of evenly spaced color stops at `t`.
///
/// An empty list yields opaque black and a single stop yields that stop for
/// every `t`. `t` is clamped to `[0, 1]`; NaN reads as 0.
pub fn interpolate(t: f64, colors: &[Rgb]) -> Rgb {
    match colors {
        [] => Rgb::BLACK,
        [only] => *only,
        _ => {
            let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
            let segments = colors.len() - 1;
            let scaled = t * segments as f64;
            // The last stop is never a left endpoint.
            let index = (scaled.floor() as usize).min(segments - 1);
            let weight = scaled - index as f64;

            let from = colors[index].channels();
            let to = colors[index + 1].channels();
            let lerp = |i: usize| {
                let a = f64::from(from[i]);
                let b = f64::from(to[i]);
                (a + (b - a) * weight).round().clamp(0.0, 255.0) as u8
            };

            Rgb::new(lerp(0), lerp(1), lerp(2))
        }
    }
}

/// Ordered color stops defining a ramp
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    pub fn new(stops: Vec<Rgb>) -> Self {
        Self { stops }
    }

    /// Parse every stop from a hex string
    pub fn from_hex<S: AsRef<str>>(stops: &[S]) -> Result<Self, ColorError> {
        stops
            .iter()
            .map(|s| Rgb::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    #[inline]
    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn sample(&self, t: f64) -> Rgb {
        interpolate(t, &self.stops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Vec<Rgb> {
        vec![
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 0),
            Rgb::new(255, 0, 0),
        ]
    }

    #[test]
    fn test_endpoints_return_first_and_last_stop() {
        let colors = ramp();
        assert_eq!(interpolate(0.0, &colors), colors[0]);
        assert_eq!(interpolate(1.0, &colors), colors[2]);
        assert_eq!(interpolate(0.5, &colors), colors[1]);
    }

    #[test]
    fn test_midpoints_round_each_channel() {
        let colors = vec![Rgb::new(0, 0, 0), Rgb::new(255, 100, 1)];
        assert_eq!(interpolate(0.5, &colors), Rgb::new(128, 50, 1));
        assert_eq!(interpolate(0.25, &ramp()), Rgb::new(0, 128, 128));
    }

    #[test]
    fn test_single_and_empty_lists() {
        let single = [Rgb::new(12, 34, 56)];
        for t in [0.0, 0.3, 0.999, 1.0] {
            assert_eq!(interpolate(t, &single), single[0]);
        }
        assert_eq!(interpolate(0.5, &[]), Rgb::BLACK);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let colors = ramp();
        assert_eq!(interpolate(-1.0, &colors), colors[0]);
        assert_eq!(interpolate(7.5, &colors), colors[2]);
        assert_eq!(interpolate(f64::NAN, &colors), colors[0]);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("FF8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("#f80").unwrap(), Rgb::new(255, 136, 0));
        assert!(Rgb::from_hex("#ff80").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert_eq!(Rgb::new(1, 171, 255).to_string(), "#01abff");
    }

    #[test]
    fn test_ramp_serde_uses_hex_strings() {
        let ramp: ColorRamp = serde_json::from_str(r##"["#000000", "#ffffff"]"##).unwrap();
        assert_eq!(ramp.len(), 2);
        assert_eq!(ramp.sample(1.0), Rgb::new(255, 255, 255));
        assert_eq!(
            serde_json::to_string(&ramp).unwrap(),
            r##"["#000000","#ffffff"]"##
        );
    }
}
