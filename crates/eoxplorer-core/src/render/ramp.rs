use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EoError, Result};

/// An 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Parse a CSS color name, `#rrggbb`, or bare `rrggbb`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(named) = named_color(&trimmed.to_ascii_lowercase()) {
            return Ok(named);
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() == 6 && hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                return Ok(Self::rgb(r, g, b));
            }
        }
        Err(EoError::UnknownColor(s.to_string()))
    }

    fn lerp(self, other: Color, t: f32) -> Color {
        let mix = |a: u8, b: u8| {
            (a as f32 + (b as f32 - a as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

fn named_color(name: &str) -> Option<Color> {
    let c = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "blue" => Color::BLUE,
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "brown" => Color::rgb(165, 42, 42),
        "purple" => Color::rgb(128, 0, 128),
        "cyan" => Color::rgb(0, 255, 255),
        "magenta" => Color::rgb(255, 0, 255),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "darkgreen" => Color::rgb(0, 100, 0),
        "lime" => Color::rgb(0, 255, 0),
        "navy" => Color::rgb(0, 0, 128),
        _ => return None,
    };
    Some(c)
}

impl FromStr for Color {
    type Err = EoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = EoError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Evenly spaced color stops interpolated piecewise-linearly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct ColorRamp {
    stops: Vec<Color>,
}

impl ColorRamp {
    pub fn new(stops: Vec<Color>) -> Result<Self> {
        if stops.is_empty() {
            return Err(EoError::InvalidProfile {
                name: "<ramp>".to_string(),
                reason: "color ramp needs at least one stop".to_string(),
            });
        }
        Ok(Self { stops })
    }

    /// Caller guarantees `stops` is non-empty.
    pub(crate) fn from_stops(stops: Vec<Color>) -> Self {
        debug_assert!(!stops.is_empty());
        Self { stops }
    }

    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let stops = names
            .iter()
            .map(|n| Color::parse(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(stops)
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color {
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0];
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (n - 1) as f32;
        let i = (pos.floor() as usize).min(n - 2);
        self.stops[i].lerp(self.stops[i + 1], pos - i as f32)
    }
}

impl TryFrom<Vec<Color>> for ColorRamp {
    type Error = EoError;

    fn try_from(stops: Vec<Color>) -> Result<Self> {
        Self::new(stops)
    }
}

impl From<ColorRamp> for Vec<Color> {
    fn from(ramp: ColorRamp) -> Self {
        ramp.stops
    }
}
