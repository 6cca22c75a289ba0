use std::fmt;
use std::str::FromStr;

use palette::{IntoColor, Oklch, Srgb};

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const LIGHT_STEEL_BLUE: Rgb = Rgb::new(176, 196, 222);
    pub const STEEL_BLUE: Rgb = Rgb::new(70, 130, 180);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GRAY: Rgb = Rgb::new(204, 204, 204);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolate towards `other` in OKLCH space, taking the shortest path
    /// around the hue circle.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0) as f32;
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return other;
        }

        let (from_l, from_c, from_h) = self.to_oklch();
        let (to_l, to_c, to_h) = other.to_oklch();

        let l = from_l + (to_l - from_l) * t;
        let c = from_c + (to_c - from_c) * t;

        let mut dh = to_h - from_h;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }
        let h = (from_h + dh * t).rem_euclid(360.0);

        let srgb: Srgb = Oklch::new(l, c, h).into_color();
        let srgb = srgb.into_format::<u8>();
        Rgb::new(srgb.red, srgb.green, srgb.blue)
    }

    fn to_oklch(self) -> (f32, f32, f32) {
        let srgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let oklch: Oklch = srgb.into_color();
        (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is neither `#rrggbb` nor a known name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color '{0}'")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "white" => return Ok(Rgb::WHITE),
            "black" => return Ok(Rgb::BLACK),
            "lightsteelblue" => return Ok(Rgb::LIGHT_STEEL_BLUE),
            "steelblue" => return Ok(Rgb::STEEL_BLUE),
            "red" => return Ok(Rgb::RED),
            "gray" | "grey" => return Ok(Rgb::GRAY),
            _ => {}
        }

        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| hex.is_ascii())
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(ParseColorError(s.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
