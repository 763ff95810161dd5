// RGB color value and the small amount of color math the generator needs
//
// Terminal palettes spell colors in several ways ("#1a1b26", "0x1a1b26",
// "#abc", quoted, upper case). Everything is normalized to an `Rgb` on the
// way in and printed as lowercase "#rrggbb" on the way out.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// WCAG relative luminance constants (sRGB)
const GAMMA_THRESHOLD: f64 = 0.03928;
const GAMMA_DIVISOR: f64 = 12.92;
const GAMMA_OFFSET: f64 = 0.055;
const GAMMA_DENOMINATOR: f64 = 1.055;
const GAMMA_POWER: f64 = 2.4;

const LUMINANCE_R: f64 = 0.2126;
const LUMINANCE_G: f64 = 0.7152;
const LUMINANCE_B: f64 = 0.0722;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color string into an `Rgb`.
    /// Supports:
    /// - Hex format: #RRGGBB, RRGGBB, 0xRRGGBB
    /// - Short hex: #RGB
    /// - Surrounding whitespace and quotes, any letter case
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'').trim();

        let hex = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .or_else(|| value.strip_prefix('#'))
            .unwrap_or(value);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut expanded = [0u8; 3];
                for (slot, c) in expanded.iter_mut().zip(hex.chars()) {
                    *slot = channel(&format!("{c}{c}"))?;
                }
                Some(Self::new(expanded[0], expanded[1], expanded[2]))
            }
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Lowercase "#rrggbb"
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance (0.0 = black, 1.0 = white), gamma corrected.
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= GAMMA_THRESHOLD {
                c / GAMMA_DIVISOR
            } else {
                ((c + GAMMA_OFFSET) / GAMMA_DENOMINATOR).powf(GAMMA_POWER)
            }
        }

        LUMINANCE_R * linear(self.r) + LUMINANCE_G * linear(self.g) + LUMINANCE_B * linear(self.b)
    }

    /// Contrast ratio between two colors, 1.0 ..= 21.0
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }

    /// Perceived brightness using the 0.299/0.587/0.114 weights (0.0 ..= 1.0)
    pub fn perceived_brightness(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// A background brighter than mid-gray makes a light theme.
    pub fn is_light(self) -> bool {
        self.perceived_brightness() > 0.5
    }

    /// Darken (light themes) or lighten (dark themes) every channel by `factor`.
    /// Channels are clamped to 0..=255 and truncated, not rounded.
    pub fn adjust_for_theme(self, is_light: bool, factor: f64) -> Self {
        let scale = if is_light { 1.0 - factor } else { 1.0 + factor };
        let apply = |c: u8| (c as f64 * scale).clamp(0.0, 255.0) as u8;
        Self::new(apply(self.r), apply(self.g), apply(self.b))
    }

    /// Linear blend towards `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn mix(self, other: Rgb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid color {raw:?}")))
    }
}
