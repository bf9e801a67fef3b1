//! Conversions between hex strings, RGB channels and HSL.
//!
//! Everything here is total over `Color`. Malformed text is only rejected at
//! the `hex_to_rgb` boundary.

use crate::types::{Color, Hsl, InvalidColor};

/// Parse a `#RRGGBB` string into its channels.
pub fn hex_to_rgb(hex: &str) -> Result<Color, InvalidColor> {
    Color::from_hex(hex)
}

/// Format channels as an uppercase `#RRGGBB` string.
///
/// Channels are rounded and clamped to `[0, 255]`, so out-of-range input
/// saturates instead of producing a malformed string.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    clamp_channels(r, g, b).to_hex()
}

/// Round and clamp floating point channels into a `Color`.
pub fn clamp_channels(r: f64, g: f64, b: f64) -> Color {
    Color::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h / 6.0) * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let h = h / 360.0;
    let s = s / 100.0;
    let l = l / 100.0;

    if s == 0.0 {
        let v = l * 255.0;
        return clamp_channels(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    clamp_channels(
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Color {
    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        hsl_to_rgb(hsl.h, hsl.s, hsl.l)
    }
}
