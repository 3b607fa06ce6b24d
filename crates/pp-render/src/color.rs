//! Series colours: explicit `#RRGGBB` palettes and named two-stop gradients.

use crate::{RenderError, RenderResult};
use plotters::style::RGBColor;

/// Used when an axis has no palette of its own.
pub const DEFAULT_PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

pub fn parse_hex(token: &str) -> RenderResult<RGBColor> {
    let invalid = || RenderError::InvalidColor {
        token: token.to_string(),
    };
    let hex = token.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Colour per series: the axis palette when given, cycling; otherwise the
/// default palette.
pub fn series_palette(tokens: &[String]) -> RenderResult<Vec<RGBColor>> {
    if tokens.is_empty() {
        return Ok(DEFAULT_PALETTE.to_vec());
    }
    tokens.iter().map(|t| parse_hex(t)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub from: RGBColor,
    pub to: RGBColor,
}

impl Gradient {
    /// Looks up a colour-map name. A trailing `_r` reverses it; unknown names
    /// fall back to a grey ramp.
    pub fn named(name: &str) -> Self {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let (from, to) = match base {
            "viridis" => ((0x44, 0x01, 0x54), (0xfd, 0xe7, 0x25)),
            "plasma" => ((0x0d, 0x08, 0x87), (0xf0, 0xf9, 0x21)),
            "inferno" => ((0x00, 0x00, 0x04), (0xfc, 0xff, 0xa4)),
            "magma" => ((0x00, 0x00, 0x04), (0xfc, 0xfd, 0xbf)),
            "cividis" => ((0x00, 0x22, 0x4e), (0xfe, 0xe8, 0x38)),
            "Blues" => ((0xf7, 0xfb, 0xff), (0x08, 0x30, 0x6b)),
            "Reds" => ((0xff, 0xf5, 0xf0), (0x67, 0x00, 0x0d)),
            "Greens" => ((0xf7, 0xfc, 0xf5), (0x00, 0x44, 0x1b)),
            "Purples" => ((0xfc, 0xfb, 0xfd), (0x3f, 0x00, 0x7d)),
            "Oranges" => ((0xff, 0xf5, 0xeb), (0x7f, 0x27, 0x04)),
            "coolwarm" => ((0x3b, 0x4c, 0xc0), (0xb4, 0x04, 0x26)),
            "Greys" | "gray" | "grey" => ((0xff, 0xff, 0xff), (0x00, 0x00, 0x00)),
            other => {
                tracing::warn!(gradient = other, "unknown colour map, using grey");
                ((0xd9, 0xd9, 0xd9), (0x25, 0x25, 0x25))
            }
        };
        let (from, to) = (RGBColor(from.0, from.1, from.2), RGBColor(to.0, to.1, to.2));
        if reversed {
            Self { from: to, to: from }
        } else {
            Self { from, to }
        }
    }

    /// Gradient `k` of an axis' colour list, cycling when the list is short.
    pub fn for_series(colors: &[String], k: usize) -> Self {
        if colors.is_empty() {
            return Self::named("viridis");
        }
        Self::named(&colors[k % colors.len()])
    }

    /// Colour at `t` in `0.0..=1.0`.
    pub fn at(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            mix(self.from.0, self.to.0),
            mix(self.from.1, self.to.1),
            mix(self.from.2, self.to.2),
        )
    }
}
