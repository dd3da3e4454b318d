//! Packed 32-bit color codec
//!
//! Colors are stored as `0xAARRGGBB` in a single `u32`.

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// Unpacked color channels
///
/// Laid out as RGBA bytes so a slice of these can be viewed as raw
/// raster bytes with bytemuck.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into `0xAARRGGBB`
    #[inline]
    pub const fn pack(self) -> u32 {
        pack(self.r, self.g, self.b, self.a)
    }
}

impl From<u32> for Rgba {
    fn from(argb: u32) -> Self {
        unpack(argb)
    }
}

impl From<Rgba> for u32 {
    fn from(color: Rgba) -> Self {
        color.pack()
    }
}

/// Pack channels into `0xAARRGGBB`
#[inline]
pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Pack an opaque color
#[inline]
pub const fn opaque(r: u8, g: u8, b: u8) -> u32 {
    pack(r, g, b, 255)
}

/// Unpack `0xAARRGGBB` into channels
#[inline]
pub const fn unpack(argb: u32) -> Rgba {
    Rgba {
        a: (argb >> 24) as u8,
        r: (argb >> 16) as u8,
        g: (argb >> 8) as u8,
        b: argb as u8,
    }
}

/// Parse `#RRGGBB` or `#RGB` (the `#` is optional) into an opaque color
pub fn hex_to_argb(hex: &str) -> Result<u32, ColorError> {
    let invalid = || ColorError::InvalidHex(hex.to_string());
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok(opaque(channel(0)?, channel(2)?, channel(4)?))
}

/// Source-over blend of `src` at `opacity` onto an opaque `dst`
///
/// The result is opaque. `opacity` multiplies the source's own alpha.
#[inline]
pub fn blend_over(dst: Rgba, src: Rgba, opacity: f32) -> Rgba {
    let alpha = (f32::from(src.a) / 255.0 * opacity).clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| (f32::from(s) * alpha + f32::from(d) * (1.0 - alpha)).round() as u8;
    Rgba::new(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b), 255)
}

/// Format as lowercase `#rrggbb`, dropping alpha
pub fn argb_to_hex(argb: u32) -> String {
    let Rgba { r, g, b, .. } = unpack(argb);
    format!("#{r:02x}{g:02x}{b:02x}")
}
