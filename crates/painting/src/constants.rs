use crate::color::pack;

/// Opaque white, the color of a blank cell and of the export background.
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Opaque black, the edge color produced by the outline converter.
pub const BLACK: u32 = 0xFF00_0000;

/// Default palette (VGA 16 plus four pastel extensions).
pub const PALETTE_HEX: [&str; 20] = [
    "#000000", "#808080", "#800000", "#808000", "#008000", "#008080", "#000080", "#800080",
    "#808040", "#004040", "#ffffff", "#c0c0c0", "#ff0000", "#ffff00", "#00ff00", "#00ffff",
    "#0000ff", "#ff00ff", "#ffff80", "#00ff80",
];

/// Default palette as packed colors, in the same order as [`PALETTE_HEX`].
pub const PALETTE: [u32; 20] = [
    pack(0x00, 0x00, 0x00, 255),
    pack(0x80, 0x80, 0x80, 255),
    pack(0x80, 0x00, 0x00, 255),
    pack(0x80, 0x80, 0x00, 255),
    pack(0x00, 0x80, 0x00, 255),
    pack(0x00, 0x80, 0x80, 255),
    pack(0x00, 0x00, 0x80, 255),
    pack(0x80, 0x00, 0x80, 255),
    pack(0x80, 0x80, 0x40, 255),
    pack(0x00, 0x40, 0x40, 255),
    pack(0xFF, 0xFF, 0xFF, 255),
    pack(0xC0, 0xC0, 0xC0, 255),
    pack(0xFF, 0x00, 0x00, 255),
    pack(0xFF, 0xFF, 0x00, 255),
    pack(0x00, 0xFF, 0x00, 255),
    pack(0x00, 0xFF, 0xFF, 255),
    pack(0x00, 0x00, 0xFF, 255),
    pack(0xFF, 0x00, 0xFF, 255),
    pack(0xFF, 0xFF, 0x80, 255),
    pack(0x00, 0xFF, 0x80, 255),
];
