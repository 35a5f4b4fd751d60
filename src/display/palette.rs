// Optional DMG display filter.
//
// `ppu::rendering::DMG_SHADES` already resolves DMG output to the classic
// green-tinted LCD look. This module offers the inverse: a flat grayscale
// remap, for players who want an "accurate gray" presentation instead of
// the green tint, without touching the PPU's own palette.

use crate::ppu::constants::DMG_SHADES;

/// Neutral gray equivalents of `DMG_SHADES`, lightest to darkest.
const DMG_GRAY_SHADES: [(u8, u8, u8); 4] =
    [(0xFF, 0xFF, 0xFF), (0xAA, 0xAA, 0xAA), (0x55, 0x55, 0x55), (0x00, 0x00, 0x00)];

/// Map a PPU DMG green shade to its neutral gray equivalent.
///
/// Colors that don't match one of the four DMG shades (CGB output, for
/// instance) pass through unchanged.
pub fn apply_grayscale_filter(rgb: (u8, u8, u8)) -> (u8, u8, u8) {
    match DMG_SHADES.iter().position(|&shade| shade == rgb) {
        Some(index) => DMG_GRAY_SHADES[index],
        None => rgb,
    }
}
