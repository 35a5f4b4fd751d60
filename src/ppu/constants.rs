// PPU timing and palette constants, grounded in the documented hardware
// timing tables (456 dots/scanline, 154 scanlines/frame) and the classic
// four-shade DMG palette.

pub const DOTS_PER_SCANLINE: u32 = 456;
pub const SCANLINES_PER_FRAME: u32 = 154;
pub const VISIBLE_SCANLINES: u8 = 144;
pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

pub const OAM_SEARCH_DOTS: u32 = 80;
/// Baseline length of Mode 3 (Drawing) with SCX == 0, no window fetch, and no
/// sprites on the line. The actual per-scanline length is this baseline plus
/// `SCX % 8`, `+6` if the window is fetched on the line, and a per-sprite
/// fetch penalty; see `Ppu::drawing_length_for_line`.
pub const DRAWING_DOTS_BASE: u32 = 172;
/// Per-sprite fetch penalty cap and divisor from the mode-3 length formula.
pub const SPRITE_FETCH_PENALTY_CAP: u32 = 5;
pub const SPRITE_FETCH_PENALTY_BASE: u32 = 11;
/// Dot cost of fetching the window's first tile when the window starts on a line.
pub const WINDOW_FETCH_PENALTY: u32 = 6;

pub const MAX_SPRITES_PER_SCANLINE: usize = 10;

/// Classic four-shade DMG palette, lightest to darkest, as RGB24.
pub const DMG_SHADES: [(u8, u8, u8); 4] = [
    (0xE0, 0xF8, 0xD0),
    (0x88, 0xC0, 0x70),
    (0x34, 0x68, 0x56),
    (0x08, 0x18, 0x20),
];
