// Screenshot functionality
//
// Captures the current frame buffer and saves it as a PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a screenshot of the current frame
///
/// The PPU already resolves palette lookups into RGB triples, so this
/// just serializes the frame buffer directly rather than resolving
/// indices through a palette table.
///
/// # Arguments
///
/// * `frame_buffer` - The resolved RGB frame (160x144 pixels)
/// * `rom_path` - Optional path to the currently loaded ROM (for naming)
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
///
/// # Example
///
/// ```no_run
/// use gb_rs::emulator::save_screenshot;
/// use gb_rs::ppu::Ppu;
///
/// let ppu = Ppu::new(false);
/// let screenshot_path = save_screenshot(ppu.frame_buffer(), None).expect("Failed to save screenshot");
/// println!("Screenshot saved to: {}", screenshot_path.display());
/// ```
pub fn save_screenshot(
    frame_buffer: &[(u8, u8, u8)],
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    // Create screenshots directory
    let screenshots_dir = get_screenshot_directory(rom_path);
    fs::create_dir_all(&screenshots_dir)?;

    // Generate filename with timestamp
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("screenshot_{}.png", timestamp);
    let file_path = screenshots_dir.join(filename);

    let rgb_data = rgb_triples_to_bytes(frame_buffer);

    save_png(&file_path, &rgb_data, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)?;

    Ok(file_path)
}

/// Get the screenshot directory for the current ROM
///
/// Creates a directory structure like: screenshots/<rom_name>/
fn get_screenshot_directory(rom_path: Option<&Path>) -> PathBuf {
    let base_dir = PathBuf::from("screenshots");

    if let Some(rom_path) = rom_path {
        if let Some(rom_name) = rom_path.file_stem() {
            return base_dir.join(rom_name);
        }
    }

    base_dir.join("default")
}

/// Flatten `(r, g, b)` triples into an interleaved byte buffer for PNG encoding.
fn rgb_triples_to_bytes(pixels: &[(u8, u8, u8)]) -> Vec<u8> {
    let mut rgb_data = Vec::with_capacity(pixels.len() * 3);

    for &(r, g, b) in pixels {
        rgb_data.push(r);
        rgb_data.push(g);
        rgb_data.push(b);
    }

    rgb_data
}

/// Save RGB data as a PNG file
///
/// # Arguments
///
/// * `path` - Path to save the PNG file
/// * `data` - RGB data (width × height × 3 bytes)
/// * `width` - Image width
/// * `height` - Image height
///
/// # Returns
///
/// Result indicating success or error
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
