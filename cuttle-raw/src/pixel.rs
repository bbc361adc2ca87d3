//! Pixel sources consumed by the language encoders
//!
//! A finished page arrives from the rasterization collaborator either as a
//! 1-bit monochrome grid ([`PixelGrid`]) or as a full RGBA raster
//! ([`RgbRaster`]). Both are immutable once produced; encoders only read.

use crate::buffer::hex_string;
use crate::error::{RawError, RawResult};

/// 1-bit-per-pixel bitmap, row-major, MSB-first
///
/// Bit `i` covers pixel `(x, y)` with `i = y * width + x`. A set bit is the
/// printable/"wire black" value: for languages that invert black and white
/// on the wire (EPL), the quantizer flips bits before they land here, so
/// encoders never special-case polarity.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl PixelGrid {
    /// Create an all-clear grid
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize * height as usize).div_ceil(8);
        Self {
            width,
            height,
            bits: vec![0u8; len],
        }
    }

    /// Reconstruct a grid from MSB-first packed bits
    ///
    /// `bits` must hold exactly `ceil(width * height / 8)` bytes.
    pub fn from_packed(width: u32, height: u32, bits: Vec<u8>) -> RawResult<Self> {
        let expected = (width as usize * height as usize).div_ceil(8);
        if bits.len() != expected {
            return Err(RawError::MalformedInput(format!(
                "bit data is {} bytes, {}x{} grid needs {}",
                bits.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.size(), "location exceeds bounds");
        (self.bits[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    pub fn set(&mut self, index: usize, black: bool) {
        assert!(index < self.size(), "location exceeds bounds");
        let mask = 1u8 << (7 - (index & 7));
        if black {
            self.bits[index >> 3] |= mask;
        } else {
            self.bits[index >> 3] &= !mask;
        }
    }

    pub fn get_xy(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "location exceeds bounds");
        self.get((y * self.width + x) as usize)
    }

    pub fn set_xy(&mut self, x: u32, y: u32, black: bool) {
        assert!(x < self.width && y < self.height, "location exceeds bounds");
        self.set((y * self.width + x) as usize, black)
    }

    /// The whole image as one MSB-first bit sequence, whole bytes only
    ///
    /// Yields `width * height / 8` bytes (truncating); the fixed-format
    /// languages all pad the width to a byte multiple upstream, so nothing
    /// is lost there.
    pub fn packed_bytes(&self) -> &[u8] {
        &self.bits[..self.size() / 8]
    }

    /// Pack `rows` scanlines starting at `start_row`, one padded byte row
    /// at a time
    ///
    /// Each row occupies `ceil(width / 8)` bytes, MSB-first, with the final
    /// partial byte zero-padded. This is the ESC/POS raster band layout.
    pub fn packed_rows(&self, start_row: u32, rows: u32) -> Vec<u8> {
        let bytes_per_row = (self.width as usize).div_ceil(8);
        let mut out = vec![0u8; bytes_per_row * rows as usize];
        for dy in 0..rows {
            let y = start_row + dy;
            for x in 0..self.width {
                if self.get_xy(x, y) {
                    let idx = dy as usize * bytes_per_row + (x as usize / 8);
                    out[idx] |= 1 << (7 - (x % 8));
                }
            }
        }
        out
    }

    /// Uppercase hex rendering of [`packed_bytes`](Self::packed_bytes)
    pub fn hex_string(&self) -> String {
        hex_string(self.packed_bytes())
    }
}

/// Full-color RGBA raster
///
/// Pixels are row-major `[r, g, b, a]`. Consumed by the Evolis encoder
/// (CMYK ribbon derivation) and by the monochrome quantizer.
#[derive(Debug, Clone)]
pub struct RgbRaster {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl RgbRaster {
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> RawResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RawError::MalformedInput(format!(
                "pixel data is {} samples, {}x{} raster needs {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Solid single-color raster (tests, coat layers)
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgba; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixel(&self, index: usize) -> [u8; 4] {
        self.pixels[index]
    }

    pub fn pixel_xy(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "location exceeds bounds");
        self.pixels[(y * self.width + x) as usize]
    }

    /// Copy with the width grown to `new_width`, new columns transparent
    ///
    /// Transparent pixels quantize to white under every policy, matching
    /// how blank padding behaves on paper.
    pub fn pad_width(&self, new_width: u32) -> Self {
        assert!(new_width >= self.width);
        let mut pixels = Vec::with_capacity(new_width as usize * self.height as usize);
        for y in 0..self.height {
            let row = (y * self.width) as usize;
            pixels.extend_from_slice(&self.pixels[row..row + self.width as usize]);
            pixels.resize(pixels.len() + (new_width - self.width) as usize, [0, 0, 0, 0]);
        }
        Self {
            width: new_width,
            height: self.height,
            pixels,
        }
    }
}

#[cfg(feature = "image")]
impl RgbRaster {
    /// Build a raster from a decoded RGBA image
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let pixels = img.pixels().map(|p| p.0).collect();
        Self {
            width: img.width(),
            height: img.height(),
            pixels,
        }
    }
}

#[cfg(feature = "image")]
impl From<&image::DynamicImage> for RgbRaster {
    fn from(img: &image::DynamicImage) -> Self {
        Self::from_rgba_image(&img.to_rgba8())
    }
}

/// A finished page, in whichever color depth the target language needs
#[derive(Debug, Clone)]
pub enum PixelSource {
    /// Monochrome bit grid (CPCL, EPL, ZPL, SBPL, PGL, ESC/POS)
    Mono(PixelGrid),
    /// RGBA raster (Evolis)
    Color(RgbRaster),
}

impl PixelSource {
    pub fn width(&self) -> u32 {
        match self {
            PixelSource::Mono(grid) => grid.width(),
            PixelSource::Color(raster) => raster.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PixelSource::Mono(grid) => grid.height(),
            PixelSource::Color(raster) => raster.height(),
        }
    }

    pub fn as_mono(&self) -> Option<&PixelGrid> {
        match self {
            PixelSource::Mono(grid) => Some(grid),
            PixelSource::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<&RgbRaster> {
        match self {
            PixelSource::Mono(_) => None,
            PixelSource::Color(raster) => Some(raster),
        }
    }
}

impl From<PixelGrid> for PixelSource {
    fn from(grid: PixelGrid) -> Self {
        PixelSource::Mono(grid)
    }
}

impl From<RgbRaster> for PixelSource {
    fn from(raster: RgbRaster) -> Self {
        PixelSource::Color(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_set_get() {
        let mut grid = PixelGrid::new(16, 2);
        assert!(!grid.get_xy(3, 1));
        grid.set_xy(3, 1, true);
        assert!(grid.get_xy(3, 1));
        assert!(grid.get(19));
        grid.set_xy(3, 1, false);
        assert!(!grid.get(19));
    }

    #[test]
    fn test_packed_bytes_msb_first() {
        let mut grid = PixelGrid::new(8, 1);
        grid.set_xy(0, 0, true);
        grid.set_xy(7, 0, true);
        assert_eq!(grid.packed_bytes(), &[0b1000_0001]);
        assert_eq!(grid.hex_string(), "81");
    }

    #[test]
    fn test_packed_rows_pads_partial_byte() {
        let mut grid = PixelGrid::new(10, 2);
        for x in 0..10 {
            grid.set_xy(x, 1, true);
        }
        let rows = grid.packed_rows(0, 2);
        // 2 bytes per row: blank row, then 10 set bits left-aligned
        assert_eq!(rows, vec![0x00, 0x00, 0xFF, 0xC0]);
    }

    #[test]
    fn test_from_packed_validates_length() {
        assert!(PixelGrid::from_packed(8, 2, vec![0xFF, 0x00]).is_ok());
        assert!(matches!(
            PixelGrid::from_packed(8, 2, vec![0xFF]),
            Err(RawError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_raster_validates_length() {
        assert!(RgbRaster::new(2, 2, vec![[0, 0, 0, 255]; 4]).is_ok());
        assert!(matches!(
            RgbRaster::new(2, 2, vec![[0, 0, 0, 255]; 3]),
            Err(RawError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_pad_width_appends_transparent_columns() {
        let raster = RgbRaster::filled(2, 2, [1, 2, 3, 255]);
        let padded = raster.pad_width(4);
        assert_eq!(padded.width(), 4);
        assert_eq!(padded.pixel_xy(1, 1), [1, 2, 3, 255]);
        assert_eq!(padded.pixel_xy(3, 0), [0, 0, 0, 0]);
    }
}
