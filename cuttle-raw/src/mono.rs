//! Monochrome quantization
//!
//! Converts an RGBA raster into the 1-bit [`PixelGrid`] a mono language
//! encoder consumes. The same quantizer derives Evolis overlay masks, so
//! mask images and primary mono images share identical black/white
//! semantics.

use crate::error::{RawError, RawResult};
use crate::language::Language;
use crate::pixel::{PixelGrid, RgbRaster};
use tracing::debug;

/// Pixel quantization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantization {
    /// Alpha above the threshold is considered black (discarding color info)
    Alpha,
    /// Color value must be the exact value of black
    Black,
    /// Image is processed via a separate black & white dithering algorithm
    Dither,
    /// Luma (or alpha) must be below the threshold to be considered black
    #[default]
    Luma,
}

impl Quantization {
    /// Parse from `input`, falling back to `fallback` when no match is found
    pub fn parse(input: &str, fallback: Quantization) -> Quantization {
        match input.to_ascii_lowercase().as_str() {
            "alpha" => Quantization::Alpha,
            "black" => Quantization::Black,
            "dither" => Quantization::Dither,
            "luma" => Quantization::Luma,
            _ => fallback,
        }
    }
}

/// Default luma/alpha threshold
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Tests whether a pixel should print black under the given policy
///
/// `Dither` must be rejected before calling; it has no per-pixel test.
fn is_black(rgba: [u8; 4], quantization: Quantization, threshold: u8) -> bool {
    let [r, g, b, a] = rgba;
    match quantization {
        Quantization::Luma => {
            if a < threshold {
                // pixels more transparent than the threshold are white
                return false;
            }
            let luma = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
            luma < threshold as u32
        }
        Quantization::Alpha => a > threshold,
        Quantization::Black => r == 0 && g == 0 && b == 0 && a == 255,
        Quantization::Dither => unreachable!("dither has no per-pixel test"),
    }
}

/// Quantize an RGBA raster into the wire-polarity bit grid for `language`
///
/// Most languages print 1 = black, but some manufacturers reversed this and
/// use 0 for black pixels (EPL is the common case); those grids come out
/// inverted so downstream encoders emit bits as-is. Languages that require
/// the width to be a byte multiple get the raster padded on the right with
/// transparent pixels first.
pub fn quantize(
    raster: &RgbRaster,
    language: Language,
    quantization: Quantization,
    threshold: u8,
) -> RawResult<PixelGrid> {
    if quantization == Quantization::Dither {
        return Err(RawError::Unsupported(
            "dither quantization is not yet supported".into(),
        ));
    }

    let padded;
    let raster = if language.pads_width_to_byte() && raster.width() % 8 != 0 {
        let new_width = (raster.width() / 8 + 1) * 8;
        debug!(
            language = language.name(),
            width = raster.width(),
            new_width,
            "width must be a byte multiple, padding"
        );
        padded = raster.pad_width(new_width);
        &padded
    } else {
        raster
    };

    debug!(
        width = raster.width(),
        height = raster.height(),
        ?quantization,
        threshold,
        "converting image to monochrome"
    );

    let invert = language.inverts_output();
    let mut grid = PixelGrid::new(raster.width(), raster.height());
    for (i, &rgba) in raster.pixels().iter().enumerate() {
        let black = invert != is_black(rgba, quantization, threshold);
        grid.set(i, black);
    }
    Ok(grid)
}
