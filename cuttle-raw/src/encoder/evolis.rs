//! Evolis dye-sublimation ribbon body
//!
//! A card prints as up to five ribbon planes: yellow, magenta and cyan at
//! the requested precision, then black and the clear overlay at two levels
//! each. Every plane is a `Db` block of per-pixel intensity codes packed
//! contiguously, most significant bit first.

use crate::buffer::ByteBuffer;
use crate::error::{RawError, RawResult};
use crate::language::Language;
use crate::mono::{self, Quantization};
use crate::params::{EncodeParams, OverlaySpec};
use crate::pixel::RgbRaster;
use tracing::{debug, warn};

/// K and O planes are on/off ribbons regardless of the color precision
const BILEVEL: u16 = 2;

struct ColorPlanes {
    cyan: Vec<f32>,
    yellow: Vec<f32>,
    magenta: Vec<f32>,
    black: Vec<f32>,
}

pub(crate) fn append_body(
    buf: &mut ByteBuffer,
    raster: &RgbRaster,
    params: &EncodeParams,
) -> RawResult<()> {
    let precision = params.precision;
    if !(2..=256).contains(&precision) {
        return Err(RawError::InvalidParameters(format!(
            "ribbon precision {precision} is outside 2..=256"
        )));
    }
    if !precision.is_power_of_two() {
        // packing still keeps samples intact, but no hardware reference
        // exists for these streams
        warn!(precision, "non-power-of-two ribbon precision is unverified");
    }

    let planes = split_color_planes(raster);

    append_ribbon(buf, 'y', precision, &planes.yellow);
    append_ribbon(buf, 'm', precision, &planes.magenta);
    append_ribbon(buf, 'c', precision, &planes.cyan);

    // K (black) and O (overlay) are always two-level
    append_ribbon(buf, 'k', BILEVEL, &planes.black);

    if let Some(overlay) = &params.overlay {
        let plane = overlay_plane(overlay, raster.width(), raster.height())?;
        append_ribbon(buf, 'o', BILEVEL, &plane);
    }

    Ok(())
}

/// Split RGB into C/M/Y intensities plus a pure-black K plane
///
/// Exact black moves entirely onto the K ribbon; everything else prints
/// from the color panels alone. No gray-component removal beyond that.
fn split_color_planes(raster: &RgbRaster) -> ColorPlanes {
    let len = raster.pixels().len();
    let mut planes = ColorPlanes {
        cyan: vec![0.0; len],
        yellow: vec![0.0; len],
        magenta: vec![0.0; len],
        black: vec![0.0; len],
    };

    for (i, &[r, g, b, _]) in raster.pixels().iter().enumerate() {
        if r == 0 && g == 0 && b == 0 {
            planes.black[i] = 1.0;
        } else {
            planes.cyan[i] = 1.0 - r as f32 / 255.0;
            planes.magenta[i] = 1.0 - g as f32 / 255.0;
            planes.yellow[i] = 1.0 - b as f32 / 255.0;
        }
    }

    planes
}

/// Resolve the overlay parameter into a per-pixel coverage plane
fn overlay_plane(spec: &OverlaySpec, width: u32, height: u32) -> RawResult<Vec<f32>> {
    let len = width as usize * height as usize;
    let mut plane = vec![0.0f32; len];

    match spec {
        OverlaySpec::Rects(rects) => {
            for rect in rects {
                let [x1, y1, x2, y2] = *rect;
                for y in y1.saturating_sub(1)..y2 {
                    let off = (y * width) as usize;
                    for x in x1.saturating_sub(1)..x2 {
                        if (off + x as usize) < len {
                            plane[off + x as usize] = 1.0;
                        }
                    }
                }
            }
        }
        OverlaySpec::Mask(mask) => {
            if mask.width() != width || mask.height() != height {
                return Err(RawError::MalformedInput(format!(
                    "overlay mask is {}x{}, card is {width}x{height}",
                    mask.width(),
                    mask.height()
                )));
            }
            let grid = mono::quantize(mask, Language::Evolis, Quantization::Luma, 127)?;
            for (i, value) in plane.iter_mut().enumerate() {
                *value = if grid.get(i) { 1.0 } else { 0.0 };
            }
        }
        OverlaySpec::Coat(true) => plane.fill(1.0),
        OverlaySpec::Coat(false) => {}
    }

    Ok(plane)
}

fn append_ribbon(buf: &mut ByteBuffer, channel: char, precision: u16, samples: &[f32]) {
    debug!(channel = %channel, precision, "building ribbon plane");

    buf.push(0x1B)
        .append_ascii("Db;")
        .push(channel as u8)
        .push(b';')
        .append_dec(precision)
        .push(b';')
        .append_bytes(&pack_plane(samples, precision))
        .push(0x0D);
}

/// Bits needed for the highest intensity code
fn bits_per_sample(precision: u16) -> u32 {
    u16::BITS - (precision - 1).leading_zeros()
}

/// Quantize samples to `floor(sample * (precision - 1))` and pack the codes
/// contiguously, MSB-first, with no inter-sample padding
///
/// The final byte is zero-padded on the right when the bit count is not a
/// multiple of 8.
fn pack_plane(samples: &[f32], precision: u16) -> Vec<u8> {
    let bits = bits_per_sample(precision);
    let max_code = (precision - 1) as f32;

    let mut out = Vec::with_capacity((samples.len() * bits as usize).div_ceil(8));
    let mut acc: u32 = 0;
    let mut pending: u32 = 0;

    for &sample in samples {
        let code = (sample * max_code) as u32;
        acc = (acc << bits) | code;
        pending += bits;
        while pending >= 8 {
            out.push((acc >> (pending - 8)) as u8);
            pending -= 8;
            acc &= (1 << pending) - 1;
        }
    }
    if pending > 0 {
        out.push((acc << (8 - pending)) as u8);
    }

    out
}
