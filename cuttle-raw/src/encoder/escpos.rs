//! ESC/POS raster bodies
//!
//! Three raster command generations share one entry point:
//!
//! - `ESC *` classic bit-image: vertical column bytes, sent in segments
//!   the height of the line spacing, with optional legacy line-spacing
//!   bracketing and double-pass striping for impact printers
//! - `GS ( L` store + print: 24-row raster bands, each stored to the
//!   print buffer and flushed immediately
//! - `GS v 0` direct raster: the same bands printed in one command
//!
//! The image is read as one long run of pixels, scanned top to bottom and
//! left to right; each variant re-chunks it for its own framing.

use crate::buffer::ByteBuffer;
use crate::params::{DotDensity, EncodeParams, EscPosVariant};
use crate::pixel::PixelGrid;
use tracing::debug;

/// Raster band height shared by the GS ( L and GS v 0 variants
const BAND_HEIGHT: u32 = 24;

pub(crate) fn append_body(buf: &mut ByteBuffer, grid: &PixelGrid, params: &EncodeParams) {
    debug!(variant = ?params.image_encoding, "building ESC/POS raster");
    match params.image_encoding {
        EscPosVariant::EscAsterisk => esc_asterisk(buf, grid, params.dot_density),
        EscPosVariant::GsL => gs_l(buf, grid),
        EscPosVariant::GsV0 => gs_v0(buf, grid),
    }
}

/// ESC \* bit-image segments
///
/// Pixels are sent in height chunks of vertical bytes (normally 3, for 24
/// dots at a time) for each x position along a segment, repeated for each
/// segment down the page. Density 1 drives impact printers (U220 and kin)
/// with double-pass striping: the segment is written twice, even bit-rows
/// then odd bit-rows one dot lower, for a tighter dot pitch than the head
/// manages in one pass.
fn esc_asterisk(buf: &mut ByteBuffer, grid: &PixelGrid, density: DotDensity) {
    let w = grid.width();
    let h = grid.height();
    let dot_density = density.magnitude();
    let legacy_mode = density.legacy();

    // line height matches the size of each chunk being sent; striping
    // handles height explicitly below
    let segment_height: u8 = if dot_density > 1 {
        24
    } else if dot_density == 1 {
        8
    } else {
        16
    };
    let stripe = dot_density == 1;
    let bytes_needed: u32 = if dot_density <= 1 { 1 } else { 3 };

    if legacy_mode {
        // temporarily set line spacing to 24 dots
        buf.append_bytes(&[0x1B, 0x33, 24]);
    }

    let mut offset: u32 = 0; // top row of the segment currently being written
    let mut zero_pass = true; // striping rewrites each segment with a 1-pixel offset

    while offset < h {
        buf.append_bytes(&[0x1B, 0x2A, dot_density as u8]);
        buf.append_u16_le(w as u16);

        let first_bit: u32 = if zero_pass { 0 } else { 1 };
        let step: u32 = if stripe { 2 } else { 1 };
        let bit_limit: u32 = if stripe { 16 } else { 8 };

        for x in 0..w {
            for byte_index in 0..bytes_needed {
                let mut slice: u8 = 0;

                // striping spans 2 bytes of rows, taking every other bit,
                // compacted down into one
                let mut bit = first_bit;
                while bit < bit_limit {
                    let y = offset + byte_index * 8 + bit;
                    let i = (y * w + x) as usize;
                    if i < grid.size() && grid.get(i) {
                        // bits fill left to right within the column byte
                        slice |= 1 << (7 - (bit - first_bit) / step);
                    }
                    bit += step;
                }

                buf.push(slice);
            }
        }

        // move the print head down to the next segment (or by one dot
        // between striping passes)
        if stripe {
            if zero_pass {
                buf.append_bytes(&[0x1B, 0x4A, 0x01]);
            } else {
                buf.append_bytes(&[0x1B, 0x4A, segment_height - 1]);
                offset += 8 * bytes_needed;
            }
            zero_pass = !zero_pass;
        } else {
            if legacy_mode {
                // a newline bumps the print head down one line spacing
                buf.push(b'\n');
            } else {
                buf.append_bytes(&[0x1B, 0x4A, segment_height]);
            }
            offset += 8 * bytes_needed;
        }
    }

    if legacy_mode {
        // restore line spacing to 30 dots
        buf.append_bytes(&[0x1B, 0x33, 30]);
    }
}

/// GS ( L store-then-print bands
fn gs_l(buf: &mut ByteBuffer, grid: &PixelGrid) {
    let w = grid.width();
    let h = grid.height();

    let mut y = 0;
    while y < h {
        let band = BAND_HEIGHT.min(h - y);
        let rows = grid.packed_rows(y, band);

        // fn 112: store the graphics data in the print buffer (raster format)
        let data_len = rows.len() + 10; // 10 bytes of function parameters
        buf.append_bytes(&[0x1D, b'(', b'L']);
        buf.append_u16_le(data_len as u16);
        buf.append_bytes(&[48, 112, 48, 1, 1, 49]); // m fn a bx by c
        buf.append_u16_le(w as u16);
        buf.append_u16_le(band as u16);
        buf.append_bytes(&rows);

        // fn 50: print the graphics data in the print buffer
        buf.append_bytes(&[0x1D, b'(', b'L', 2, 0, 48, 50]);

        y += band;
    }
}

/// GS v 0 direct raster bands
fn gs_v0(buf: &mut ByteBuffer, grid: &PixelGrid) {
    let h = grid.height();
    let bytes_per_row = grid.width().div_ceil(8);

    let mut y = 0;
    while y < h {
        let band = BAND_HEIGHT.min(h - y);

        buf.append_bytes(&[0x1D, b'v', b'0', 0]); // m = 0 (normal mode)
        buf.append_u16_le(bytes_per_row as u16);
        buf.append_u16_le(band as u16);
        buf.append_bytes(&grid.packed_rows(y, band));

        y += band;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_black(width: u32, height: u32) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height);
        for i in 0..grid.size() {
            grid.set(i, true);
        }
        grid
    }

    #[test]
    fn test_gs_v0_single_band() {
        let grid = all_black(16, 24);
        let mut buf = ByteBuffer::new();
        gs_v0(&mut buf, &grid);

        let mut expected = vec![0x1D, b'v', b'0', 0, 2, 0, 24, 0];
        expected.extend(std::iter::repeat_n(0xFF, 2 * 24));
        assert_eq!(buf.as_bytes(), expected);
    }

    #[test]
    fn test_gs_v0_partial_band() {
        let grid = all_black(8, 30);
        let mut buf = ByteBuffer::new();
        gs_v0(&mut buf, &grid);
        let bytes = buf.as_bytes();

        // 24-row band, then a 6-row remainder
        assert_eq!(&bytes[..8], &[0x1D, b'v', b'0', 0, 1, 0, 24, 0]);
        let second = &bytes[8 + 24..];
        assert_eq!(&second[..8], &[0x1D, b'v', b'0', 0, 1, 0, 6, 0]);
        assert_eq!(second.len(), 8 + 6);
    }

    #[test]
    fn test_gs_l_store_and_print() {
        let grid = all_black(16, 24);
        let mut buf = ByteBuffer::new();
        gs_l(&mut buf, &grid);
        let bytes = buf.as_bytes();

        // store: 48 row bytes + 10 parameter bytes
        assert_eq!(
            &bytes[..15],
            &[0x1D, b'(', b'L', 58, 0, 48, 112, 48, 1, 1, 49, 16, 0, 24, 0]
        );
        assert!(bytes[15..15 + 48].iter().all(|&b| b == 0xFF));
        // print follows immediately
        assert_eq!(&bytes[15 + 48..], &[0x1D, b'(', b'L', 2, 0, 48, 50]);
    }

    #[test]
    fn test_esc_asterisk_default_density() {
        let grid = all_black(16, 24);
        let mut buf = ByteBuffer::new();
        esc_asterisk(&mut buf, &grid, DotDensity::DEFAULT);
        let bytes = buf.as_bytes();

        // one 24-row segment: frame, 16 columns x 3 bytes, feed
        assert_eq!(&bytes[..5], &[0x1B, 0x2A, 32, 16, 0]);
        assert!(bytes[5..5 + 48].iter().all(|&b| b == 0xFF));
        assert_eq!(&bytes[5 + 48..], &[0x1B, 0x4A, 24]);
    }

    #[test]
    fn test_esc_asterisk_legacy_bracketing() {
        let grid = all_black(8, 8);
        let mut buf = ByteBuffer::new();
        esc_asterisk(&mut buf, &grid, DotDensity::from_code(-32));
        let bytes = buf.as_bytes();

        assert_eq!(&bytes[..3], &[0x1B, 0x33, 24]);
        // legacy feeds with a plain newline instead of ESC J
        assert_eq!(bytes[bytes.len() - 4], b'\n');
        assert_eq!(&bytes[bytes.len() - 3..], &[0x1B, 0x33, 30]);
    }

    #[test]
    fn test_esc_asterisk_striping_passes() {
        let grid = all_black(8, 8);
        let mut buf = ByteBuffer::new();
        esc_asterisk(&mut buf, &grid, DotDensity::from_code(1));

        // two interleaved passes over one 8-dot segment: even rows, one-dot
        // feed, odd rows, remaining feed
        let mut expected = vec![0x1B, 0x2A, 1, 8, 0];
        expected.extend([0xF0; 8]); // rows 0,2,4,6 of each column
        expected.extend([0x1B, 0x4A, 0x01]);
        expected.extend([0x1B, 0x2A, 1, 8, 0]);
        expected.extend([0xF0; 8]); // rows 1,3,5,7
        expected.extend([0x1B, 0x4A, 0x07]);
        assert_eq!(buf.as_bytes(), expected);
    }

    #[test]
    fn test_esc_asterisk_bottom_clamp() {
        // 4 rows at triple density still emits full 3-byte columns with the
        // out-of-image bits clear
        let grid = all_black(8, 4);
        let mut buf = ByteBuffer::new();
        esc_asterisk(&mut buf, &grid, DotDensity::from_code(39));
        let bytes = buf.as_bytes();

        assert_eq!(&bytes[..5], &[0x1B, 0x2A, 39, 8, 0]);
        for col in 0..8 {
            let column = &bytes[5 + col * 3..5 + col * 3 + 3];
            assert_eq!(column, &[0xF0, 0x00, 0x00]);
        }
        assert_eq!(&bytes[5 + 24..], &[0x1B, 0x4A, 24]);
    }
}
