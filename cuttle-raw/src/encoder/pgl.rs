//! Printronix PGL logo body
//!
//! Stores the page as a `~LOGO` definition: one text line per scanline,
//! listing the columns (or column ranges) that print black.
//!
//! ```text
//! [line];[black dots range];[more black dots range]
//! e.g.
//! 1;1-12;19-22;38-39
//! ```
//!
//! Scanlines with no black dots are omitted entirely.

use crate::buffer::ByteBuffer;
use crate::error::{RawError, RawResult};
use crate::params::EncodeParams;
use crate::pixel::PixelGrid;

/// IGP standard addressing cannot store logos above this size
const IGP_MAX_WIDTH: u32 = 240;
const IGP_MAX_HEIGHT: u32 = 252;

pub(crate) fn append_body(
    buf: &mut ByteBuffer,
    grid: &PixelGrid,
    params: &EncodeParams,
) -> RawResult<()> {
    let w = grid.width();
    let h = grid.height();

    if params.logo_id.trim().is_empty() {
        return Err(RawError::InvalidParameters(
            "Printronix graphics require a logoId".into(),
        ));
    }
    if params.igp_dots && (w > IGP_MAX_WIDTH || h > IGP_MAX_HEIGHT) {
        return Err(RawError::InvalidParameters(format!(
            "IGP dots is enabled; size values HL/VL cannot exceed {IGP_MAX_WIDTH}x{IGP_MAX_HEIGHT}"
        )));
    }

    // igpDots: use IGP standard 60/72 dpi graphics (no DOT token)
    // otherwise: use the printer's native resolution (DOT token appended)
    buf.append_ascii("~LOGO;")
        .append_ascii(&params.logo_id)
        .push(b';')
        .append_dec(h)
        .push(b';')
        .append_dec(w)
        .push(b';')
        .append_ascii(if params.igp_dots { "" } else { "DOT;" })
        .push(b'\n');

    for y in 0..h {
        let line = scanline_ranges(grid, y);
        if !line.is_empty() {
            buf.append_dec(y + 1).push(b';').append_ascii(&line).push(b'\n');
        }
    }

    buf.append_ascii("END\n");
    Ok(())
}

/// Collapse one scanline into `;`-joined dot ranges, 1-indexed
///
/// A run of one column emits `"{start}"`, longer runs `"{start}-{end}"`.
/// Returns an empty string for an all-white line.
fn scanline_ranges(grid: &PixelGrid, y: u32) -> String {
    let mut line = String::new();
    let mut start: Option<u32> = None;

    for x in 0..grid.width() {
        let black = grid.get_xy(x, y);
        if black && start.is_none() {
            start = Some(x + 1);
        }
        // close the run on the first white column, or at the right edge
        let end = match (start, black, x + 1 == grid.width()) {
            (Some(_), false, _) => Some(x),
            (Some(_), true, true) => Some(x + 1),
            _ => None,
        };
        if let (Some(s), Some(e)) = (start, end) {
            if !line.is_empty() {
                line.push(';');
            }
            if s == e {
                line.push_str(&s.to_string());
            } else {
                line.push_str(&format!("{s}-{e}"));
            }
            start = None;
        }
    }
    line
}
