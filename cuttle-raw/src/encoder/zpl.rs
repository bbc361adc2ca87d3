//! ZPL graphic-field body
//!
//! `^GFA,{byteLen},{byteLen},{bytesPerRow},{hexData}` — `byteLen` must
//! divide evenly into rows; anything else means the source width was not a
//! byte multiple and the command would shear on the printer.

use crate::buffer::ByteBuffer;
use crate::error::{RawError, RawResult};
use crate::pixel::PixelGrid;

pub(crate) fn append_body(buf: &mut ByteBuffer, grid: &PixelGrid) -> RawResult<()> {
    let hex = grid.hex_string();
    let byte_len = hex.len() / 2;
    let h = grid.height() as usize;

    if byte_len % h != 0 {
        return Err(RawError::MalformedInput(format!(
            "{byte_len} graphic bytes do not divide into {h} rows; width must be a multiple of 8"
        )));
    }
    let per_row = byte_len / h;

    buf.append_ascii("^GFA,")
        .append_dec(byte_len)
        .push(b',')
        .append_dec(byte_len)
        .push(b',')
        .append_dec(per_row)
        .push(b',')
        .append_ascii(&hex);
    Ok(())
}
