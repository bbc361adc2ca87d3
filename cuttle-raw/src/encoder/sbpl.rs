//! SBPL graphics body
//!
//! `ESC GH {www}{hhh}{hexData}` with 3-digit zero-padded size fields.
//! The height field is reduced by 8 the same way the width field is.
//! TODO: verify the height reduction against a real SATO unit; GH
//! documentation is ambiguous on whether the field counts dots or bytes.

use crate::buffer::ByteBuffer;
use crate::pixel::PixelGrid;

pub(crate) fn append_body(buf: &mut ByteBuffer, grid: &PixelGrid) {
    let w = format!("{:03}", grid.width() / 8);
    let h = format!("{:03}", grid.height() / 8);

    buf.push(0x1B)
        .append_ascii("GH")
        .append_ascii(&w)
        .append_ascii(&h)
        .append_ascii(&grid.hex_string());
}
