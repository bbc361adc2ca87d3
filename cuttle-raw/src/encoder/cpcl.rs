//! CPCL expanded-graphics body
//!
//! `EG {widthBytes} {height} {x} {y} {hexData}<CR><LF>` — the byte-width
//! field uses truncating division, matching the width padding rule.

use crate::buffer::ByteBuffer;
use crate::params::EncodeParams;
use crate::pixel::PixelGrid;

pub(crate) fn append_body(buf: &mut ByteBuffer, grid: &PixelGrid, params: &EncodeParams) {
    let w = grid.width() / 8;
    let h = grid.height();

    buf.append_ascii("EG ")
        .append_dec(w)
        .push(b' ')
        .append_dec(h)
        .push(b' ')
        .append_dec(params.x)
        .push(b' ')
        .append_dec(params.y)
        .push(b' ')
        .append_ascii(&grid.hex_string())
        .append_bytes(&[13, 10]);
}
