//! EPL graphics-write body
//!
//! `GW{x},{y},{widthBytes},{height},{rawData}<LF>` — data bytes are the
//! wire-polarity bitmap, where EPL's 0 means black.

use crate::buffer::ByteBuffer;
use crate::params::EncodeParams;
use crate::pixel::PixelGrid;

pub(crate) fn append_body(buf: &mut ByteBuffer, grid: &PixelGrid, params: &EncodeParams) {
    let w = grid.width() / 8;
    let h = grid.height();

    buf.append_ascii("GW")
        .append_dec(params.x)
        .push(b',')
        .append_dec(params.y)
        .push(b',')
        .append_dec(w)
        .push(b',')
        .append_dec(h)
        .push(b',')
        .append_bytes(grid.packed_bytes())
        .push(b'\n');
}
