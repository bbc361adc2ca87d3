//! Per-language body encoders
//!
//! Each module exposes a stateless `append_body` that writes one page's
//! raster payload into the caller's buffer. Headers and footers live on
//! [`Language`](crate::Language); bodies never emit them.

pub(crate) mod cpcl;
pub(crate) mod epl;
pub(crate) mod escpos;
pub(crate) mod evolis;
pub(crate) mod pgl;
pub(crate) mod sbpl;
pub(crate) mod zpl;
