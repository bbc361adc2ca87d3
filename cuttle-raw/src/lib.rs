//! # cuttle-raw
//!
//! Raw printer-language encoding engine - byte-exact command streams only.
//!
//! ## Scope
//!
//! This crate handles HOW a finished raster becomes printer bytes:
//! - CPCL, EPL, ZPL, SBPL and Printronix PGL label graphics
//! - ESC/POS receipt rasters (`ESC *`, `GS ( L`, `GS v 0`)
//! - Evolis dye-sublimation ribbon planes (YMCK + overlay)
//! - Monochrome quantization with per-language wire polarity
//!
//! Everything around it stays in the bridge:
//! - Rendering PDF/HTML/images into a raster → rasterizer
//! - Printer discovery and spooling → transport
//!
//! Each encode call is a pure, synchronous transform: it owns its inputs,
//! produces `header ++ body ++ footer` in one buffer, and touches no
//! shared state, so jobs for different printers can encode concurrently
//! without coordination.
//!
//! ## Example
//!
//! ```
//! use cuttle_raw::{EncodeParams, Language, PixelGrid, PixelSource};
//!
//! // 8x8 page, all black
//! let mut grid = PixelGrid::new(8, 8);
//! for i in 0..grid.size() {
//!     grid.set(i, true);
//! }
//!
//! let commands = Language::Cpcl
//!     .encode(&PixelSource::Mono(grid), &EncodeParams::default())
//!     .unwrap();
//! assert!(commands.starts_with(b"! 0 200 200 203 1\r\n"));
//! ```

mod buffer;
mod encoder;
mod error;
mod language;
mod mono;
mod params;
mod pixel;

// Re-exports
pub use buffer::{ByteBuffer, hex_string};
pub use error::{RawError, RawResult};
pub use language::Language;
pub use mono::{DEFAULT_THRESHOLD, Quantization, quantize};
pub use params::{DotDensity, EncodeParams, EscPosVariant, OverlaySpec};
pub use pixel::{PixelGrid, PixelSource, RgbRaster};
