//! Printer control languages and encode dispatch
//!
//! The set of languages is closed, and each variant's algorithm is
//! unrelated to the others beyond the shared signature, so dispatch is a
//! single `match` rather than a trait hierarchy.

use crate::buffer::ByteBuffer;
use crate::encoder;
use crate::error::{RawError, RawResult};
use crate::params::EncodeParams;
use crate::pixel::{PixelGrid, PixelSource, RgbRaster};
use tracing::debug;

const ESC: u8 = 0x1B;

/// Raw printer control language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Zebra/Comtec mobile printers
    Cpcl,
    /// Eltron Programming Language
    Epl,
    /// Zebra Programming Language
    Zpl,
    /// SATO Barcode Printer Language
    Sbpl,
    /// Printronix Graphics Language
    Pgl,
    /// Epson ESC/POS (three raster variants)
    EscPos,
    /// Evolis dye-sublimation card printers
    Evolis,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 7] = [
        Language::Cpcl,
        Language::Epl,
        Language::Zpl,
        Language::Sbpl,
        Language::Pgl,
        Language::EscPos,
        Language::Evolis,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Cpcl => "CPCL",
            Language::Epl => "EPL",
            Language::Zpl => "ZPL",
            Language::Sbpl => "SBPL",
            Language::Pgl => "PGL",
            Language::EscPos => "ESCPOS",
            Language::Evolis => "EVOLIS",
        }
    }

    /// Alternate spellings seen in print requests
    fn alt_names(&self) -> &'static [&'static str] {
        match self {
            Language::Cpcl => &[],
            Language::Epl => &["EPL2", "EPLII"],
            Language::Zpl => &["ZPL2", "ZPLII", "ZEBRA"],
            Language::Sbpl => &["SATO"],
            Language::Pgl => &["IGP", "PRINTRONIX"],
            Language::EscPos => &[
                "ESCP", "ESCP2", "ESC", "ESC/P", "ESC/P2", "ESCP/P2", "ESC/POS", "ESC\\P",
                "EPSON",
            ],
            Language::Evolis => &[],
        }
    }

    /// Match a requested language string against canonical and alternate
    /// names, case-insensitively
    pub fn parse(input: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| {
            lang.name().eq_ignore_ascii_case(input)
                || lang
                    .alt_names()
                    .iter()
                    .any(|alt| alt.eq_ignore_ascii_case(input))
        })
    }

    /// Whether the wire format uses 0 for black pixels
    ///
    /// It makes most sense to have black pixels as 1's, but some printer
    /// manufacturers had this reversed; EPL is the common case.
    pub fn inverts_output(&self) -> bool {
        matches!(self, Language::Epl)
    }

    /// Whether the image width must be padded to a multiple of 8 before
    /// encoding
    pub fn pads_width_to_byte(&self) -> bool {
        matches!(
            self,
            Language::Zpl | Language::Epl | Language::Cpcl | Language::Sbpl
        )
    }

    /// Default raster density in dots per inch, used by the rasterization
    /// collaborator when the printer reports none
    pub fn default_density(&self) -> f64 {
        match self {
            Language::Zpl | Language::Epl | Language::Cpcl | Language::Sbpl => 203.0,
            Language::Pgl => 72.0,
            Language::EscPos => 180.0,
            Language::Evolis => 300.0,
        }
    }

    /// Commands preceding the image when printing a full label/receipt/card
    ///
    /// Depends only on `params`, never on image content.
    pub fn header(&self, _params: &EncodeParams) -> Vec<u8> {
        match self {
            // ! [Offset] [Horizontal Res.] [Vertical Res.] [Height] [Quantity]<CR><LF>
            Language::Cpcl => b"! 0 200 200 203 1\r\n".to_vec(),
            Language::Epl => b"N\n".to_vec(),
            Language::Zpl => b"^XA\n".to_vec(),
            Language::Sbpl => {
                let mut buf = ByteBuffer::new();
                buf.push(ESC).append_ascii("A");
                buf.push(ESC).append_ascii("H0000"); // horizontal print position
                buf.push(ESC).append_ascii("V0000"); // vertical print position
                buf.into_bytes()
            }
            Language::Pgl | Language::EscPos => Vec::new(),
            Language::Evolis => {
                let mut buf = ByteBuffer::new();
                buf.push(ESC).append_ascii("Pps;0\r"); // raw mode, no driver supervision
                buf.push(ESC).append_ascii("Pwr;0\r"); // landscape orientation
                buf.push(ESC).append_ascii("Wcb;k;0\r"); // clear card memory
                buf.push(ESC).append_ascii("Ss\r"); // start of sequence
                buf.into_bytes()
            }
        }
    }

    /// Commands succeeding the image
    ///
    /// Depends only on `params`, never on image content.
    pub fn footer(&self, params: &EncodeParams) -> Vec<u8> {
        match self {
            Language::Cpcl => b"PRINT\r\n".to_vec(),
            Language::Epl => b"P1,1\n".to_vec(),
            Language::Zpl => b"^XZ\n".to_vec(),
            Language::Sbpl => {
                let mut buf = ByteBuffer::new();
                buf.push(ESC).append_ascii("Q1");
                buf.push(ESC).append_ascii("Z");
                buf.into_bytes()
            }
            // place the stored logo on a form, print it, then clean up
            Language::Pgl => format!(
                "~CREATE;FORM-1;432\nLOGO\n1;1;{id}\nSTOP\nEND\n~EXECUTE;FORM-1;1\n~NORMAL\n~DELETE FORM;FORM-1\n~DELETE LOGO;{id}\n",
                id = params.logo_id
            )
            .into_bytes(),
            Language::EscPos => Vec::new(),
            Language::Evolis => {
                let mut buf = ByteBuffer::new();
                buf.push(ESC).append_ascii("Se\r"); // end of sequence
                buf.into_bytes()
            }
        }
    }

    /// Encode a finished page into the complete raw command stream
    ///
    /// Output is `header ++ body ++ footer` in one buffer, written verbatim
    /// to the spool by the transport collaborator. Fails fast: on error no
    /// bytes are produced.
    pub fn encode(&self, source: &PixelSource, params: &EncodeParams) -> RawResult<Vec<u8>> {
        if source.width() == 0 || source.height() == 0 {
            return Err(RawError::MalformedInput(format!(
                "zero-area image ({}x{})",
                source.width(),
                source.height()
            )));
        }

        debug!(
            language = self.name(),
            width = source.width(),
            height = source.height(),
            "encoding raster"
        );

        let mut buf = ByteBuffer::with_capacity(source.width() as usize * source.height() as usize / 4);
        buf.append_bytes(&self.header(params));
        match self {
            Language::Cpcl => encoder::cpcl::append_body(&mut buf, self.require_mono(source)?, params),
            Language::Epl => encoder::epl::append_body(&mut buf, self.require_mono(source)?, params),
            Language::Zpl => encoder::zpl::append_body(&mut buf, self.require_mono(source)?)?,
            Language::Sbpl => encoder::sbpl::append_body(&mut buf, self.require_mono(source)?),
            Language::Pgl => encoder::pgl::append_body(&mut buf, self.require_mono(source)?, params)?,
            Language::EscPos => encoder::escpos::append_body(&mut buf, self.require_mono(source)?, params),
            Language::Evolis => encoder::evolis::append_body(&mut buf, self.require_color(source)?, params)?,
        }
        buf.append_bytes(&self.footer(params));
        Ok(buf.into_bytes())
    }

    fn require_mono<'a>(&self, source: &'a PixelSource) -> RawResult<&'a PixelGrid> {
        source.as_mono().ok_or_else(|| {
            RawError::Unsupported(format!("{} requires a quantized monochrome bitmap", self.name()))
        })
    }

    fn require_color<'a>(&self, source: &'a PixelSource) -> RawResult<&'a RgbRaster> {
        source.as_color().ok_or_else(|| {
            RawError::Unsupported(format!("{} requires a full-color raster", self.name()))
        })
    }
}
