//! Per-language encoding parameters
//!
//! One configuration bag with named, independently-defaulted fields. The
//! bridge hands these over as a JSON options object; [`EncodeParams::from_json`]
//! applies the same defaults and alias parsing the wire format uses.

use crate::error::{RawError, RawResult};
use crate::mono::{DEFAULT_THRESHOLD, Quantization};
use crate::pixel::RgbRaster;
use serde::{Deserialize, Deserializer};

/// ESC/POS dot density code
///
/// Signed: the magnitude is the ESC \* density byte, a negative value
/// selects legacy mode (explicit line-spacing bracketing and plain `\n`
/// feeds for printers that predate `ESC J`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotDensity(i32);

impl DotDensity {
    pub const DEFAULT: DotDensity = DotDensity(32);

    pub fn from_code(code: i32) -> Self {
        DotDensity(code)
    }

    /// Parse a density alias or raw signed code, falling back on no match
    ///
    /// Aliases: `single` (32), `double` (33), `triple` (39),
    /// `single-legacy` (-32), `double-legacy` (-33).
    pub fn parse(input: &str, fallback: DotDensity) -> DotDensity {
        match input.to_ascii_lowercase().as_str() {
            "single" => DotDensity(32),
            "double" => DotDensity(33),
            "triple" => DotDensity(39),
            // negative: legacy mode
            "single-legacy" => DotDensity(-32),
            "double-legacy" => DotDensity(-33),
            other => other.parse().map(DotDensity).unwrap_or(fallback),
        }
    }

    /// The ESC \* density byte
    pub fn magnitude(&self) -> i32 {
        self.0.abs()
    }

    pub fn legacy(&self) -> bool {
        self.0 < 0
    }
}

impl Default for DotDensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> Deserialize<'de> for DotDensity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(i32),
            Alias(String),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Code(code) => DotDensity::from_code(code),
            Repr::Alias(s) => DotDensity::parse(&s, DotDensity::DEFAULT),
        })
    }
}

/// ESC/POS raster command variant
///
/// A configuration field, not a subtype: all three consume the same mono
/// grid and parameter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscPosVariant {
    /// Classic ESC \* bit-image
    #[default]
    EscAsterisk,
    /// GS ( L store + print raster
    GsL,
    /// GS v 0 direct raster print
    GsV0,
}

impl EscPosVariant {
    /// Parse from the wire spelling (`ESC_ASTERISK`, `GS_L`, `GS_V_0`),
    /// case-insensitively, falling back on no match
    pub fn parse(input: &str, fallback: EscPosVariant) -> EscPosVariant {
        match input.to_ascii_uppercase().as_str() {
            "ESC_ASTERISK" => EscPosVariant::EscAsterisk,
            "GS_L" => EscPosVariant::GsL,
            "GS_V_0" => EscPosVariant::GsV0,
            _ => fallback,
        }
    }
}

impl<'de> Deserialize<'de> for EscPosVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EscPosVariant::parse(&s, EscPosVariant::default()))
    }
}

impl<'de> Deserialize<'de> for Quantization {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Quantization::parse(&s, Quantization::default()))
    }
}

/// Evolis overlay (varnish) layer specification
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OverlaySpec {
    /// Coat the entire card (`true`) or emit an empty overlay plane (`false`)
    Coat(bool),
    /// Union of 1-indexed inclusive rectangles `[x1, y1, x2, y2]`
    Rects(Vec<[u32; 4]>),
    /// Arbitrary mask image, quantized like any mono page
    ///
    /// The mask is decoded by the caller; references in the JSON request
    /// are resolved upstream of this crate.
    #[serde(skip)]
    Mask(RgbRaster),
}

/// Encoding parameters for all language families
///
/// Fields are language-specific and independently defaulted; encoders read
/// only the ones they understand and validate at encode time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodeParams {
    /// Horizontal page offset in dots (CPCL, EPL)
    pub x: u32,
    /// Vertical page offset in dots (CPCL, EPL)
    pub y: u32,
    /// ESC \* dot density / legacy selector (ESC/POS)
    pub dot_density: DotDensity,
    /// Raster command variant (ESC/POS)
    pub image_encoding: EscPosVariant,
    /// Logo identifier, mandatory for PGL
    pub logo_id: String,
    /// Use IGP standard 60/72 dpi addressing (PGL)
    pub igp_dots: bool,
    /// Intensity levels per Y/M/C ribbon sample (Evolis)
    pub precision: u16,
    /// Overlay layer specification (Evolis)
    pub overlay: Option<OverlaySpec>,
    /// Monochrome quantization policy
    pub quantization: Quantization,
    /// Luma/alpha quantization threshold
    pub threshold: u8,
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            dot_density: DotDensity::DEFAULT,
            image_encoding: EscPosVariant::default(),
            logo_id: String::new(),
            igp_dots: false,
            precision: 128,
            overlay: None,
            quantization: Quantization::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EncodeParams {
    /// Parse the bridge's JSON options object
    ///
    /// Unknown fields are ignored; missing fields take their defaults.
    pub fn from_json(value: &serde_json::Value) -> RawResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| RawError::InvalidParameters(format!("bad options object: {e}")))
    }
}
