//! Byte-exact fixtures for the fixed-format label languages
//!
//! These pin the full `header ++ body ++ footer` streams; any change to
//! them is a wire-format change and should be deliberate.

use cuttle_raw::{
    EncodeParams, Language, PixelGrid, PixelSource, Quantization, RgbRaster, quantize,
};

fn all_black(width: u32, height: u32) -> PixelSource {
    let mut grid = PixelGrid::new(width, height);
    for i in 0..grid.size() {
        grid.set(i, true);
    }
    PixelSource::Mono(grid)
}

#[test]
fn test_cpcl_stream() {
    let commands = Language::Cpcl
        .encode(&all_black(8, 8), &EncodeParams::default())
        .expect("CPCL encode failed");

    assert_eq!(
        commands,
        b"! 0 200 200 203 1\r\nEG 1 8 0 0 FFFFFFFFFFFFFFFF\r\nPRINT\r\n"
    );
}

#[test]
fn test_zpl_stream() {
    let commands = Language::Zpl
        .encode(&all_black(8, 8), &EncodeParams::default())
        .expect("ZPL encode failed");

    assert_eq!(commands, b"^XA\n^GFA,8,8,1,FFFFFFFFFFFFFFFF^XZ\n");
}

#[test]
fn test_zpl_field_consistency() {
    // byteLen == hex/2 and bytesPerRow * height == byteLen for any
    // accepted input
    for (w, h) in [(8u32, 8u32), (16, 3), (64, 24)] {
        let commands = Language::Zpl
            .encode(&all_black(w, h), &EncodeParams::default())
            .expect("ZPL encode failed");
        let text = String::from_utf8(commands).unwrap();
        let body = text
            .strip_prefix("^XA\n^GFA,")
            .and_then(|t| t.strip_suffix("^XZ\n"))
            .unwrap();

        let mut fields = body.splitn(4, ',');
        let byte_len: usize = fields.next().unwrap().parse().unwrap();
        let byte_len2: usize = fields.next().unwrap().parse().unwrap();
        let per_row: usize = fields.next().unwrap().parse().unwrap();
        let hex = fields.next().unwrap();

        assert_eq!(byte_len, byte_len2);
        assert_eq!(byte_len, hex.len() / 2);
        assert_eq!(per_row * h as usize, byte_len);
    }
}

#[test]
fn test_epl_stream_via_quantizer() {
    // EPL flips polarity on the wire: a black page becomes zero bytes
    let raster = RgbRaster::filled(8, 2, [0, 0, 0, 255]);
    let grid = quantize(&raster, Language::Epl, Quantization::Luma, 127).expect("quantize failed");

    let commands = Language::Epl
        .encode(&PixelSource::Mono(grid), &EncodeParams::default())
        .expect("EPL encode failed");

    assert_eq!(commands, b"N\nGW0,0,1,2,\x00\x00\nP1,1\n");
}

#[test]
fn test_sbpl_stream() {
    let commands = Language::Sbpl
        .encode(&all_black(8, 16), &EncodeParams::default())
        .expect("SBPL encode failed");

    let expected = format!(
        "\x1BA\x1BH0000\x1BV0000\x1BGH001002{}\x1BQ1\x1BZ",
        "FF".repeat(16)
    );
    assert_eq!(commands, expected.as_bytes());
}

#[test]
fn test_pgl_stream() {
    // 1. A single dot on the middle scanline
    let mut grid = PixelGrid::new(8, 3);
    grid.set_xy(0, 1, true);

    let params = EncodeParams {
        logo_id: "TEST".into(),
        ..Default::default()
    };

    // 2. Blank scanlines are omitted; the footer builds, prints and
    //    deletes the one-logo form
    let commands = Language::Pgl
        .encode(&PixelSource::Mono(grid), &params)
        .expect("PGL encode failed");

    assert_eq!(
        commands,
        concat!(
            "~LOGO;TEST;3;8;DOT;\n",
            "2;1\n",
            "END\n",
            "~CREATE;FORM-1;432\nLOGO\n1;1;TEST\nSTOP\nEND\n",
            "~EXECUTE;FORM-1;1\n~NORMAL\n~DELETE FORM;FORM-1\n~DELETE LOGO;TEST\n"
        )
        .as_bytes()
    );
}

#[test]
fn test_determinism() {
    let params = EncodeParams {
        logo_id: "logo".into(),
        ..Default::default()
    };
    let source = all_black(16, 16);
    for language in [
        Language::Cpcl,
        Language::Epl,
        Language::Zpl,
        Language::Sbpl,
        Language::Pgl,
        Language::EscPos,
    ] {
        let first = language.encode(&source, &params).expect("encode failed");
        let second = language.encode(&source, &params).expect("encode failed");
        assert_eq!(first, second, "{language:?} output not deterministic");
    }
}

#[test]
fn test_header_footer_ignore_image_content() {
    let params = EncodeParams {
        logo_id: "logo".into(),
        ..Default::default()
    };
    let black = all_black(16, 16);
    let white = PixelSource::Mono(PixelGrid::new(48, 3));

    for language in Language::ALL {
        let h1 = language.header(&params);
        let f1 = language.footer(&params);

        let _ = language.encode(&black, &params);
        let _ = language.encode(&white, &params);

        assert_eq!(h1, language.header(&params), "{language:?} header drifted");
        assert_eq!(f1, language.footer(&params), "{language:?} footer drifted");
    }
}

#[test]
fn test_quantize_then_encode_pipeline() {
    // 10px-wide source pads to 16 for ZPL; the pad columns stay white
    let mut pixels = vec![[255u8, 255, 255, 255]; 10 * 2];
    for x in 0..10 {
        pixels[x] = [0, 0, 0, 255]; // top row black
    }
    let raster = RgbRaster::new(10, 2, pixels).unwrap();
    let grid = quantize(&raster, Language::Zpl, Quantization::Luma, 127).expect("quantize failed");
    assert_eq!(grid.width(), 16);

    let commands = Language::Zpl
        .encode(&PixelSource::Mono(grid), &EncodeParams::default())
        .expect("ZPL encode failed");
    // 10 black bits left-aligned in a 16-bit row, then a blank row
    assert_eq!(commands, b"^XA\n^GFA,4,4,2,FFC00000^XZ\n");
}

#[test]
fn test_params_from_json_drive_offsets() {
    let params = EncodeParams::from_json(&serde_json::json!({"x": 8, "y": 4})).unwrap();
    let commands = Language::Cpcl
        .encode(&all_black(8, 1), &params)
        .expect("CPCL encode failed");
    assert_eq!(commands, b"! 0 200 200 203 1\r\nEG 1 1 8 4 FF\r\nPRINT\r\n");
}
