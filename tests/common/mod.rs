//! Card fixtures shared by the integration tests

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use qrcode::{Color, QrCode};
use shc_decoder::encode_card;
use std::io::Cursor;

/// JOSE header in the shape issued by SMART Health Card producers
pub const HEADER: &str =
    r#"{"zip":"DEF","alg":"ES256","kid":"3Kfdg-XwP-7gXyywtUfUADwBumDOPKMQx-iELL11W9s"}"#;

/// Minimal immunization card payload
pub const PAYLOAD: &str = r#"{"iss":"https://spec.smarthealth.cards/examples/issuer","nbf":1620847989.837,"vc":{"type":["https://smarthealth.cards#health-card","https://smarthealth.cards#immunization","https://smarthealth.cards#covid19"],"credentialSubject":{"fhirVersion":"4.0.1","fhirBundle":{"resourceType":"Bundle","type":"collection","entry":[{"fullUrl":"resource:0","resource":{"resourceType":"Patient","name":[{"family":"Anyperson","given":["John","B."]}],"birthDate":"1951-01-20"}},{"fullUrl":"resource:1","resource":{"resourceType":"Immunization","status":"completed","vaccineCode":{"coding":[{"system":"http://hl7.org/fhir/sid/cvx","code":"207"}]},"patient":{"reference":"resource:0"},"occurrenceDateTime":"2021-01-01","performer":[{"actor":{"display":"ABC General Hospital"}}],"lotNumber":"0000001"}}]}}}}"#;

/// ES256 signatures are 64 bytes (r || s)
pub fn signature() -> Vec<u8> {
    (0..64u8).map(|b| b.wrapping_mul(37)).collect()
}

/// QR text for the sample card
pub fn sample_qr_text() -> String {
    encode_card(HEADER, PAYLOAD, &signature()).expect("fixture encodes")
}

/// Pixels per QR module in rendered fixtures
pub const MODULE_PX: u32 = 4;
/// Quiet-zone width around each rendered symbol, in modules
const QUIET_MODULES: u32 = 4;

/// Render each text as a QR symbol, side by side left to right, into PNG bytes
pub fn qr_png(texts: &[&str]) -> Vec<u8> {
    let codes: Vec<QrCode> = texts
        .iter()
        .map(|text| QrCode::new(text.as_bytes()).expect("text fits in a QR code"))
        .collect();
    let sides: Vec<u32> = codes
        .iter()
        .map(|code| (code.width() as u32 + 2 * QUIET_MODULES) * MODULE_PX)
        .collect();

    let width = sides.iter().sum();
    let height = sides.iter().copied().max().unwrap_or(0);
    let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));

    let mut left = 0;
    for (code, side) in codes.iter().zip(&sides) {
        let modules = code.width();
        for (idx, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let x0 = left + ((idx % modules) as u32 + QUIET_MODULES) * MODULE_PX;
            let y0 = ((idx / modules) as u32 + QUIET_MODULES) * MODULE_PX;
            for dy in 0..MODULE_PX {
                for dx in 0..MODULE_PX {
                    img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
                }
            }
        }
        left += side;
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("png encodes");
    bytes
}
