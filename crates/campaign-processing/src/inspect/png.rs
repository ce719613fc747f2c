//! PNG header checks.
//!
//! Layout after the 8-byte signature: chunk length (4), chunk type (4), then
//! the IHDR payload: width (4), height (4), bit depth (1), color type (1), ...

use campaign_core::models::ImageRejection;

pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Signature + IHDR length/type + 13-byte payload + CRC.
const MIN_PNG_LEN: usize = 33;
const IHDR_TYPE_OFFSET: usize = 12;
const BIT_DEPTH_OFFSET: usize = 24;
const COLOR_TYPE_OFFSET: usize = 25;

const COLOR_TYPE_RGB: u8 = 2;
const COLOR_TYPE_RGBA: u8 = 6;
const MAX_BIT_DEPTH: u8 = 8;

pub(crate) fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Accept only truecolor (RGB) or truecolor+alpha (RGBA) at up to 8 bits per channel.
pub(crate) fn check_png(bytes: &[u8]) -> Result<(), ImageRejection> {
    if bytes.len() < MIN_PNG_LEN || &bytes[IHDR_TYPE_OFFSET..IHDR_TYPE_OFFSET + 4] != b"IHDR" {
        return Err(ImageRejection::PngMissingIhdr);
    }

    let bit_depth = bytes[BIT_DEPTH_OFFSET];
    let color_type = bytes[COLOR_TYPE_OFFSET];

    let supported_color = matches!(color_type, COLOR_TYPE_RGB | COLOR_TYPE_RGBA);
    if supported_color && (1..=MAX_BIT_DEPTH).contains(&bit_depth) {
        Ok(())
    } else {
        Err(ImageRejection::PngUnsupported {
            bit_depth,
            color_type,
        })
    }
}

#[cfg(test)]
pub(crate) fn png_header(bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01]);
    bytes.extend_from_slice(&[bit_depth, color_type, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x90, 0x77, 0x53, 0xDE]);
    bytes
}
