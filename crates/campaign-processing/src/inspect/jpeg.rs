//! JPEG marker walk.
//!
//! Scans segments from just after SOI until the first frame header, tolerating
//! garbage between segments and runs of 0xFF fill bytes.

use campaign_core::models::ImageRejection;

const MARKER_PREFIX: u8 = 0xFF;
const SOI: [u8; 2] = [0xFF, 0xD8];
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const TEM: u8 = 0x01;
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

const DHT: u8 = 0xC4;
const JPG: u8 = 0xC8;
const DAC: u8 = 0xCC;

/// Length field (2) + precision (1) + height (2) + width (2) + component count (1).
const MIN_FRAME_HEADER_LEN: usize = 8;
const PRECISION_OFFSET: usize = 2;
const COMPONENTS_OFFSET: usize = 7;

pub(crate) fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&SOI)
}

fn is_start_of_frame(marker: u8) -> bool {
    (0xC0..=0xCF).contains(&marker) && !matches!(marker, DHT | JPG | DAC)
}

/// Accept only 8-bit, 3-component frames.
pub(crate) fn check_jpeg(bytes: &[u8]) -> Result<(), ImageRejection> {
    let len = bytes.len();
    let mut pos = SOI.len();

    while pos < len {
        if bytes[pos] != MARKER_PREFIX {
            pos += 1;
            continue;
        }
        while pos < len && bytes[pos] == MARKER_PREFIX {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        let marker = bytes[pos];
        pos += 1;

        match marker {
            EOI | SOS => return Err(ImageRejection::JpegMissingSof),
            RST0..=RST7 | TEM => continue,
            _ => {}
        }

        if pos + 2 > len {
            return Err(ImageRejection::JpegTruncated { offset: pos });
        }
        let length = u16::from_be_bytes([bytes[pos], bytes[pos + 1]]);
        if length < 2 {
            return Err(ImageRejection::JpegBadSegmentLength {
                offset: pos,
                length,
            });
        }
        let end = pos + usize::from(length);
        if end > len {
            return Err(ImageRejection::JpegTruncated { offset: pos });
        }

        if is_start_of_frame(marker) {
            return check_frame_header(&bytes[pos..end]);
        }

        pos = end;
    }

    Err(ImageRejection::JpegMissingSof)
}

/// `segment` starts at the length field.
fn check_frame_header(segment: &[u8]) -> Result<(), ImageRejection> {
    if segment.len() < MIN_FRAME_HEADER_LEN {
        return Err(ImageRejection::JpegSofTooShort);
    }

    let precision = segment[PRECISION_OFFSET];
    if precision != 8 {
        return Err(ImageRejection::JpegPrecision(precision));
    }

    let components = segment[COMPONENTS_OFFSET];
    if components != 3 {
        return Err(ImageRejection::JpegComponents(components));
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// APP0 JFIF segment.
    pub const APP0: &[u8] = &[
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
        0x01, 0x00, 0x00,
    ];

    /// DHT segment with a minimal (empty) table.
    pub const DHT_SEGMENT: &[u8] = &[
        0xFF, 0xC4, 0x00, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    pub const SOS_EOI: &[u8] = &[0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xD9];

    /// Baseline frame header with the given precision and component count.
    pub fn sof(marker: u8, precision: u8, components: u8) -> Vec<u8> {
        let mut segment = vec![0xFF, marker];
        let length = 8 + 3 * components as u16;
        segment.extend_from_slice(&length.to_be_bytes());
        segment.extend_from_slice(&[precision, 0x00, 0x10, 0x00, 0x10, components]);
        for id in 1..=components {
            segment.extend_from_slice(&[id, 0x11, 0x00]);
        }
        segment
    }

    pub fn jpeg(parts: &[&[u8]]) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        for part in parts {
            bytes.extend_from_slice(part);
        }
        bytes
    }
}
