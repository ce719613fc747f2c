use std::io::Cursor;

/// Read width/height from the image header without decoding pixels.
pub(crate) fn probe_dimensions(data: &[u8]) -> anyhow::Result<(u32, u32)> {
    let reader = ::image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}
