//! PNG decode/encode boundary.
//!
//! Every supported input layout is widened to 8-bit RGBA on decode; output
//! is always 8-bit RGBA.

use crate::error::CodecError;
use pixel_filters::Image;
use std::io::Cursor;
use std::path::Path;

/// Decode PNG bytes into an RGBA image.
pub fn decode_png(bytes: &[u8]) -> Result<Image, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::Unsupported(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let (width, height) = (info.width as usize, info.height as usize);
    let samples = &buf[..info.buffer_size()];
    let stride = info.line_size;
    let channels = info.color_type.samples();

    let mut rgba = Vec::with_capacity(width * height * 4);
    for row in samples.chunks(stride).take(height) {
        for px in row[..width * channels].chunks_exact(channels) {
            match info.color_type {
                png::ColorType::Rgba => rgba.extend_from_slice(px),
                png::ColorType::Rgb => rgba.extend_from_slice(&[px[0], px[1], px[2], 255]),
                png::ColorType::GrayscaleAlpha => {
                    rgba.extend_from_slice(&[px[0], px[0], px[0], px[1]])
                }
                png::ColorType::Grayscale => rgba.extend_from_slice(&[px[0], px[0], px[0], 255]),
                png::ColorType::Indexed => {
                    return Err(CodecError::Unsupported(
                        "indexed image was not expanded".to_string(),
                    ))
                }
            }
        }
    }

    tracing::debug!(width, height, color_type = ?info.color_type, "Decoded PNG");
    Ok(Image::from_rgba_bytes(width, height, &rgba)?)
}

/// Encode an image as 8-bit RGBA PNG bytes.
pub fn encode_png(image: &Image) -> Result<Vec<u8>, CodecError> {
    let too_large = || CodecError::TooLarge {
        width: image.width(),
        height: image.height(),
    };
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.to_rgba_bytes())?;
    }
    Ok(buf.into_inner())
}

/// Read and decode a PNG file.
pub fn load_image(path: &Path) -> Result<Image, CodecError> {
    let bytes = std::fs::read(path)?;
    let image = decode_png(&bytes)?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Encode and write a PNG file.
pub fn save_image(path: &Path, image: &Image) -> Result<(), CodecError> {
    let bytes = encode_png(image)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_filters::Rgba;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_rgba_roundtrip() {
        let pixels = (0..12u8).map(|i| Rgba::new(i * 20, 255 - i, i, 100 + i)).collect();
        let image = Image::new(4, 3, pixels).unwrap();
        let decoded = decode_png(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_grayscale_widened() {
        let bytes = encode_raw(2, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[7, 200]);
        let image = decode_png(&bytes).unwrap();
        assert_eq!(image.pixels(), &[Rgba::gray(7), Rgba::gray(200)]);
    }

    #[test]
    fn test_gray_alpha_widened() {
        let bytes = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, png::BitDepth::Eight, &[50, 60]);
        assert_eq!(decode_png(&bytes).unwrap().pixel(0, 0), Rgba::new(50, 50, 50, 60));
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let bytes = encode_raw(1, 1, png::ColorType::Rgb, png::BitDepth::Eight, &[1, 2, 3]);
        assert_eq!(decode_png(&bytes).unwrap().pixel(0, 0), Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn test_sixteen_bit_stripped() {
        // One RGB pixel, big-endian 16-bit samples
        let data = [0x12, 0x34, 0xAB, 0xCD, 0xFF, 0xFF];
        let bytes = encode_raw(1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, &data);
        assert_eq!(decode_png(&bytes).unwrap().pixel(0, 0), Rgba::opaque(0x12, 0xAB, 0xFF));
    }

    #[test]
    fn test_low_bit_depth_expanded() {
        // Two 1-bit gray pixels: black, white
        let bytes = encode_raw(2, 1, png::ColorType::Grayscale, png::BitDepth::One, &[0b0100_0000]);
        let image = decode_png(&bytes).unwrap();
        assert_eq!(image.pixels(), &[Rgba::gray(0), Rgba::gray(255)]);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(decode_png(b"not a png"), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = Image::filled(3, 2, Rgba::new(9, 8, 7, 6));
        save_image(&path, &image).unwrap();
        assert_eq!(load_image(&path).unwrap(), image);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_image(Path::new("/nonexistent/in.png")),
            Err(CodecError::Io(_))
        ));
    }
}
