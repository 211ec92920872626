use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

//===========================================================================//

// Size limits for icon frames:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// An opaque, 8-bit RGB raster at one icon size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconFrame {
    width: u32,
    height: u32,
    rgb_data: Vec<u8>,
}

impl IconFrame {
    /// Creates a new frame with the given dimensions and RGB data.  The
    /// `width` and `height` must be nonzero, and `rgb_data` must have `3 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgb_data` is the
    /// wrong length.
    pub fn from_rgb_data(
        width: u32,
        height: u32,
        rgb_data: Vec<u8>,
    ) -> IconFrame {
        if width < MIN_WIDTH {
            panic!(
                "Invalid width (was {}, but must be at least {})",
                width, MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            panic!(
                "Invalid height (was {}, but must be at least {})",
                height, MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 3;
        if (rgb_data.len() as u64) != expected_data_len {
            panic!(
                "Invalid data length (was {}, but must be {} for {}x{} frame)",
                rgb_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        IconFrame { width, height, rgb_data }
    }

    /// Returns the width of the frame, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the frame, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the RGB data for this frame, in row-major order from top to
    /// bottom.
    pub fn rgb_data(&self) -> &[u8] {
        &self.rgb_data
    }

    pub(crate) fn read_png_info<R: Read>(
        reader: R,
    ) -> io::Result<png::Reader<R>> {
        let decoder = png::Decoder::new(reader);
        let png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        let info = png_reader.info();
        if info.width < MIN_WIDTH {
            invalid_data!(
                "Invalid PNG width (was {}, but must be at least {})",
                info.width,
                MIN_WIDTH
            );
        }
        if info.height < MIN_HEIGHT {
            invalid_data!(
                "Invalid PNG height (was {}, but must be at least {})",
                info.height,
                MIN_HEIGHT
            );
        }
        Ok(png_reader)
    }

    /// Decodes a frame from an 8-bit RGB or grayscale PNG.  Returns an error
    /// if the PNG data is malformed, or if it carries an alpha channel or a
    /// palette, since icon frames are always opaque RGB.
    pub fn read_png<R: Read>(reader: R) -> io::Result<IconFrame> {
        let mut png_reader = IconFrame::read_png_info(reader)?;
        let (width, height) = {
            let info = png_reader.info();
            if info.bit_depth != png::BitDepth::Eight {
                invalid_data!(
                    "Unsupported PNG bit depth: {:?}",
                    info.bit_depth
                );
            }
            (info.width, info.height)
        };
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        let output = match png_reader.next_frame(&mut buffer) {
            Ok(output) => output,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        buffer.truncate(output.buffer_size());
        let rgb_data = match output.color_type {
            png::ColorType::Rgb => buffer,
            png::ColorType::Grayscale => {
                let mut rgb = Vec::with_capacity(buffer.len() * 3);
                for value in buffer.into_iter() {
                    rgb.push(value);
                    rgb.push(value);
                    rgb.push(value);
                }
                rgb
            }
            png::ColorType::Rgba | png::ColorType::GrayscaleAlpha => {
                invalid_data!(
                    "PNG has an alpha channel ({:?}), but icon frames \
                     must be opaque",
                    output.color_type
                );
            }
            png::ColorType::Indexed => {
                invalid_data!(
                    "Unsupported PNG color type: {:?}",
                    output.color_type
                );
            }
        };
        Ok(IconFrame::from_rgb_data(width, height, rgb_data))
    }

    /// Encodes the frame as an optimized 8-bit RGB PNG.
    pub fn write_png<W: Write>(&self, writer: W) -> io::Result<()> {
        match self.write_png_enc(writer) {
            Ok(()) => Ok(()),
            Err(png::EncodingError::IoError(error)) => Err(error),
            Err(png::EncodingError::Format(error)) => {
                invalid_input!("PNG format error: {}", error);
            }
            Err(png::EncodingError::LimitsExceeded) => {
                invalid_input!("PNG limits exceeded");
            }
            Err(png::EncodingError::Parameter(error)) => {
                invalid_input!("PNG parameter error: {}", error);
            }
        }
    }

    fn write_png_enc<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.rgb_data)?;
        writer.finish()
    }

    /// Writes the frame to `path` as a PNG file, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_png(&mut writer)?;
        writer.flush()
    }

    /// Returns the bits-per-pixel this frame is encoded with.
    pub(crate) fn bits_per_pixel(&self) -> u16 {
        24
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::IconFrame;

    fn checkerboard(width: u32, height: u32) -> IconFrame {
        let mut rgb = Vec::new();
        for row in 0..height {
            for col in 0..width {
                let value = if (row + col) % 2 == 0 { 0 } else { 255 };
                rgb.extend_from_slice(&[value, 0x40, 255 - value]);
            }
        }
        IconFrame::from_rgb_data(width, height, rgb)
    }

    #[test]
    #[should_panic(expected = "Invalid width")]
    fn zero_width_panics() {
        IconFrame::from_rgb_data(0, 4, Vec::new());
    }

    #[test]
    #[should_panic(expected = "Invalid data length")]
    fn wrong_data_length_panics() {
        IconFrame::from_rgb_data(2, 2, vec![0u8; 16]);
    }

    #[test]
    fn png_keeps_pixels() {
        let frame = checkerboard(7, 5);
        let mut data = Vec::<u8>::new();
        frame.write_png(&mut data).unwrap();
        assert!(data.starts_with(b"\x89PNG"));
        let decoded = IconFrame::read_png(data.as_slice()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn read_grayscale_png() {
        let input: &[u8] = b"\
            \x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x00\x00\x0d\x49\x48\x44\x52\
            \x00\x00\x00\x02\x00\x00\x00\x02\x08\x00\x00\x00\x00\x57\xdd\x52\
            \xf8\x00\x00\x00\x0e\x49\x44\x41\x54\x78\x9c\x63\xb4\x77\x60\xdc\
            \xef\x00\x00\x04\x08\x01\x81\x86\x2e\xc9\x8d\x00\x00\x00\x00\x49\
            \x45\x4e\x44\xae\x42\x60\x82";
        let frame = IconFrame::read_png(input).unwrap();
        assert_eq!(frame.size(), (2, 2));
        let rgb: &[u8] = b"\
            \x3f\x3f\x3f\x7f\x7f\x7f\
            \xbf\xbf\xbf\xff\xff\xff";
        assert_eq!(frame.rgb_data(), rgb);
    }

    #[test]
    fn read_rgba_png_is_rejected() {
        let mut data = Vec::<u8>::new();
        {
            let mut encoder = png::Encoder::new(&mut data, 1, 1);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[1, 2, 3, 4]).unwrap();
        }
        let error = IconFrame::read_png(data.as_slice()).unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn read_garbage_is_invalid_data() {
        let error = IconFrame::read_png(&b"not a png"[..]).unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
    }
}

//===========================================================================//
