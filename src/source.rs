use crate::frame::IconFrame;
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, ImageError, RgbImage};
use log::debug;
use std::io;
use std::path::Path;

//===========================================================================//

/// The decoded image that every icon is resampled from.  Pixels are always
/// held as 8-bit RGB; other color types are converted on construction.
#[derive(Clone, Debug)]
pub struct SourceImage {
    original_color: ColorType,
    pixels: RgbImage,
}

impl SourceImage {
    /// Opens and decodes the image file at `path`.  The format is guessed
    /// from the file contents.  A missing or unreadable file yields the
    /// underlying I/O error; undecodable contents yield `InvalidData`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<SourceImage> {
        let path = path.as_ref();
        let reader = image::io::Reader::open(path)?.with_guessed_format()?;
        match reader.decode() {
            Ok(image) => Ok(SourceImage::from_dynamic(image)),
            Err(ImageError::IoError(error)) => Err(error),
            Err(error) => {
                invalid_data!("Cannot decode {}: {}", path.display(), error)
            }
        }
    }

    /// Wraps an already-decoded image, converting it to 8-bit RGB if needed.
    /// Any alpha channel is dropped, not composited.
    pub fn from_dynamic(image: DynamicImage) -> SourceImage {
        let original_color = image.color();
        let pixels = match image {
            DynamicImage::ImageRgb8(pixels) => pixels,
            other => {
                debug!("Converting source from {:?} to RGB", original_color);
                other.into_rgb8()
            }
        };
        SourceImage { original_color, pixels }
    }

    /// Returns the width of the source, in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Returns the height of the source, in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Returns the color type the image was decoded with, before
    /// normalization.
    pub fn original_color(&self) -> ColorType {
        self.original_color
    }

    /// Returns true if decoding produced something other than 8-bit RGB.
    pub fn was_converted(&self) -> bool {
        self.original_color != ColorType::Rgb8
    }

    /// Resamples the source to exactly `width` x `height` with a Lanczos
    /// filter.  The aspect ratio is not preserved.  Panics if either
    /// dimension is zero.
    pub fn resize(&self, width: u32, height: u32) -> IconFrame {
        debug!(
            "Resampling {}x{} source to {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        let filter = FilterType::Lanczos3;
        let resized = imageops::resize(&self.pixels, width, height, filter);
        IconFrame::from_rgb_data(width, height, resized.into_raw())
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::SourceImage;
    use image::{
        ColorType, DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba,
        RgbaImage,
    };
    use std::io::ErrorKind;

    #[test]
    fn rgb_source_is_kept_as_is() {
        let pixels = RgbImage::from_pixel(5, 3, Rgb([10, 20, 30]));
        let source =
            SourceImage::from_dynamic(DynamicImage::ImageRgb8(pixels));
        assert_eq!(source.size(), (5, 3));
        assert_eq!(source.original_color(), ColorType::Rgb8);
        assert!(!source.was_converted());
    }

    #[test]
    fn rgba_source_drops_alpha() {
        let pixels = RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 0]));
        let source =
            SourceImage::from_dynamic(DynamicImage::ImageRgba8(pixels));
        assert_eq!(source.original_color(), ColorType::Rgba8);
        assert!(source.was_converted());
        let frame = source.resize(2, 2);
        assert_eq!(frame.rgb_data().len(), 12);
        assert_eq!(&frame.rgb_data()[..3], &[200u8, 100, 50]);
    }

    #[test]
    fn grayscale_source_becomes_rgb() {
        let pixels = GrayImage::from_pixel(6, 6, Luma([77]));
        let source =
            SourceImage::from_dynamic(DynamicImage::ImageLuma8(pixels));
        assert!(source.was_converted());
        let frame = source.resize(3, 3);
        assert!(frame.rgb_data().iter().all(|&value| value == 77));
    }

    #[test]
    fn resize_ignores_aspect_ratio() {
        let pixels = RgbImage::from_pixel(40, 30, Rgb([1, 2, 3]));
        let source =
            SourceImage::from_dynamic(DynamicImage::ImageRgb8(pixels));
        let frame = source.resize(16, 16);
        assert_eq!(frame.size(), (16, 16));
        let frame = source.resize(9, 20);
        assert_eq!(frame.size(), (9, 20));
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let error =
            SourceImage::open(dir.path().join("missing.jpg")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn open_garbage_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let error = SourceImage::open(&path).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }
}

//===========================================================================//
